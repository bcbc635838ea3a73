//! Core types for the layout engine: rectangles, edge stores, and the
//! element registry

use std::collections::HashMap;

use crate::layout::config::LayoutConfig;
use crate::layout::error::LayoutError;
use crate::parser::ast::{Axis, Edge};

/// A placed rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Resolve one axis from its optional origin / far-edge / extent slots
///
/// Returns `(origin, extent)`. The far edge is always implied, never stored.
/// The all-set arm is unreachable because `EdgeStore::set` rejects a third
/// value on an axis.
fn resolve_axis(
    origin: Option<f64>,
    far: Option<f64>,
    extent: Option<f64>,
    config: &LayoutConfig,
) -> (f64, f64) {
    match (origin, far, extent) {
        (None, None, None) => (config.default_origin, config.default_extent),
        (Some(origin), None, None) => (origin, config.default_extent),
        (None, None, Some(extent)) => (config.default_origin, extent),
        // The extent must keep origin + extent == far for any default origin
        (None, Some(far), None) => (config.default_origin, far - config.default_origin),
        (Some(origin), None, Some(extent)) => (origin, extent),
        (Some(origin), Some(far), None) => (origin, far - origin),
        (None, Some(far), Some(extent)) => (far - extent, extent),
        (Some(_), Some(_), Some(_)) => {
            unreachable!("edge store allows at most two values per axis")
        }
    }
}

/// Per-element storage for the six edge slots
///
/// At most two of {left, right, width} and two of {top, bottom, height} may
/// be set at once; the third is always derived on read. Slots are only ever
/// overwritten, never cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeStore {
    left: Option<f64>,
    right: Option<f64>,
    width: Option<f64>,
    top: Option<f64>,
    bottom: Option<f64>,
    height: Option<f64>,
}

impl EdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw slot contents, without derivation
    pub fn get(&self, edge: Edge) -> Option<f64> {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Width => self.width,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Height => self.height,
        }
    }

    /// Set a slot, rejecting a third value on its axis before mutating
    pub fn set(&mut self, element: &str, edge: Edge, value: f64) -> Result<(), LayoutError> {
        let already_set: Vec<Edge> = edge
            .axis()
            .edges()
            .into_iter()
            .filter(|e| *e != edge && self.get(*e).is_some())
            .collect();
        if already_set.len() >= 2 {
            return Err(LayoutError::conflicting(element, edge, already_set));
        }

        let slot = match edge {
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
            Edge::Width => &mut self.width,
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
            Edge::Height => &mut self.height,
        };
        *slot = Some(value);
        Ok(())
    }

    /// Current value of an edge: the stored slot if set, otherwise derived
    /// from the other slots on its axis
    pub fn value(&self, edge: Edge, config: &LayoutConfig) -> f64 {
        if let Some(v) = self.get(edge) {
            return v;
        }
        let (origin, extent) = self.axis_values(edge.axis(), config);
        match edge {
            Edge::Left | Edge::Top => origin,
            Edge::Right | Edge::Bottom => origin + extent,
            Edge::Width | Edge::Height => extent,
        }
    }

    fn axis_values(&self, axis: Axis, config: &LayoutConfig) -> (f64, f64) {
        match axis {
            Axis::Horizontal => resolve_axis(self.left, self.right, self.width, config),
            Axis::Vertical => resolve_axis(self.top, self.bottom, self.height, config),
        }
    }

    /// Derive the full rectangle from whichever slots are set
    pub fn rect(&self, config: &LayoutConfig) -> Rect {
        let (x, width) = self.axis_values(Axis::Horizontal, config);
        let (y, height) = self.axis_values(Axis::Vertical, config);
        Rect::new(x, y, width, height)
    }
}

/// An element on the canvas: an id, an edge store, and tree bookkeeping
#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub edges: EdgeStore,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            children: vec![],
            edges: EdgeStore::new(),
        }
    }
}

/// Id-keyed element storage preserving registration order
///
/// Constraints hold element ids, never element references, so the registry
/// is the single owner of every element and its edge store.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    elements: HashMap<String, Element>,
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element, rejecting duplicate ids
    pub fn insert(&mut self, element: Element) -> Result<(), LayoutError> {
        if self.elements.contains_key(&element.id) {
            return Err(LayoutError::duplicate(&element.id));
        }
        self.order.push(element.id.clone());
        self.elements.insert(element.id.clone(), element);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Result<&Element, LayoutError> {
        self.elements
            .get(id)
            .ok_or_else(|| LayoutError::unknown(id, self.similar_ids(id)))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Element, LayoutError> {
        if self.elements.contains_key(id) {
            Ok(self.elements.get_mut(id).expect("checked above"))
        } else {
            Err(LayoutError::unknown(id, self.similar_ids(id)))
        }
    }

    /// Link a child to its parent, wiring both directions
    pub fn set_parent(&mut self, child: &str, parent: &str) -> Result<(), LayoutError> {
        if !self.contains(parent) {
            return Err(LayoutError::unknown(parent, self.similar_ids(parent)));
        }
        self.get_mut(child)?.parent = Some(parent.to_string());
        self.get_mut(parent)?.children.push(child.to_string());
        Ok(())
    }

    /// Element ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn similar_ids(&self, target: &str) -> Vec<String> {
        super::find_similar(self.order.iter().map(|s| s.as_str()), target, 2)
    }
}
