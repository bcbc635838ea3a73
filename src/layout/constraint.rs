//! Registered constraints and their evaluation
//!
//! A `Constraint` is a parsed declaration with its aliases pinned down: by
//! the time one is stored, `self` and `parent` have been resolved against
//! the target element, so dependencies and evaluation only ever deal in
//! concrete element ids.

use crate::layout::config::LayoutConfig;
use crate::layout::error::LayoutError;
use crate::layout::types::Registry;
use crate::parser::ast::{ConstraintDecl, Edge, ElementRef, Term};
use crate::units::Conversion;

/// A fully-qualified edge: the assignment target of a constraint, or one of
/// its dependencies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub element: String,
    pub edge: Edge,
}

impl EdgeKey {
    pub fn new(element: impl Into<String>, edge: Edge) -> Self {
        Self {
            element: element.into(),
            edge,
        }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.element, self.edge)
    }
}

/// One registered constraint: a target edge and the terms that produce its
/// value
#[derive(Debug, Clone)]
pub struct Constraint {
    pub target: EdgeKey,
    terms: Vec<Term>,
    /// Original source line, kept for error reporting
    pub source: String,
}

impl Constraint {
    /// Build a constraint from a parsed declaration, resolving the `self`
    /// and `parent` aliases in every term against the target element
    pub fn from_decl(decl: ConstraintDecl, source: &str, registry: &Registry) -> Result<Self, LayoutError> {
        let target = EdgeKey::new(decl.target_element.node.as_str(), decl.target_edge.node);
        registry.get(&target.element)?;

        let mut terms = Vec::with_capacity(decl.terms.len());
        for spanned in decl.terms {
            let mut term = spanned.node;
            if let Some(reference) = &mut term.reference {
                let id = resolve_alias(&reference.element.node, &target.element, registry)?;
                reference.element.node = ElementRef::Named(crate::parser::ast::Identifier::new(id));
            }
            terms.push(term);
        }

        Ok(Self {
            target,
            terms,
            source: source.to_string(),
        })
    }

    /// The edges this constraint reads, in term order
    pub fn dependencies(&self) -> Vec<EdgeKey> {
        self.terms
            .iter()
            .filter_map(|term| term.reference.as_ref())
            .map(|reference| {
                EdgeKey::new(named_id(&reference.element.node), reference.edge.node)
            })
            .collect()
    }

    /// Compute the target value from the current registry state
    ///
    /// Pure with respect to the registry: referenced edges are read through
    /// the same derivation as `get_rect`, and nothing is written back.
    pub fn evaluate(
        &self,
        registry: &Registry,
        conversion: &Conversion,
        config: &LayoutConfig,
    ) -> Result<f64, LayoutError> {
        let mut total = 0.0;
        for term in &self.terms {
            let offset_px = conversion.to_px(&term.offset) as f64;
            match &term.reference {
                Some(reference) => {
                    let element = registry.get(named_id(&reference.element.node))?;
                    let value = element.edges.value(reference.edge.node, config);
                    total += term.multiplier * value + offset_px;
                }
                None => total += term.multiplier * offset_px,
            }
        }
        Ok(total)
    }
}

/// Turn an element reference into a concrete, registered id
fn resolve_alias(
    reference: &ElementRef,
    target_element: &str,
    registry: &Registry,
) -> Result<String, LayoutError> {
    match reference {
        ElementRef::Named(id) => {
            registry.get(id.as_str())?;
            Ok(id.as_str().to_string())
        }
        ElementRef::SelfRef => Ok(target_element.to_string()),
        ElementRef::Parent => registry
            .get(target_element)?
            .parent
            .clone()
            .ok_or_else(|| LayoutError::MissingParent {
                element: target_element.to_string(),
            }),
    }
}

fn named_id(reference: &ElementRef) -> &str {
    match reference {
        ElementRef::Named(id) => id.as_str(),
        // from_decl rewrites every alias to a named reference
        _ => unreachable!("aliases are resolved at registration"),
    }
}
