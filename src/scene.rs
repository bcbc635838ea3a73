//! Scene configuration: the TOML description of a canvas and its elements
//!
//! A scene declares the canvas twice (pixel size and physical size, used to
//! derive the unit conversion) and lists elements with their constraint
//! lines. An element may name a `kind`, which contributes default constraint
//! lines from the kind registry before the element's own.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::find_similar;

/// Errors that can occur when loading or interpreting a scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown element kind '{kind}'")]
    UnknownKind {
        kind: String,
        suggestions: Vec<String>,
    },
}

/// A loaded scene description
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub canvas: CanvasConfig,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementConfig>,
}

/// Canvas declared in pixels and in a physical unit
///
/// Each field holds one measurement string per axis, e.g.
/// `pixel_size = ["1000px", "500px"]`.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    pub pixel_size: [String; 2],
    pub physical_size: [String; 2],
}

/// One element entry in a scene
#[derive(Debug, Clone, Deserialize)]
pub struct ElementConfig {
    pub id: String,
    pub kind: Option<String>,
    pub parent: Option<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(content)?)
    }
}

/// Factory producing the default constraint lines for an element of a kind
pub type KindFactory = Box<dyn Fn(&str) -> Vec<String>>;

/// Explicit registration table mapping kind tags to factories
///
/// Kinds are registered up front at program start; nothing is discovered at
/// runtime. A factory receives the element id and returns constraint lines
/// that run before the element's own, so element constraints can rely on the
/// kind's defaults being in place.
pub struct KindRegistry {
    factories: HashMap<String, KindFactory>,
}

impl KindRegistry {
    /// An empty registry with no kinds
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with the built-in kinds registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // A panel fills its parent
        registry.register("panel", |id| {
            vec![
                format!("{id}.left = parent.left"),
                format!("{id}.top = parent.top"),
                format!("{id}.width = parent.width"),
                format!("{id}.height = parent.height"),
            ]
        });
        // A badge is a fixed small square, positioned by its own constraints
        registry.register("badge", |id| {
            vec![
                format!("{id}.width = 0.5in"),
                format!("{id}.height = 0.5in"),
            ]
        });
        registry
    }

    /// Register a kind, replacing any previous factory for the same tag
    pub fn register<F>(&mut self, kind: &str, factory: F)
    where
        F: Fn(&str) -> Vec<String> + 'static,
    {
        self.factories.insert(kind.to_string(), Box::new(factory));
    }

    /// Default constraint lines for an element of the given kind
    pub fn defaults_for(&self, kind: &str, id: &str) -> Result<Vec<String>, SceneError> {
        match self.factories.get(kind) {
            Some(factory) => Ok(factory(id)),
            None => Err(SceneError::UnknownKind {
                kind: kind.to_string(),
                suggestions: find_similar(
                    self.factories.keys().map(|k| k.as_str()),
                    kind,
                    2,
                ),
            }),
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_parses_canvas_and_elements() {
        let scene = Scene::from_str(
            r#"
            [canvas]
            pixel_size = ["1000px", "500px"]
            physical_size = ["10in", "5in"]

            [[element]]
            id = "clock"
            constraints = ["clock.left = 10px"]

            [[element]]
            id = "calendar"
            kind = "badge"
            parent = "clock"
            "#,
        )
        .unwrap();
        assert_eq!(scene.canvas.pixel_size[0], "1000px");
        assert_eq!(scene.elements.len(), 2);
        assert_eq!(scene.elements[1].kind.as_deref(), Some("badge"));
        assert_eq!(scene.elements[1].parent.as_deref(), Some("clock"));
        assert!(scene.elements[1].constraints.is_empty());
    }

    #[test]
    fn test_scene_without_elements() {
        let scene = Scene::from_str(
            r#"
            [canvas]
            pixel_size = ["100px", "100px"]
            physical_size = ["1in", "1in"]
            "#,
        )
        .unwrap();
        assert!(scene.elements.is_empty());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = Scene::from_str("not valid toml [[[");
        assert!(matches!(result, Err(SceneError::Toml(_))));
    }

    #[test]
    fn test_builtin_kind_produces_defaults() {
        let registry = KindRegistry::with_builtins();
        let lines = registry.defaults_for("badge", "b").unwrap();
        assert_eq!(lines, vec!["b.width = 0.5in", "b.height = 0.5in"]);
    }

    #[test]
    fn test_unknown_kind_suggests_near_miss() {
        let registry = KindRegistry::with_builtins();
        let err = registry.defaults_for("pannel", "p").unwrap_err();
        match err {
            SceneError::UnknownKind { suggestions, .. } => {
                assert_eq!(suggestions, vec!["panel".to_string()]);
            }
            other => panic!("expected unknown kind, got {other}"),
        }
    }

    #[test]
    fn test_custom_kind_registration() {
        let mut registry = KindRegistry::new();
        registry.register("strip", |id| vec![format!("{id}.height = 20px")]);
        assert!(registry.contains("strip"));
        assert_eq!(
            registry.defaults_for("strip", "s").unwrap(),
            vec!["s.height = 20px"]
        );
    }
}
