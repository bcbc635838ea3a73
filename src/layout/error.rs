//! Error types for the layout engine

use thiserror::Error;

use crate::parser::ast::{Axis, Edge};

/// Errors that can occur during constraint registration and evaluation
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Reference to an element id that is not in the registry
    #[error("unknown element '{name}'")]
    UnknownElement {
        name: String,
        suggestions: Vec<String>,
    },

    /// An element id was registered twice
    #[error("duplicate element id '{id}'")]
    DuplicateElement { id: String },

    /// A constraint used the `parent` alias on an element without one
    #[error("element '{element}' has no parent, but a constraint references one")]
    MissingParent { element: String },

    /// A third edge value on an axis that already holds two
    #[error(
        "conflicting constraints on '{element}': '{attempted}' would be a third value on the \
         {axis} axis (already set: {})",
        already_set.iter().map(|e| e.name()).collect::<Vec<_>>().join(", ")
    )]
    ConflictingConstraints {
        element: String,
        axis: Axis,
        attempted: Edge,
        already_set: Vec<Edge>,
    },

    /// Two constraints assign the same (element, edge) target
    #[error("'{target}' is already assigned by constraint '{existing}'")]
    DoubleAssignment { target: String, existing: String },

    /// Circular dependency between constraints
    #[error("circular constraint dependency: {}", cycle.join(" -> "))]
    CircularConstraint { cycle: Vec<String> },
}

impl LayoutError {
    /// Create an unknown element error with suggestions
    pub fn unknown(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownElement {
            name: name.into(),
            suggestions,
        }
    }

    /// Create a duplicate element error
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateElement { id: id.into() }
    }

    /// Create a conflicting constraints error
    pub fn conflicting(
        element: impl Into<String>,
        attempted: Edge,
        already_set: Vec<Edge>,
    ) -> Self {
        Self::ConflictingConstraints {
            element: element.into(),
            axis: attempted.axis(),
            attempted,
            already_set,
        }
    }

    /// Create a circular constraint error from the cycle path
    pub fn circular(cycle: Vec<String>) -> Self {
        Self::CircularConstraint { cycle }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownElement { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_element_display() {
        let err = LayoutError::unknown("clok", vec!["clock".to_string()]);
        assert!(err.to_string().contains("clok"));
    }

    #[test]
    fn test_conflicting_constraints_display() {
        let err = LayoutError::conflicting("w", Edge::Width, vec![Edge::Left, Edge::Right]);
        let msg = err.to_string();
        assert!(msg.contains("horizontal"));
        assert!(msg.contains("left, right"));
        assert!(msg.contains("width"));
    }

    #[test]
    fn test_circular_constraint_display() {
        let err = LayoutError::circular(vec![
            "a.left".to_string(),
            "b.left".to_string(),
            "a.left".to_string(),
        ]);
        assert!(err.to_string().contains("a.left -> b.left -> a.left"));
    }
}
