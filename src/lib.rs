//! Mirror Layout - a constraint-driven placement engine for fixed canvases
//!
//! Elements are rectangles on a canvas whose size is declared twice: in
//! pixels and in a physical unit. Constraint lines like
//! `"b.left = a.right + 5px"` relate element edges to each other and to
//! measurements; one evaluation pass resolves every constraint in dependency
//! order and derives each element's final rectangle.
//!
//! # Example
//!
//! ```rust
//! use mirror_layout::{place, KindRegistry, Scene};
//!
//! let scene = Scene::from_str(
//!     r#"
//!     [canvas]
//!     pixel_size = ["1000px", "500px"]
//!     physical_size = ["10in", "5in"]
//!
//!     [[element]]
//!     id = "clock"
//!     constraints = ["clock.left = 10px", "clock.width = 1in"]
//!     "#,
//! )
//! .unwrap();
//!
//! let placements = place(&scene, &KindRegistry::with_builtins()).unwrap();
//! assert_eq!(placements[0].1.x, 10.0);
//! assert_eq!(placements[0].1.width, 100.0);
//! ```

pub mod error;
pub mod layout;
pub mod parser;
pub mod scene;
pub mod units;

pub use error::ParseError;
pub use layout::{LayoutConfig, LayoutEngine, LayoutError, Rect};
pub use parser::{parse, parse_constraint, Document};
pub use scene::{KindRegistry, Scene, SceneError};
pub use units::{parse_measurement, Conversion, Measurement, MeasureError, Unit};

use thiserror::Error;

/// Errors that can occur anywhere in the scene-to-placement pipeline
#[derive(Debug, Error)]
pub enum EngineError {
    /// Error during constraint parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error during registration or evaluation
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error building the unit conversion
    #[error("measurement error: {0}")]
    Measure(#[from] MeasureError),

    /// Error loading or interpreting the scene
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

impl From<Vec<ParseError>> for EngineError {
    fn from(errors: Vec<ParseError>) -> Self {
        EngineError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build a layout engine from a scene description
///
/// Elements are registered first and parents wired second, so a child may be
/// declared before its parent. Kind default constraints are registered
/// before each element's own constraints.
pub fn build_engine(scene: &Scene, kinds: &KindRegistry) -> Result<LayoutEngine, EngineError> {
    let conversion = Conversion::from_axis_pairs(
        (
            parse_measurement(&scene.canvas.pixel_size[0])?,
            parse_measurement(&scene.canvas.pixel_size[1])?,
        ),
        (
            parse_measurement(&scene.canvas.physical_size[0])?,
            parse_measurement(&scene.canvas.physical_size[1])?,
        ),
    )?;

    let mut engine = LayoutEngine::new(conversion, LayoutConfig::default());

    for element in &scene.elements {
        engine.add_element(&element.id)?;
    }
    for element in &scene.elements {
        if let Some(parent) = &element.parent {
            engine.set_parent(&element.id, parent)?;
        }
    }

    for element in &scene.elements {
        if let Some(kind) = &element.kind {
            engine.add_constraints(kinds.defaults_for(kind, &element.id)?)?;
        }
        engine.add_constraints(&element.constraints)?;
    }

    Ok(engine)
}

/// Load a scene, evaluate its constraints, and return every element's
/// placement in declaration order
pub fn place(scene: &Scene, kinds: &KindRegistry) -> Result<Vec<(String, Rect)>, EngineError> {
    let mut engine = build_engine(scene, kinds)?;
    Ok(engine.place_all()?)
}
