//! End-to-end tests: TOML scene in, placements out.

use mirror_layout::{
    build_engine, place, EngineError, KindRegistry, LayoutError, MeasureError, Scene, SceneError,
};

fn scene(toml: &str) -> Scene {
    Scene::from_str(toml).expect("scene TOML parses")
}

#[test]
fn test_minimal_scene_places_elements() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "clock"
        constraints = ["clock.left = 10px", "clock.width = 1in"]

        [[element]]
        id = "calendar"
        constraints = ["calendar.left = clock.right + 5px"]
        "#,
    );
    let placements = place(&scene, &KindRegistry::new()).unwrap();
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0].0, "clock");
    assert_eq!(placements[0].1.x, 10.0);
    assert_eq!(placements[0].1.width, 100.0);
    assert_eq!(placements[1].1.x, 115.0);
}

#[test]
fn test_parent_alias_resolves_declared_parent() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "frame"
        constraints = ["frame.left = 100px", "frame.top = 50px"]

        [[element]]
        id = "clock"
        parent = "frame"
        constraints = [
            "clock.left = parent.left + 10px",
            "clock.top = parent.top + 10px",
        ]
        "#,
    );
    let placements = place(&scene, &KindRegistry::new()).unwrap();
    let clock = &placements[1].1;
    assert_eq!((clock.x, clock.y), (110.0, 60.0));
}

#[test]
fn test_kind_defaults_combine_with_own_constraints() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "frame"

        [[element]]
        id = "fill"
        kind = "panel"
        parent = "frame"
        "#,
    );
    let placements = place(&scene, &KindRegistry::with_builtins()).unwrap();
    // panel fills its parent, which sits at the default rect
    assert_eq!(placements[1].1, placements[0].1);
}

#[test]
fn test_unknown_kind_fails() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "x"
        kind = "wibble"
        "#,
    );
    let err = place(&scene, &KindRegistry::with_builtins()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Scene(SceneError::UnknownKind { .. })
    ));
}

#[test]
fn test_duplicate_element_id_fails() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "clock"

        [[element]]
        id = "clock"
        "#,
    );
    let err = place(&scene, &KindRegistry::new()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Layout(LayoutError::DuplicateElement { .. })
    ));
}

#[test]
fn test_malformed_canvas_measurement_fails() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000 pixels", "500px"]
        physical_size = ["10in", "5in"]
        "#,
    );
    let err = place(&scene, &KindRegistry::new()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Measure(MeasureError::Malformed { .. })
    ));
}

#[test]
fn test_malformed_constraint_line_fails() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "w"
        constraints = ["w.left = + 10px"]
        "#,
    );
    let err = place(&scene, &KindRegistry::new()).unwrap_err();
    assert!(matches!(err, EngineError::Parse(_)));
}

#[test]
fn test_summary_report() {
    let scene = scene(
        r#"
        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "clock"
        constraints = ["clock.left = 10px", "clock.width = 1in"]

        [[element]]
        id = "news"
        constraints = ["news.left = clock.right + 5px", "news.height = 40px"]
        "#,
    );
    let mut engine = build_engine(&scene, &KindRegistry::new()).unwrap();
    engine.evaluate_all().unwrap();
    insta::assert_snapshot!(engine.summary(), @r"
    clock: at (10, 0) size 100x100
    news: at (115, 0) size 100x40
    ");
}
