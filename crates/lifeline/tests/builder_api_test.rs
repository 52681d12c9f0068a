//! Integration tests for the DiagramBuilder API

use lifeline::{
    DiagramBuilder, LifelineError,
    config::{AppConfig, LayoutConfig},
    layout::ArrowDirection,
    semantic::MessageKind,
};

const CALL_SCRIPT: &str = "\
label web Web Frontend
start web
call web q load profile

receive db q

return db q profile row

receive web q
stop web
";

#[test]
fn test_parse_and_render() {
    let builder = DiagramBuilder::default();
    let model = builder.parse(CALL_SCRIPT).expect("Failed to parse script");
    let svg = builder.render_svg(&model).expect("Failed to render");

    assert!(svg.starts_with("<svg"), "Output should start with the svg tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Web Frontend"));
    assert!(svg.contains("profile row"));
}

#[test]
fn test_layout_follows_model() {
    let builder = DiagramBuilder::default();
    let model = builder.parse(CALL_SCRIPT).unwrap();
    let layout = builder.layout(&model);

    assert_eq!(layout.lanes().len(), 2);
    assert_eq!(layout.lanes()[0].label(), "Web Frontend");
    assert_eq!(layout.lanes()[1].label(), "db");
    assert_eq!(layout.activities().len(), 2);

    let kinds: Vec<_> = layout.messages().iter().map(|arrow| arrow.kind()).collect();
    assert_eq!(kinds, [MessageKind::Call, MessageKind::Return]);
    assert_eq!(layout.messages()[0].direction(), ArrowDirection::Right);
    assert_eq!(layout.messages()[1].direction(), ArrowDirection::Left);
}

#[test]
fn test_parse_error_keeps_source() {
    let source = "start A\nstop A\nstop A\n";
    let err = DiagramBuilder::default().parse(source).unwrap_err();

    assert_eq!(err.line_number(), Some(3));
    match err {
        LifelineError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(
                err.to_string(),
                "error[E101]: cannot stop actor `A`: not active"
            );
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_is_reported() {
    let config = AppConfig::new(LayoutConfig::default().with_swimlane_width(-1.0));
    let builder = DiagramBuilder::new(config);
    let model = builder.parse("start A\nstop A\n").unwrap();

    let err = builder.render_svg(&model).unwrap_err();
    assert!(matches!(err, LifelineError::Config(_)), "got {err:?}");
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse("start A\nstop A\n").unwrap();
    let second = builder.parse(CALL_SCRIPT).unwrap();

    let svg1 = builder.render_svg(&first).unwrap();
    let svg2 = builder.render_svg(&second).unwrap();
    assert_ne!(svg1, svg2);
    assert_eq!(svg1, builder.render_svg(&first).unwrap());
}

#[test]
fn test_empty_script_renders() {
    let builder = DiagramBuilder::default();
    let model = builder.parse("").unwrap();
    let svg = builder.render_svg(&model).unwrap();
    assert!(svg.contains(r#"width="0""#));
}
