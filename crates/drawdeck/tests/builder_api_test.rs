//! Integration tests for the DeckBuilder API
//!
//! These tests drive whole diagrams through parsing, resolution and export.

use std::fs;

use drawdeck::{
    DeckBuilder, DrawdeckError,
    config::AppConfig,
    draw::{DockingSite, Routing, ShapeKind},
    export::ExportFormat,
    geometry::Point,
};

const FLOWCHART: &str = r#"<mxfile host="app.diagrams.net">
  <diagram id="d1" name="Flow">
    <mxGraphModel dx="800" dy="600" grid="1">
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <mxCell id="start" value="Start" style="ellipse;whiteSpace=wrap;html=1;" vertex="1" parent="1">
          <mxGeometry x="100" y="40" width="120" height="60" as="geometry"/>
        </mxCell>
        <mxCell id="check" value="&lt;b&gt;Ok?&lt;/b&gt;" style="rhombus;whiteSpace=wrap;html=1;" vertex="1" parent="1">
          <mxGeometry x="100" y="180" width="120" height="80" as="geometry"/>
        </mxCell>
        <mxCell id="group" value="" style="group" vertex="1" connectable="0" parent="1">
          <mxGeometry x="400" y="180" width="200" height="100" as="geometry"/>
        </mxCell>
        <mxCell id="done" value="Done" style="rounded=1;fillColor=#dae8fc;" vertex="1" parent="group">
          <mxGeometry x="40" y="10" width="120" height="80" as="geometry"/>
        </mxCell>
        <mxCell id="e1" style="edgeStyle=orthogonalEdgeStyle;" edge="1" parent="1" source="start" target="check">
          <mxGeometry relative="1" as="geometry"/>
        </mxCell>
        <mxCell id="e2" value="yes" style="edgeStyle=orthogonalEdgeStyle;dashed=1;" edge="1" parent="1" source="check" target="done">
          <mxGeometry relative="1" as="geometry"/>
        </mxCell>
        <mxCell id="e3" edge="1" parent="1" source="check" target="gone">
          <mxGeometry relative="1" as="geometry"/>
        </mxCell>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>"#;

#[test]
fn test_builder_api_exists() {
    let _builder = DeckBuilder::default();
    let _builder = DeckBuilder::new(AppConfig::default());
}

#[test]
fn test_resolve_flowchart() {
    let builder = DeckBuilder::default();
    let document = builder.parse(FLOWCHART).expect("Failed to parse");
    let deck = builder.resolve(&document).expect("Failed to resolve");

    assert_eq!(deck.slides().len(), 1);
    let slide = &deck.slides()[0];
    assert_eq!(slide.name(), "Flow");

    let ids: Vec<_> = slide.shapes().iter().map(|shape| shape.id()).collect();
    assert_eq!(ids, vec!["start", "check", "group", "done"]);

    assert_eq!(slide.shape("start").unwrap().kind(), ShapeKind::Ellipse);
    assert_eq!(slide.shape("check").unwrap().kind(), ShapeKind::Diamond);
    assert_eq!(slide.shape("done").unwrap().kind(), ShapeKind::RoundedRectangle);

    // Children of a group are placed relative to it.
    let done = slide.shape("done").unwrap();
    assert_eq!(done.bounds().min_point(), Point::new(440.0, 190.0));
    assert_eq!(done.fill().unwrap().to_hex(), "#dae8fc");

    let label = slide.shape("check").unwrap().label();
    assert_eq!(label.len(), 1);
    assert_eq!(label[0].text(), "Ok?");
    assert!(label[0].format().bold());
}

#[test]
fn test_connectors_resolved() {
    let builder = DeckBuilder::default();
    let deck = builder
        .resolve(&builder.parse(FLOWCHART).unwrap())
        .unwrap();
    let slide = &deck.slides()[0];

    // The edge to a missing cell is dropped.
    assert_eq!(slide.connectors().len(), 2);
    assert!(slide.connector("e3").is_none());

    // Vertically stacked and centered: orthogonal routing collapses to straight.
    let down = slide.connector("e1").unwrap();
    assert_eq!(down.sites(), (DockingSite::Bottom, DockingSite::Top));
    assert_eq!(down.routing(), Routing::Straight);
    assert_eq!(down.geometry().start(), Point::new(160.0, 100.0));
    assert_eq!(down.geometry().end(), Point::new(160.0, 180.0));

    let across = slide.connector("e2").unwrap();
    assert_eq!(across.sites(), (DockingSite::Right, DockingSite::Left));
    assert_eq!(across.labels().len(), 1);
    assert_eq!(across.labels()[0].runs()[0].text(), "yes");
}

#[test]
fn test_render_formats() {
    let builder = DeckBuilder::default();

    let svg = builder.convert(FLOWCHART, ExportFormat::Svg).expect("Failed to render SVG");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Done"));

    let json = builder.convert(FLOWCHART, ExportFormat::Json).expect("Failed to render JSON");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["slides"][0]["shapes"].as_array().unwrap().len(), 4);
}

#[test]
fn test_parse_invalid_xml_returns_error() {
    let result = DeckBuilder::default().parse("<mxfile><diagram name=\"x\">");
    assert!(matches!(result, Err(DrawdeckError::Format { .. })));
}

#[test]
fn test_convert_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flow.drawio");
    let output = dir.path().join("flow.svg");
    fs::write(&input, FLOWCHART).unwrap();

    DeckBuilder::default().convert_file(&input, &output).expect("Failed to convert");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<svg"));
}

#[test]
fn test_failed_convert_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.drawio");
    let output = dir.path().join("broken.json");
    fs::write(&input, "<mxfile><diagram><mxGraphModel>").unwrap();

    let result = DeckBuilder::default().convert_file(&input, &output);
    assert!(result.is_err());
    assert!(!output.exists());

    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1, "Only the input file should remain");
}

#[test]
fn test_unsupported_output_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flow.drawio");
    fs::write(&input, FLOWCHART).unwrap();

    let result = DeckBuilder::default().convert_file(&input, &dir.path().join("flow.pptx"));
    assert!(matches!(result, Err(DrawdeckError::Export(_))));
}

#[test]
fn test_builder_reusability() {
    let builder = DeckBuilder::default();
    let first = builder.convert(FLOWCHART, ExportFormat::Json).unwrap();
    let second = builder.convert(FLOWCHART, ExportFormat::Json).unwrap();
    assert_eq!(first, second, "Conversion should be deterministic");
}
