//! End-to-end tests of the build, layout, render and export pipeline.

use float_cmp::assert_approx_eq;
use futures::executor::block_on;

use kintree::{
    TreeDiagram,
    config::{AppConfig, ExportConfig},
    draw::{NodeShape, ShapeGeometry},
    export::{Exporter, ExportError, FileSink},
    family::{ExportFormat, FamilyData, Member, StyleConfig},
    geometry::{Bounds, Point, Size},
    layout::{TreeLayout, layout},
    render::render,
    structure::build_forest,
    viewport::{HitTarget, Viewport},
};

fn two_members() -> Vec<Member> {
    vec![
        Member::root("root", "Root"),
        Member::new("a", "A").with_parent("root"),
    ]
}

/// Skips font discovery so raster tests do not depend on the host.
fn quiet_config() -> AppConfig {
    AppConfig::new(ExportConfig::new(90, 20.0, false), None)
}

#[test]
fn test_scenario_default_style_layout_and_connector() {
    let members = two_members();
    let forest = build_forest(&members).unwrap();
    let positions = layout(forest.primary().unwrap());

    assert_eq!(positions.len(), 2);
    assert_eq!((positions[0].id(), positions[0].position()), ("root", Point::new(0.0, 0.0)));
    assert_eq!((positions[1].id(), positions[1].position()), ("a", Point::new(0.0, 100.0)));

    let scene = render(&positions, &members, &StyleConfig::default(), None).unwrap();
    let connectors: Vec<_> = scene.connectors().collect();
    assert_eq!(connectors.len(), 1);
    assert_eq!(connectors[0].from(), Point::new(60.0, 30.0));
    assert_eq!(connectors[0].to(), Point::new(60.0, 100.0));
}

#[test]
fn test_scenario_circle_with_gradient() {
    let style = StyleConfig::default()
        .with_node_shape(NodeShape::Circle)
        .with_node_gradient(true);
    let data = FamilyData::from_parts("", two_members(), style);

    let scene = TreeDiagram::default().render(&data, None).unwrap();
    let node = scene.node("a").unwrap();

    let ShapeGeometry::Circle { radius, .. } = node.geometry() else {
        panic!("expected a circle, got {:?}", node.geometry());
    };
    assert_approx_eq!(f32, *radius, 30.0);

    let gradient = node.fill().gradient().unwrap();
    assert_eq!(gradient.stops().len(), 2);
    assert_eq!(gradient.stops()[0].color().to_hex(), "#e0e0e0");
    assert_eq!(gradient.stops()[1].color().to_hex(), "#cccccc");
}

#[test]
fn test_scenario_png_export_size_and_background() {
    let style = StyleConfig::default()
        .with_background_color("#123456")
        .with_export_format(ExportFormat::Png);
    let members = two_members();
    let forest = build_forest(&members).unwrap();
    let scene = render(&layout(forest.primary().unwrap()), &members, &style, None).unwrap();

    // 220x120 of content plus 20 units of padding on each side.
    let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(220.0, 120.0));
    let blob = block_on(Exporter::new(quiet_config().export().clone()).export(&scene, &style, bounds))
        .unwrap();

    assert_eq!(blob.mime(), "image/png");
    let image = image::load_from_memory_with_format(blob.bytes(), image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(image.dimensions(), (260, 160));
    assert_eq!(image.get_pixel(0, 0).0, [0x12, 0x34, 0x56, 255]);
    assert_eq!(image.get_pixel(255, 155).0, [0x12, 0x34, 0x56, 255]);
}

#[test]
fn test_svg_export_artifact() {
    let data = FamilyData::from_parts("Kim", two_members(), StyleConfig::default());
    let artifact = block_on(TreeDiagram::new(quiet_config()).export(&data, None)).unwrap();

    assert_eq!(artifact.file_name(), "Kim.svg");
    assert_eq!(artifact.blob().mime(), "image/svg+xml");
    let svg = String::from_utf8(artifact.blob().bytes().to_vec()).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("nodeGradient-a"));
}

/// Exports a root with one gradient-filled child and samples inside the child.
fn child_fill_pixel(child_id: &str) -> [u8; 4] {
    let members = vec![
        Member::root("root", "Root"),
        Member::new(child_id, "A").with_parent("root"),
    ];
    let style = StyleConfig::default()
        .with_node_gradient(true)
        .with_export_format(ExportFormat::Png);
    let data = FamilyData::from_parts("", members, style);
    let artifact = block_on(TreeDiagram::new(quiet_config()).export(&data, None)).unwrap();

    let image = image::load_from_memory_with_format(artifact.blob().bytes(), image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    // Scene point (60, 110) is inside the child box, above its label.
    image.get_pixel(80, 130).0
}

#[test]
fn test_gradient_fill_resolves_for_any_member_id() {
    let plain = child_fill_pixel("a");
    assert_ne!(plain, [0, 0, 0, 255]);

    for id in ["a b", "a)b", "a\"b", "a_b", "a#b"] {
        assert_eq!(child_fill_pixel(id), plain, "member id {id:?}");
    }
}

#[test]
fn test_jpeg_export_to_directory() {
    let data = FamilyData::from_parts(
        "  ",
        two_members(),
        StyleConfig::default().with_export_format(ExportFormat::Jpeg),
    );
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::in_directory(dir.path());

    let artifact =
        block_on(TreeDiagram::new(quiet_config()).export_to(&data, Some("a"), &mut sink)).unwrap();

    assert_eq!(artifact.file_name(), "family-tree.jpeg");
    assert_eq!(artifact.blob().mime(), "image/jpeg");
    let written = std::fs::read(dir.path().join("family-tree.jpeg")).unwrap();
    assert_eq!(&written[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_invalid_background_fails_raster_export() {
    let style = StyleConfig::default()
        .with_background_color("nope")
        .with_export_format(ExportFormat::Png);
    let scene = kintree::draw::Scene::new();

    let result = block_on(Exporter::default().export(&scene, &style, Bounds::default()));
    assert!(matches!(result, Err(ExportError::Style(_))));
}

#[test]
fn test_failed_export_delivers_nothing() {
    let data = FamilyData::from_parts(
        "",
        vec![
            Member::root("root", "Root"),
            Member::new("a", "A").with_parent("b"),
            Member::new("b", "B").with_parent("a"),
        ],
        StyleConfig::default(),
    );
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::in_directory(dir.path());

    let result = block_on(TreeDiagram::default().export_to(&data, None, &mut sink));
    assert!(result.is_err());
    assert!(sink.delivered().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_interactive_session() {
    let data = FamilyData::from_parts("", two_members(), StyleConfig::default());
    let forest = build_forest(data.members()).unwrap();
    let layout = TreeLayout::new(forest.primary().unwrap());
    let diagram = TreeDiagram::default();
    let mut viewport = Viewport::new();

    // Click node `a`, then drag the canvas and zoom.
    viewport.press(Point::new(60.0, 130.0), &layout);
    assert_eq!(viewport.selected_id(), Some("a"));
    viewport.pointer_down(Point::new(300.0, 300.0), HitTarget::Canvas);
    viewport.pointer_move(Point::new(310.0, 320.0));
    viewport.pointer_up();
    viewport.zoom_in();

    let svg = diagram.render_svg(&data, Some(&viewport)).unwrap();
    assert!(svg.contains("translate(10, 20) scale(1.1"));
    assert!(svg.contains(r#"stroke-width="3""#));

    let details = viewport.selection_details(&data).unwrap();
    assert_eq!(details.name, "A");
    assert_eq!(details.parent_name.as_deref(), Some("Root"));

    viewport.reset();
    assert_eq!(viewport.selected_id(), None);
    assert_eq!(viewport.pan(), Point::new(0.0, 0.0));
    assert_approx_eq!(f32, viewport.zoom(), 1.0);
}
