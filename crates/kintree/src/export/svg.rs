//! SVG document assembly.

use indexmap::IndexMap;
use log::debug;
use svg::{
    Document,
    node::element::{Definitions, Group},
};

use kintree_core::{
    draw::{LinearGradient, Scene},
    geometry::Bounds,
};

use crate::viewport::ViewTransform;

/// Default space around the content on every side.
pub const DEFAULT_PADDING: f32 = 20.0;

/// Builds SVG documents from scenes.
///
/// The document's `viewBox` is the content bounds padded on every side, and
/// its `width`/`height` equal the padded size, which is the intrinsic size
/// of a raster export.
#[derive(Debug, Clone, Copy)]
pub struct SvgWriter {
    padding: f32,
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING)
    }
}

impl SvgWriter {
    pub fn new(padding: f32) -> Self {
        Self { padding }
    }

    /// The region the document shows for content occupying `bounds`.
    pub fn view_box(&self, bounds: Bounds) -> Bounds {
        bounds.pad(self.padding)
    }

    /// Builds the document used for export.
    pub fn document(&self, scene: &Scene, bounds: Bounds) -> Document {
        let content = scene
            .render_to_svg()
            .into_iter()
            .fold(Group::new(), |group, node| group.add(node));
        self.wrap(scene, bounds, content)
    }

    /// Builds the on-screen document, with the content under the view transform.
    pub fn live_document(
        &self,
        scene: &Scene,
        bounds: Bounds,
        transform: &ViewTransform,
    ) -> Document {
        let content = scene
            .render_to_svg()
            .into_iter()
            .fold(
                Group::new().set("transform", transform.to_svg_transform()),
                |group, node| group.add(node),
            );
        self.wrap(scene, bounds, content)
    }

    fn wrap(&self, scene: &Scene, bounds: Bounds, content: Group) -> Document {
        let view_box = self.view_box(bounds);
        let origin = view_box.min_point();
        let size = view_box.to_size();
        debug!(
            width = size.width(),
            height = size.height();
            "SVG document dimensions"
        );

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    origin.x(),
                    origin.y(),
                    size.width(),
                    size.height()
                ),
            )
            .set("width", size.width())
            .set("height", size.height());

        // Duplicate member ids would otherwise emit duplicate gradient ids.
        let gradients: IndexMap<&str, &LinearGradient> = scene
            .gradients()
            .map(|gradient| (gradient.id(), gradient))
            .collect();
        if !gradients.is_empty() {
            let defs = gradients
                .values()
                .fold(Definitions::new(), |defs, gradient| {
                    defs.add(gradient.render_to_svg())
                });
            doc = doc.add(defs);
        }

        doc.add(content)
    }
}

#[cfg(test)]
mod tests {
    use kintree_core::{
        family::{Member, StyleConfig},
        geometry::{Point, Size},
    };

    use super::*;
    use crate::{layout::PositionedNode, render::render};

    fn scene(style: &StyleConfig) -> Scene {
        let members = vec![
            Member::root("root", "Root"),
            Member::new("a", "Ada").with_parent("root"),
        ];
        let positions = vec![
            PositionedNode::new("root", Point::new(0.0, 0.0)),
            PositionedNode::new("a", Point::new(0.0, 100.0)),
        ];
        render(&positions, &members, style, None).unwrap()
    }

    #[test]
    fn test_document_dimensions() {
        let scene = scene(&StyleConfig::default());
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(220.0, 120.0));

        let svg = SvgWriter::default().document(&scene, bounds).to_string();
        assert!(svg.contains(r#"viewBox="-20 -20 260 160""#));
        assert!(svg.contains(r#"width="260""#));
        assert!(svg.contains(r#"height="160""#));
    }

    #[test]
    fn test_document_contents() {
        let scene = scene(&StyleConfig::default());
        let svg = SvgWriter::default()
            .document(&scene, scene.bounds())
            .to_string();

        assert!(svg.contains("<defs>"));
        assert!(svg.contains(r#"id="nodeGradient-root""#));
        assert!(svg.contains(r#"id="nodeGradient-a""#));
        assert!(svg.contains(r#"y2="100%""#));
        assert!(svg.contains("<line"));
        assert!(svg.contains(r#"transform="translate(0, 100)""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-family="Noto Sans KR, sans-serif""#));
        assert!(svg.contains("Ada"));

        let line = svg.find("<line").unwrap();
        let node = svg.find(r#"data-member="root""#).unwrap();
        assert!(line < node, "connectors are drawn beneath nodes");
    }

    #[test]
    fn test_flat_fill_has_no_defs() {
        let style = StyleConfig::default().with_node_gradient(false);
        let scene = scene(&style);
        let svg = SvgWriter::default()
            .document(&scene, scene.bounds())
            .to_string();
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_live_document_applies_view_transform() {
        let scene = scene(&StyleConfig::default());
        let transform = ViewTransform::new(Point::new(15.0, -5.0), 1.5);

        let live = SvgWriter::default()
            .live_document(&scene, scene.bounds(), &transform)
            .to_string();
        assert!(live.contains(r#"transform="translate(15, -5) scale(1.5)""#));

        let export = SvgWriter::default()
            .document(&scene, scene.bounds())
            .to_string();
        assert!(!export.contains("scale("));
    }
}
