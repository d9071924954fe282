//! Conversion of a positioned tree into a [`Scene`].
//!
//! Connectors go to [`RenderLayer::Connector`] and nodes to
//! [`RenderLayer::Node`], so every line is drawn beneath every node no matter
//! the order in which they are pushed.

use std::collections::HashMap;

use log::{debug, info};

use kintree_core::{
    color::{Color, adjust_color},
    draw::{
        Connector, Fill, Label, LinearGradient, NodePrimitive, Primitive, RenderLayer, Scene,
        Shadow, StrokeDefinition, TextDefinition,
    },
    family::{FamilyData, Member, StyleConfig, StyleError},
    geometry::Point,
};

use crate::{
    KintreeError,
    layout::{NODE_HEIGHT, NODE_SIZE, NODE_WIDTH, PositionedNode, TreeLayout},
    structure::build_forest,
};

/// Width of every connector line.
pub const CONNECTOR_WIDTH: f32 = 2.0;
/// Border width of the selected node.
pub const SELECTED_BORDER_WIDTH: f32 = 3.0;
/// Offset of a node's drop shadow.
pub const SHADOW_OFFSET: Point = Point::new(4.0, 4.0);
/// Opacity of a node's drop shadow.
pub const SHADOW_OPACITY: f32 = 0.2;
/// Per-channel shift from a gradient's top stop to its bottom stop.
pub const GRADIENT_SHADE: i16 = -20;
/// Label anchor relative to the node origin.
pub const LABEL_ANCHOR: Point = Point::new(NODE_WIDTH / 2.0, 35.0);
/// Font size of member labels.
pub const LABEL_FONT_SIZE: u16 = 14;

/// Id of the gradient definition used by member `id`.
///
/// Bytes outside `[A-Za-z0-9-]` are written as `_xx` hex escapes, so any
/// member id maps to a distinct fragment that `url(#..)` can resolve.
pub fn gradient_id(id: &str) -> String {
    id.bytes()
        .fold(String::from("nodeGradient-"), |mut out, byte| {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                out.push(char::from(byte));
            } else {
                out.push_str(&format!("_{byte:02x}"));
            }
            out
        })
}

/// Draws the positioned nodes with the given style.
///
/// Rendering is deterministic: equal inputs produce equal scenes.
///
/// # Errors
///
/// Returns [`StyleError`] when one of the style colors cannot be parsed.
pub fn render(
    positions: &[PositionedNode],
    members: &[Member],
    style: &StyleConfig,
    selected_id: Option<&str>,
) -> Result<Scene, StyleError> {
    let palette = style.palette()?;
    let members_by_id: HashMap<&str, &Member> = members
        .iter()
        .rev()
        .map(|member| (member.id(), member))
        .collect();
    let layout = TreeLayout::from_positions(positions.to_vec());

    let mut scene = Scene::new();
    let line_stroke = StrokeDefinition::new(palette.line, CONNECTOR_WIDTH);

    for node in positions {
        let Some(member) = members_by_id.get(node.id()) else {
            continue;
        };
        if member.is_root() {
            continue;
        }
        let Some(parent) = member.parent_id().and_then(|id| layout.position(id)) else {
            continue;
        };

        let from = parent.add_point(Point::new(NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0));
        let to = node.position().add_point(Point::new(NODE_WIDTH / 2.0, 0.0));
        scene.push(
            RenderLayer::Connector,
            Primitive::Connector(Connector::new(from, to, line_stroke.clone())),
        );
    }

    let text = TextDefinition::new(style.title_font(), LABEL_FONT_SIZE, palette.text);
    let geometry = style.node_shape().geometry(NODE_SIZE);
    let border_width = style.node_border_width() as f32;

    for node in positions {
        let name = members_by_id
            .get(node.id())
            .map(|member| member.name())
            .unwrap_or_default();

        let fill = if style.node_gradient() {
            Fill::Gradient(LinearGradient::vertical(
                gradient_id(node.id()),
                palette.node,
                adjust_color(palette.node, GRADIENT_SHADE),
            ))
        } else {
            Fill::Solid(palette.node)
        };

        let width = if selected_id == Some(node.id()) {
            SELECTED_BORDER_WIDTH
        } else {
            border_width
        };

        let mut primitive = NodePrimitive::new(
            node.id(),
            node.position(),
            geometry.clone(),
            fill,
            StrokeDefinition::new(palette.line, width),
            Label::new(name, LABEL_ANCHOR, text.clone()),
        );
        if style.node_shadow() {
            primitive = primitive.with_shadow(Shadow::new(
                SHADOW_OFFSET,
                Color::default().with_alpha(SHADOW_OPACITY),
            ));
        }

        scene.push(RenderLayer::Node, Primitive::Node(primitive));
    }

    debug!(
        primitives = scene.len(),
        shape = style.node_shape().name();
        "Scene rendered"
    );
    Ok(scene)
}

/// Builds, lays out and draws the primary tree of `data`.
///
/// An empty member list yields an empty scene.
///
/// # Errors
///
/// Returns [`KintreeError::Structure`] for cyclic parent references and
/// [`KintreeError::Style`] for invalid style colors.
pub fn render_family(data: &FamilyData, selected_id: Option<&str>) -> Result<Scene, KintreeError> {
    info!(members = data.members().len(), version = data.version(); "Rendering family");

    let forest = build_forest(data.members())?;
    let Some(root) = forest.primary() else {
        return Ok(Scene::new());
    };

    let layout = TreeLayout::new(root);
    let scene = render(layout.nodes(), data.members(), data.styles(), selected_id)?;
    Ok(scene)
}
