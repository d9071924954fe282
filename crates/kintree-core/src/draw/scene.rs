//! The [`Scene`]: an ordered, renderer-agnostic list of drawing primitives.
//!
//! Primitives are kept sorted by [`RenderLayer`], preserving insertion order
//! within a layer, so iterating a scene always yields connectors first and
//! then every node with its shadow, shape and label.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Fill, Label, LinearGradient, RenderLayer, ShapeGeometry, StrokeDefinition, SvgNode},
    geometry::{Bounds, Point},
};

/// A drop shadow drawn beneath a node shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    offset: Point,
    color: Color,
}

impl Shadow {
    pub fn new(offset: Point, color: Color) -> Self {
        Self { offset, color }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A straight line joining a parent node to one of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    from: Point,
    to: Point,
    stroke: StrokeDefinition,
}

impl Connector {
    pub fn new(from: Point, to: Point, stroke: StrokeDefinition) -> Self {
        Self { from, to, stroke }
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.from, self.to)
    }

    pub fn render_to_svg(&self) -> svg_element::Line {
        let line = svg_element::Line::new()
            .set("x1", self.from.x())
            .set("y1", self.from.y())
            .set("x2", self.to.x())
            .set("y2", self.to.y());
        apply_stroke!(line, &self.stroke)
    }
}

/// One member node: optional shadow, outlined shape and name label.
///
/// The geometry and label are expressed relative to `origin`, the node's
/// top-left corner in layout space.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePrimitive {
    id: String,
    origin: Point,
    geometry: ShapeGeometry,
    shadow: Option<Shadow>,
    fill: Fill,
    stroke: StrokeDefinition,
    label: Label,
}

impl NodePrimitive {
    pub fn new(
        id: impl Into<String>,
        origin: Point,
        geometry: ShapeGeometry,
        fill: Fill,
        stroke: StrokeDefinition,
        label: Label,
    ) -> Self {
        Self {
            id: id.into(),
            origin,
            geometry,
            shadow: None,
            fill,
            stroke,
            label,
        }
    }

    /// Adds a drop shadow (builder style).
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Member id this node represents.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }

    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Absolute bounds of the shape and its shadow.
    pub fn bounds(&self) -> Bounds {
        let local = self.geometry.bounds();
        let local = match &self.shadow {
            Some(shadow) => local.merge(&local.translate(shadow.offset())),
            None => local,
        };
        local.translate(self.origin)
    }

    /// Renders the node as a group translated to its origin.
    pub fn render_to_svg(&self) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set(
                "transform",
                format!("translate({}, {})", self.origin.x(), self.origin.y()),
            )
            .set("data-member", self.id.as_str());

        if let Some(shadow) = &self.shadow {
            group = group.add(self.geometry.render_to_svg(
                &Fill::Solid(shadow.color()),
                None,
                Some(shadow.offset()),
            ));
        }

        group
            .add(
                self.geometry
                    .render_to_svg(&self.fill, Some(&self.stroke), None),
            )
            .add(self.label.render_to_svg())
    }
}

/// A drawing primitive of the [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Connector(Connector),
    Node(NodePrimitive),
}

impl Primitive {
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Connector(connector) => connector.bounds(),
            Self::Node(node) => node.bounds(),
        }
    }

    pub fn render_to_svg(&self) -> SvgNode {
        match self {
            Self::Connector(connector) => Box::new(connector.render_to_svg()),
            Self::Node(node) => Box::new(node.render_to_svg()),
        }
    }
}

/// An ordered sequence of primitives representing one frame of the diagram.
///
/// # Example
///
/// ```
/// # use kintree_core::draw::{Connector, Primitive, RenderLayer, Scene, StrokeDefinition};
/// # use kintree_core::geometry::Point;
/// let mut scene = Scene::new();
/// let line = Connector::new(
///     Point::new(60.0, 30.0),
///     Point::new(60.0, 100.0),
///     StrokeDefinition::default(),
/// );
/// scene.push(RenderLayer::Connector, Primitive::Connector(line));
///
/// assert_eq!(scene.len(), 1);
/// assert_eq!(scene.connectors().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    items: Vec<(RenderLayer, Primitive)>,
}

impl Scene {
    /// Creates a new empty `Scene`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primitive to `layer`, after everything already in that layer.
    pub fn push(&mut self, layer: RenderLayer, primitive: Primitive) {
        let index = self.items.partition_point(|(existing, _)| *existing <= layer);
        self.items.insert(index, (layer, primitive));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates primitives in drawing order, bottom to top.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.items.iter().map(|(_, primitive)| primitive)
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.primitives().filter_map(|primitive| match primitive {
            Primitive::Connector(connector) => Some(connector),
            Primitive::Node(_) => None,
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodePrimitive> {
        self.primitives().filter_map(|primitive| match primitive {
            Primitive::Node(node) => Some(node),
            Primitive::Connector(_) => None,
        })
    }

    /// Returns the node primitive drawn for member `id`.
    pub fn node(&self, id: &str) -> Option<&NodePrimitive> {
        self.nodes().find(|node| node.id() == id)
    }

    /// Every gradient referenced by the scene's nodes, in drawing order.
    pub fn gradients(&self) -> impl Iterator<Item = &LinearGradient> {
        self.nodes().filter_map(|node| node.fill().gradient())
    }

    /// Union of the bounds of every primitive; zero bounds for an empty scene.
    pub fn bounds(&self) -> Bounds {
        self.primitives()
            .map(Primitive::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Renders the scene to SVG groups, one per non-empty layer, bottom to top.
    ///
    /// Each group carries a `data-layer` attribute naming its layer.
    pub fn render_to_svg(&self) -> Vec<SvgNode> {
        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, primitive) in &self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == *layer => {
                    Some((current_layer, group.add(primitive.render_to_svg())))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new()
                        .set("data-layer", layer.name())
                        .add(primitive.render_to_svg());
                    Some((*layer, group))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}
