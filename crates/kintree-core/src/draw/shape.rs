//! Node shapes.
//!
//! [`NodeShape`] is the closed set of outlines a member node can take. Each
//! variant has its own geometry function producing a [`ShapeGeometry`] in the
//! node's local coordinate space (origin at the node's top-left corner).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de};
use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    draw::{Fill, StrokeDefinition, layer::SvgNode},
    geometry::{Bounds, Point, Size},
};

/// Corner radius of the plain `rectangle` shape.
const RECTANGLE_CORNER_RADIUS: f32 = 5.0;

/// The outline used for every node of a diagram.
///
/// Unknown names fall back to [`NodeShape::Rectangle`] when parsed or
/// deserialized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "ShapeName")]
pub enum NodeShape {
    #[default]
    Rectangle,
    Rounded,
    Circle,
    Hexagon,
}

impl NodeShape {
    /// Returns the configuration name of this shape.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Rounded => "rounded",
            Self::Circle => "circle",
            Self::Hexagon => "hexagon",
        }
    }

    /// Computes the geometry of this shape for a node box of `size`.
    pub fn geometry(self, size: Size) -> ShapeGeometry {
        match self {
            Self::Rectangle => rectangle(size),
            Self::Rounded => rounded(size),
            Self::Circle => circle(size),
            Self::Hexagon => hexagon(size),
        }
    }
}

impl FromStr for NodeShape {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "rounded" => Self::Rounded,
            "circle" => Self::Circle,
            "hexagon" => Self::Hexagon,
            _ => Self::Rectangle,
        })
    }
}

impl From<String> for NodeShape {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(shape) => shape,
            Err(never) => match never {},
        }
    }
}

/// Any configuration value given for a shape. Non-string values count as
/// unknown names.
#[derive(Deserialize)]
#[serde(untagged)]
enum ShapeName {
    Name(String),
    Other(de::IgnoredAny),
}

impl From<ShapeName> for NodeShape {
    fn from(value: ShapeName) -> Self {
        match value {
            ShapeName::Name(name) => Self::from(name),
            ShapeName::Other(_) => Self::Rectangle,
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn rectangle(size: Size) -> ShapeGeometry {
    ShapeGeometry::Rect {
        size,
        radius: RECTANGLE_CORNER_RADIUS,
    }
}

fn rounded(size: Size) -> ShapeGeometry {
    ShapeGeometry::Rect {
        size,
        radius: size.height() / 2.0,
    }
}

fn circle(size: Size) -> ShapeGeometry {
    ShapeGeometry::Circle {
        center: Point::new(size.width() / 2.0, size.height() / 2.0),
        radius: size.height() / 2.0,
    }
}

fn hexagon(size: Size) -> ShapeGeometry {
    let (width, height) = (size.width(), size.height());
    let w = width / 2.0;
    let h = height / 2.0;

    ShapeGeometry::Polygon {
        points: vec![
            Point::new(w, 0.0),
            Point::new(width, h),
            Point::new(width, height - h),
            Point::new(w, height),
            Point::new(0.0, height - h),
            Point::new(0.0, h),
        ],
    }
}

/// Concrete outline of a node in node-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    /// Rectangle anchored at the origin with rounded corners.
    Rect { size: Size, radius: f32 },
    Circle { center: Point, radius: f32 },
    Polygon { points: Vec<Point> },
}

impl ShapeGeometry {
    /// Returns the local bounding box of the outline.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rect { size, .. } => Bounds::new_from_top_left(Point::default(), *size),
            Self::Circle { center, radius } => Bounds::from_points(
                Point::new(center.x() - radius, center.y() - radius),
                Point::new(center.x() + radius, center.y() + radius),
            ),
            Self::Polygon { points } => points
                .iter()
                .map(|point| Bounds::from_points(*point, *point))
                .reduce(|acc, bounds| acc.merge(&bounds))
                .unwrap_or_default(),
        }
    }

    /// Renders the outline as an SVG element.
    ///
    /// `offset` is applied as a `translate` transform on the element, which is
    /// how drop shadows are displaced from the shape they belong to.
    pub fn render_to_svg(
        &self,
        fill: &Fill,
        stroke: Option<&StrokeDefinition>,
        offset: Option<Point>,
    ) -> SvgNode {
        macro_rules! paint {
            ($element:expr) => {{
                let mut element = $element.set("fill", fill.to_svg_value());
                if let Some(opacity) = fill.opacity() {
                    element = element.set("fill-opacity", opacity);
                }
                if let Some(stroke) = stroke {
                    element = apply_stroke!(element, stroke);
                }
                if let Some(offset) = offset {
                    element = element.set(
                        "transform",
                        format!("translate({},{})", offset.x(), offset.y()),
                    );
                }
                Box::new(element) as SvgNode
            }};
        }

        match self {
            Self::Rect { size, radius } => paint!(
                svg_element::Rectangle::new()
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("rx", *radius)
                    .set("ry", *radius)
            ),
            Self::Circle { center, radius } => paint!(
                svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", *radius)
            ),
            Self::Polygon { points } => {
                let points = points
                    .iter()
                    .map(|point| format!("{},{}", point.x(), point.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                paint!(svg_element::Polygon::new().set("points", points))
            }
        }
    }
}
