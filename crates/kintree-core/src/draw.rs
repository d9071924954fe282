//! Renderer-agnostic drawing primitives.
//!
//! The renderer in the `kintree` crate turns a positioned family tree into a
//! [`Scene`]: an ordered list of [`Primitive`]s grouped by [`RenderLayer`].
//! Every primitive knows how to emit itself as SVG nodes, which is what the
//! SVG and raster exporters build upon.

mod fill;
mod layer;
mod scene;
mod shape;
mod stroke;
mod text;

pub use fill::{Fill, GradientStop, LinearGradient};
pub use layer::{RenderLayer, SvgNode};
pub use scene::{Connector, NodePrimitive, Primitive, Scene, Shadow};
pub use shape::{NodeShape, ShapeGeometry};
pub use stroke::StrokeDefinition;
pub use text::{Label, TextDefinition};
