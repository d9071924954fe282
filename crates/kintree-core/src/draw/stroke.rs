//! Stroke definitions for connector lines and node borders.
//!
//! Exported items:
//! - [`StrokeDefinition`]: stroke color and width
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! # Applying to SVG Elements
//!
//! ```
//! use kintree_core::draw::StrokeDefinition;
//! use kintree_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
//! let line = svg_element::Line::new()
//!     .set("x1", 0)
//!     .set("y1", 0);
//!
//! let line = kintree_core::apply_stroke!(line, &stroke);
//! ```

use crate::color::Color;

/// A stroke definition for rendering lines and borders.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StrokeDefinition {
    /// Black, 2 units wide.
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 2.0,
        }
    }
}

/// Applies stroke attributes (`stroke`, `stroke-opacity`, `stroke-width`) to an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke: &$crate::draw::StrokeDefinition = $stroke;
        let color = stroke.color();
        let element = $element
            .set("stroke", color.to_hex())
            .set("stroke-width", stroke.width());
        if color.alpha() < 1.0 {
            element.set("stroke-opacity", color.alpha())
        } else {
            element
        }
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_default_stroke() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.color().to_hex(), "#000000");
        assert_eq!(stroke.width(), 2.0);
    }

    #[test]
    fn test_apply_stroke_macro() {
        let stroke = StrokeDefinition::new(Color::new("#123456").unwrap(), 2.0);
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke);

        let rendered = line.to_string();
        assert!(rendered.contains(r##"stroke="#123456""##));
        assert!(rendered.contains(r#"stroke-width="2""#));
        assert!(!rendered.contains("stroke-opacity"));
    }

    #[test]
    fn test_apply_stroke_macro_translucent() {
        let stroke = StrokeDefinition::new(Color::new("black").unwrap().with_alpha(0.5), 1.0);
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke);

        assert!(line.to_string().contains(r#"stroke-opacity="0.5""#));
    }
}
