//! Text labels drawn inside nodes.
//!
//! Labels are not measured: a label is anchored at its position with
//! `text-anchor="middle"` and the surface lays the glyphs out.

use svg::node::element as svg_element;

use crate::{color::Color, geometry::Point};

/// Generic family appended after the configured font.
const FALLBACK_FONT_FAMILY: &str = "sans-serif";

/// Font and color settings shared by every label in a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Color,
}

impl TextDefinition {
    pub fn new(font_family: impl Into<String>, font_size: u16, color: Color) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the CSS font stack: the configured family followed by `sans-serif`.
    ///
    /// ```
    /// use kintree_core::{color::Color, draw::TextDefinition};
    ///
    /// let text = TextDefinition::new("Noto Sans KR", 14, Color::default());
    /// assert_eq!(text.font_stack(), "Noto Sans KR, sans-serif");
    /// ```
    pub fn font_stack(&self) -> String {
        let family = self.font_family.trim();
        if family.is_empty() {
            FALLBACK_FONT_FAMILY.to_string()
        } else {
            format!("{family}, {FALLBACK_FONT_FAMILY}")
        }
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self::new("", 14, Color::default())
    }
}

/// A piece of text centered horizontally on a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    content: String,
    position: Point,
    definition: TextDefinition,
}

impl Label {
    pub fn new(content: impl Into<String>, position: Point, definition: TextDefinition) -> Self {
        Self {
            content: content.into(),
            position,
            definition,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Anchor point, relative to the node origin.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    pub fn render_to_svg(&self) -> svg_element::Text {
        let color = self.definition.color();
        let mut text = svg_element::Text::new(self.content.as_str())
            .set("x", self.position.x())
            .set("y", self.position.y())
            .set("text-anchor", "middle")
            .set("fill", color.to_hex())
            .set("font-family", self.definition.font_stack())
            .set("font-size", self.definition.font_size());
        if color.alpha() < 1.0 {
            text = text.set("fill-opacity", color.alpha());
        }
        text
    }
}
