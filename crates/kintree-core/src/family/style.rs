//! Visual settings of a family diagram.
//!
//! [`StyleConfig`] mirrors the flat settings record edited by the surrounding
//! application. Colors are kept as the CSS strings the user entered and are
//! parsed once per render through [`StyleConfig::palette`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{color::Color, draw::NodeShape};

/// Errors raised while resolving a [`StyleConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StyleError {
    #[error("invalid {field}: {message}")]
    InvalidColor {
        field: &'static str,
        message: String,
    },
}

/// Output format of an export.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ExportFormat {
    /// File extension written after the diagram title.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Returns true for bitmap formats that go through rasterization.
    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            _ => Err(format!(
                "invalid export format `{s}`, valid values: svg, png, jpeg"
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Flat mapping of the diagram's visual parameters.
///
/// Every missing key falls back to its default when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    background_color: String,
    line_color: String,
    node_color: String,
    text_color: String,
    node_shape: NodeShape,
    node_border_width: u32,
    node_shadow: bool,
    node_gradient: bool,
    title_color: String,
    #[serde(deserialize_with = "deserialize_title_size")]
    title_size: u32,
    title_font: String,
    export_format: ExportFormat,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: String::from("#ffffff"),
            line_color: String::from("#000000"),
            node_color: String::from("#e0e0e0"),
            text_color: String::from("#000000"),
            node_shape: NodeShape::Rectangle,
            node_border_width: 2,
            node_shadow: true,
            node_gradient: true,
            title_color: String::from("#000000"),
            title_size: 30,
            title_font: String::from("Noto Sans KR"),
            export_format: ExportFormat::Svg,
        }
    }
}

/// Title sizes were historically stored as strings (`"30"`).
fn deserialize_title_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(size) => Ok(size),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid title size `{text}`"))),
    }
}

impl StyleConfig {
    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }

    /// Border width of unselected nodes, never below 1.
    pub fn node_border_width(&self) -> u32 {
        self.node_border_width.max(1)
    }

    pub fn node_shadow(&self) -> bool {
        self.node_shadow
    }

    pub fn node_gradient(&self) -> bool {
        self.node_gradient
    }

    pub fn title_size(&self) -> u32 {
        self.title_size
    }

    pub fn title_font(&self) -> &str {
        &self.title_font
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    pub fn background_color(&self) -> Result<Color, StyleError> {
        parse_color("background color", &self.background_color)
    }

    pub fn line_color(&self) -> Result<Color, StyleError> {
        parse_color("line color", &self.line_color)
    }

    pub fn node_color(&self) -> Result<Color, StyleError> {
        parse_color("node color", &self.node_color)
    }

    pub fn text_color(&self) -> Result<Color, StyleError> {
        parse_color("text color", &self.text_color)
    }

    pub fn title_color(&self) -> Result<Color, StyleError> {
        parse_color("title color", &self.title_color)
    }

    /// Parses the four semantic colors at once.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidColor`] naming the first color that does
    /// not parse.
    pub fn palette(&self) -> Result<Palette, StyleError> {
        Ok(Palette {
            background: self.background_color()?,
            line: self.line_color()?,
            node: self.node_color()?,
            text: self.text_color()?,
        })
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_line_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = color.into();
        self
    }

    pub fn with_node_color(mut self, color: impl Into<String>) -> Self {
        self.node_color = color.into();
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    pub fn with_node_shape(mut self, shape: NodeShape) -> Self {
        self.node_shape = shape;
        self
    }

    pub fn with_node_border_width(mut self, width: u32) -> Self {
        self.node_border_width = width;
        self
    }

    pub fn with_node_shadow(mut self, enabled: bool) -> Self {
        self.node_shadow = enabled;
        self
    }

    pub fn with_node_gradient(mut self, enabled: bool) -> Self {
        self.node_gradient = enabled;
        self
    }

    pub fn with_title_font(mut self, font: impl Into<String>) -> Self {
        self.title_font = font.into();
        self
    }

    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = format;
        self
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color, StyleError> {
    Color::new(value).map_err(|message| StyleError::InvalidColor { field, message })
}

/// The parsed semantic colors of a [`StyleConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub line: Color,
    pub node: Color,
    pub text: Color,
}
