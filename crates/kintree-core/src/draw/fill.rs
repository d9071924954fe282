//! Fill paints: flat colors and vertical linear gradients.

use svg::node::element as svg_element;

use crate::color::Color;

/// One color stop of a [`LinearGradient`].
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    offset: f32,
    color: Color,
}

impl GradientStop {
    /// Creates a stop at `offset` (0.0 = start, 1.0 = end).
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A top-to-bottom linear gradient, referenced from shapes by its id.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    id: String,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Creates a two-stop vertical gradient running from `top` to `bottom`.
    pub fn vertical(id: impl Into<String>, top: Color, bottom: Color) -> Self {
        Self {
            id: id.into(),
            stops: vec![GradientStop::new(0.0, top), GradientStop::new(1.0, bottom)],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Renders the `<linearGradient>` definition for a `<defs>` block.
    pub fn render_to_svg(&self) -> svg_element::LinearGradient {
        self.stops.iter().fold(
            svg_element::LinearGradient::new()
                .set("id", self.id.as_str())
                .set("x1", "0%")
                .set("y1", "0%")
                .set("x2", "0%")
                .set("y2", "100%"),
            |gradient, stop| {
                gradient.add(
                    svg_element::Stop::new()
                        .set("offset", format!("{}%", stop.offset * 100.0))
                        .set("stop-color", stop.color.to_hex())
                        .set("stop-opacity", stop.color.alpha()),
                )
            },
        )
    }
}

/// How the interior of a shape is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    Gradient(LinearGradient),
}

impl Fill {
    /// Returns the value of the SVG `fill` attribute.
    pub fn to_svg_value(&self) -> String {
        match self {
            Self::Solid(color) => color.to_hex(),
            Self::Gradient(gradient) => format!("url(#{})", gradient.id()),
        }
    }

    /// Returns the `fill-opacity` to emit, if the fill is translucent.
    pub fn opacity(&self) -> Option<f32> {
        match self {
            Self::Solid(color) if color.alpha() < 1.0 => Some(color.alpha()),
            _ => None,
        }
    }

    /// Returns the gradient this fill references, if any.
    pub fn gradient(&self) -> Option<&LinearGradient> {
        match self {
            Self::Gradient(gradient) => Some(gradient),
            Self::Solid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_gradient_stops() {
        let top = Color::new("#e0e0e0").unwrap();
        let bottom = Color::new("#cccccc").unwrap();
        let gradient = LinearGradient::vertical("nodeGradient-a", top, bottom);

        assert_eq!(gradient.id(), "nodeGradient-a");
        assert_eq!(gradient.stops().len(), 2);
        assert_eq!(gradient.stops()[0].offset(), 0.0);
        assert_eq!(gradient.stops()[0].color(), top);
        assert_eq!(gradient.stops()[1].offset(), 1.0);
        assert_eq!(gradient.stops()[1].color(), bottom);
    }

    #[test]
    fn test_gradient_svg() {
        let gradient = LinearGradient::vertical(
            "g",
            Color::new("#ffffff").unwrap(),
            Color::new("#000000").unwrap(),
        );
        let rendered = gradient.render_to_svg().to_string();

        assert!(rendered.contains(r#"id="g""#));
        assert!(rendered.contains(r#"y2="100%""#));
        assert!(rendered.contains(r#"offset="0%""#));
        assert!(rendered.contains(r#"offset="100%""#));
        assert!(rendered.contains(r##"stop-color="#000000""##));
    }

    #[test]
    fn test_fill_values() {
        let solid = Fill::Solid(Color::new("#e0e0e0").unwrap());
        assert_eq!(solid.to_svg_value(), "#e0e0e0");
        assert!(solid.opacity().is_none());
        assert!(solid.gradient().is_none());

        let shadow = Fill::Solid(Color::new("black").unwrap().with_alpha(0.2));
        assert!((shadow.opacity().unwrap() - 0.2).abs() < 0.001);

        let gradient = Fill::Gradient(LinearGradient::vertical(
            "nodeGradient-root",
            Color::default(),
            Color::default(),
        ));
        assert_eq!(gradient.to_svg_value(), "url(#nodeGradient-root)");
    }
}
