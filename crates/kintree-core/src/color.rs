//! Color handling for kintree diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for working with colors
//! in family diagrams, together with [`adjust_color`] used for node gradients.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintree_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a color from 8-bit sRGB channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::from_rgba8(r, g, b, a)),
        }
    }

    /// Returns the color as 8-bit sRGB channels `[r, g, b, a]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Returns the `#rrggbb` form of this color, without alpha.
    ///
    /// This is the form written into SVG attributes; opacity is emitted
    /// separately through [`Color::alpha`].
    ///
    /// ```
    /// use kintree_core::color::Color;
    ///
    /// assert_eq!(Color::new("white").unwrap().to_hex(), "#ffffff");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintree_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}

/// Shifts every RGB channel of `color` by `amount`, clamping to `[0, 255]`.
///
/// Node gradients use `adjust_color(node_color, -20)` for their bottom stop.
/// Alpha is preserved. A zero amount returns the color unchanged.
///
/// ```
/// use kintree_core::color::{Color, adjust_color};
///
/// let grey = Color::new("#e0e0e0").unwrap();
/// assert_eq!(adjust_color(grey, -20).to_hex(), "#cccccc");
/// ```
pub fn adjust_color(color: Color, amount: i16) -> Color {
    if amount == 0 {
        return color;
    }

    let [r, g, b, a] = color.to_rgba8();
    let shift = |channel: u8| (i16::from(channel) + amount).clamp(0, 255) as u8;

    Color::from_rgba8(shift(r), shift(g), shift(b), a)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn color_strategy() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::from_rgba8(r, g, b, 255))
    }

    proptest! {
        #[test]
        fn zero_offset_keeps_channels(color in color_strategy()) {
            prop_assert_eq!(adjust_color(color, 0).to_rgba8(), color.to_rgba8());
        }

        #[test]
        fn negative_offset_never_underflows(color in color_strategy(), amount in -255i16..0) {
            let original = color.to_rgba8();
            let adjusted = adjust_color(color, amount).to_rgba8();
            for channel in 0..3 {
                let expected = (i16::from(original[channel]) + amount).max(0) as u8;
                prop_assert_eq!(adjusted[channel], expected);
            }
        }
    }
}
