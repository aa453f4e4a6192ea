//! Color handling for rendered layouts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so styles can be written as CSS color strings and
//! validated before any rendering starts.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use thiserror::Error;

/// Error returned when a color string cannot be parsed
#[derive(Debug, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let faded = red.with_alpha(0.5);
    /// assert_eq!(faded.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component, 0.0 (transparent) to 1.0 (opaque).
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#cccccc").is_ok());
        assert!(Color::new("blue").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_error_mentions_input() {
        let err = Color::new("bluish").unwrap_err();
        assert!(err.to_string().contains("bluish"));
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.25);
        assert!((transparent.alpha() - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_color_default_is_opaque() {
        let color = Color::default();
        assert!((color.alpha() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_color_display() {
        let color = Color::new("blue").unwrap();
        assert!(!color.to_string().is_empty());
    }
}
