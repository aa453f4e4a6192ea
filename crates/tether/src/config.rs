//! Configuration types for layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Parameters of the force simulation.
//! - [`StyleConfig`] - Visual options of the SVG renderer.
//!
//! # Example
//!
//! ```
//! # use tether::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().iterations(), 800);
//! assert!(config.style().node_color().is_ok());
//! ```

use serde::Deserialize;

use tether_core::color::{Color, ColorError};

pub use crate::layout::LayoutConfig;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for command-line overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling of rendered layouts.
///
/// | Field | Default |
/// |-------|---------|
/// | `panel_size` | 500 |
/// | `padding` | 30 |
/// | `node_radius` | 3 |
/// | `label_offset` | 5 |
/// | `edge_width` | 1 |
/// | `font_family` | `"Arial"` |
/// | `label_font_size` | 8 |
/// | `title_font_size` | 16 |
/// | `node_color` | `"blue"` |
/// | `edge_color` | `"#ccc"` |
/// | `label_color` | `"black"` |
/// | `background_color` | none (transparent) |
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    panel_size: f64,
    padding: f64,
    node_radius: f64,
    label_offset: f64,
    edge_width: f64,
    font_family: String,
    label_font_size: f64,
    title_font_size: f64,
    node_color: String,
    edge_color: String,
    label_color: String,
    background_color: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            panel_size: 500.0,
            padding: 30.0,
            node_radius: 3.0,
            label_offset: 5.0,
            edge_width: 1.0,
            font_family: "Arial".to_string(),
            label_font_size: 8.0,
            title_font_size: 16.0,
            node_color: "blue".to_string(),
            edge_color: "#ccc".to_string(),
            label_color: "black".to_string(),
            background_color: None,
        }
    }
}

impl StyleConfig {
    /// Side length of one square panel in pixels
    pub fn panel_size(&self) -> f64 {
        self.panel_size
    }

    /// Empty margin between the panel border and the unit square
    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn node_radius(&self) -> f64 {
        self.node_radius
    }

    /// Horizontal gap between a node and its label
    pub fn label_offset(&self) -> f64 {
        self.label_offset
    }

    pub fn edge_width(&self) -> f64 {
        self.edge_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn label_font_size(&self) -> f64 {
        self.label_font_size
    }

    pub fn title_font_size(&self) -> f64 {
        self.title_font_size
    }

    /// Returns the parsed node fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn node_color(&self) -> Result<Color, ColorError> {
        Color::new(&self.node_color)
    }

    /// Returns the parsed edge stroke [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn edge_color(&self) -> Result<Color, ColorError> {
        Color::new(&self.edge_color)
    }

    /// Returns the parsed label [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn label_color(&self) -> Result<Color, ColorError> {
        Color::new(&self.label_color)
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn background_color(&self) -> Result<Option<Color>, ColorError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
    }
}
