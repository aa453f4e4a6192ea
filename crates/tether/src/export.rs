//! Rendering of finished layouts.
//!
//! The exporter only reads the position mapping and the edge list; it never
//! feeds anything back into the simulation.

pub mod svg;

mod text;

use thiserror::Error;

use tether_core::color::ColorError;

/// Errors raised while rendering a layout.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid style color: {0}")]
    Color(#[from] ColorError),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("No position for node `{0}`")]
    MissingPosition(String),
}
