//! Error types for Tether operations.
//!
//! This module provides the main error type [`TetherError`] which wraps the
//! error conditions of graph validation, configuration and export.

use thiserror::Error;

use tether_core::graph::GraphError;

use crate::{export, layout::ConfigError};

/// The main error type for Tether operations.
#[derive(Debug, Error)]
pub enum TetherError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}
