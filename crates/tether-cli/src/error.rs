//! Error types of the Tether CLI.
//!
//! [`CliError`] wraps library errors together with the failures that only the
//! CLI can hit: reading configuration and graph files and writing outputs.

use std::{fmt, io, ops::Range, path::PathBuf};

use thiserror::Error;

use tether::TetherError;

use crate::{config::ConfigFileError, graph_file::GraphFileError};

/// The top-level error returned by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tether(#[from] TetherError),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigFileError),

    #[error("Graph file error: {0}")]
    GraphFile(#[from] GraphFileError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize positions: {0}")]
    Positions(#[from] serde_json::Error),
}

/// A deserialization failure with the text it happened in.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    path: PathBuf,
    src: String,
    message: String,
    span: Option<Range<usize>>,
}

impl ParseFailure {
    /// Creates a failure for `src` read from `path`.
    ///
    /// A span past the end of `src` is clamped to it, and both ends are
    /// widened to the nearest character boundaries.
    pub fn new(
        path: impl Into<PathBuf>,
        src: impl Into<String>,
        message: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        let src = src.into();
        let span = span.map(|span| {
            let mut start = span.start.min(src.len());
            while !src.is_char_boundary(start) {
                start -= 1;
            }
            let mut end = span.end.clamp(start, src.len());
            while !src.is_char_boundary(end) {
                end += 1;
            }
            start..end
        });
        Self {
            path: path.into(),
            src,
            message: message.into(),
            span,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
