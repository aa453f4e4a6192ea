//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the standard error types of the
//! library and the CLI and miette's rich diagnostic formatting.
//!
//! Failures to parse a graph or configuration file carry their source text,
//! so they are rendered with a labeled snippet. Everything else is reported
//! as a plain message with a diagnostic code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use tether::{TetherError, graph::GraphError};

use crate::{
    config::ConfigFileError, error::CliError, error::ParseFailure, graph_file::GraphFileError,
};

/// Adapter for a file parse failure.
///
/// This adapter wraps a [`ParseFailure`] and implements [`MietteDiagnostic`]
/// so the report shows the offending part of the file.
pub struct ParseAdapter<'a> {
    /// The wrapped failure
    failure: &'a ParseFailure,
    /// Source text for displaying snippets
    src: &'a str,
    code: &'static str,
}

impl<'a> ParseAdapter<'a> {
    /// Create a new parse adapter.
    pub fn new(failure: &'a ParseFailure, code: &'static str) -> Self {
        Self {
            failure,
            src: failure.src(),
            code,
        }
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("failure", &self.failure)
            .field("code", &self.code)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.failure, f)
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.failure.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for [`CliError`] variants without source text.
///
/// This adapter handles I/O errors, graph validation errors, configuration
/// errors and export errors.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "tether::io",
            CliError::Tether(TetherError::Graph(_)) => "tether::graph",
            CliError::Tether(TetherError::Config(_)) => "tether::config",
            CliError::Tether(TetherError::Export(_)) => "tether::export",
            CliError::ConfigFile(_) => "tether::config_file",
            CliError::GraphFile(_) => "tether::graph_file",
            CliError::Positions(_) => "tether::positions",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CliError::Tether(TetherError::Graph(GraphError::UnknownNode { .. })) => {
                "every edge endpoint must be declared in `nodes`"
            }
            CliError::GraphFile(GraphFileError::UnsupportedFormat(_)) => {
                "use a .toml or .json graph file"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse failure with its source text.
    Parse(ParseAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::GraphFile(GraphFileError::Parse(failure)) => {
            vec![Reportable::Parse(ParseAdapter::new(failure, "tether::graph_file"))]
        }
        CliError::ConfigFile(ConfigFileError::Parse(failure)) => {
            vec![Reportable::Parse(ParseAdapter::new(failure, "tether::config_file"))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
