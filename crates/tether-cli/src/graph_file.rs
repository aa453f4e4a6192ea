//! Loading graphs from TOML and JSON files.
//!
//! The format is picked from the file extension. Both formats describe the
//! same [`Graph`]: a `nodes` list of `{ id, x, y }` tables and an `edges` list
//! of identifier pairs.

use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

use tether::graph::Graph;

use crate::error::ParseFailure;

/// Errors raised while loading a graph file.
#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("Unsupported graph file extension: {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse graph: {0}")]
    Parse(ParseFailure),
}

/// Supported graph file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Toml,
    Json,
}

impl GraphFormat {
    /// Picks the format from the extension of `path`, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Reads and parses the graph stored at `path`.
///
/// # Errors
///
/// Returns [`GraphFileError`] if the extension is unknown, the file cannot be
/// read, or its content does not describe a graph.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, GraphFileError> {
    let path = path.as_ref();
    let format = GraphFormat::from_path(path)
        .ok_or_else(|| GraphFileError::UnsupportedFormat(path.to_path_buf()))?;

    info!(path = path.display().to_string(), format:?; "Loading graph");

    let src = fs::read_to_string(path).map_err(|source| GraphFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let graph = parse_graph(&src, format).map_err(|(message, span)| {
        GraphFileError::Parse(ParseFailure::new(path, src.as_str(), message, span))
    })?;

    debug!(
        node_count = graph.nodes.len(),
        edge_count = graph.edges.len();
        "Graph loaded"
    );
    Ok(graph)
}

type RawParseError = (String, Option<Range<usize>>);

fn parse_graph(src: &str, format: GraphFormat) -> Result<Graph, RawParseError> {
    match format {
        GraphFormat::Toml => {
            toml::from_str(src).map_err(|err| (err.message().to_string(), err.span()))
        }
        GraphFormat::Json => serde_json::from_str(src).map_err(|err| {
            let span = (err.line() > 0).then(|| {
                let offset = line_column_offset(src, err.line(), err.column());
                offset..offset + 1
            });
            (err.to_string(), span)
        }),
    }
}

/// Converts a 1-based line and column into a byte offset into `src`.
fn line_column_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    fn graph_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            GraphFormat::from_path(Path::new("g.toml")),
            Some(GraphFormat::Toml)
        );
        assert_eq!(
            GraphFormat::from_path(Path::new("g.JSON")),
            Some(GraphFormat::Json)
        );
        assert_eq!(GraphFormat::from_path(Path::new("g.yaml")), None);
        assert_eq!(GraphFormat::from_path(Path::new("graph")), None);
    }

    #[test]
    fn test_load_toml_graph() {
        let file = graph_file(
            ".toml",
            r#"
nodes = [
  { id = "A", x = 0.0, y = 0.0 },
  { id = "B", x = 1.0, y = 0.5 },
]
edges = [["A", "B"]]
"#,
        );

        let graph = load_graph(file.path()).unwrap();
        let expected = Graph::new()
            .with_node("A", 0.0, 0.0)
            .with_node("B", 1.0, 0.5)
            .with_edge("A", "B");
        assert_eq!(graph, expected);
    }

    #[test]
    fn test_load_json_graph() {
        let file = graph_file(
            ".json",
            r#"{"nodes": [{"id": "A", "x": 0, "y": 0}], "edges": []}"#,
        );

        let graph = load_graph(file.path()).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "A");
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_edges_default_to_empty() {
        let file = graph_file(".toml", "nodes = [{ id = \"A\", x = 0.0, y = 0.0 }]\n");
        assert!(load_graph(file.path()).unwrap().edges.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = graph_file(".yaml", "nodes: []");
        assert!(matches!(
            load_graph(file.path()),
            Err(GraphFileError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_json_error_points_at_value() {
        let src = "{\n  \"nodes\": [{\"id\": \"A\", \"x\": \"left\", \"y\": 0}]\n}";
        let file = graph_file(".json", src);

        let Err(GraphFileError::Parse(failure)) = load_graph(file.path()) else {
            panic!("expected parse error");
        };
        let span = failure.span().expect("json errors carry a position");
        assert_eq!(src[..span.start].matches('\n').count(), 1);
    }

    #[test]
    fn test_json_error_span_on_multibyte_char() {
        let src = "{\"nodes\": [{\"id\": \"A\", \"x\": é, \"y\": 0}]}";
        let file = graph_file(".json", src);

        let Err(GraphFileError::Parse(failure)) = load_graph(file.path()) else {
            panic!("expected parse error");
        };
        let span = failure.span().expect("json errors carry a position");
        assert!(failure.src().get(span).is_some());
    }

    #[test]
    fn test_toml_error_has_span() {
        let file = graph_file(".toml", "nodes = [{ id = \"A\", x = 0.0 }]\n");

        let Err(GraphFileError::Parse(failure)) = load_graph(file.path()) else {
            panic!("expected parse error");
        };
        assert!(failure.message().contains('y'));
        assert!(failure.span().is_some());
    }

    #[test]
    fn test_line_column_offset() {
        let src = "ab\ncde\nf";
        assert_eq!(line_column_offset(src, 1, 1), 0);
        assert_eq!(line_column_offset(src, 2, 2), 4);
        assert_eq!(line_column_offset(src, 3, 1), 7);
        assert_eq!(line_column_offset(src, 9, 9), src.len());
    }
}
