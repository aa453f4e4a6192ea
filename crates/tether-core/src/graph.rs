//! Graph input model and its validated, index-based form.
//!
//! A [`Graph`] is the caller-facing description: nodes with string identifiers
//! and initial coordinates, plus an edge list of identifier pairs. It
//! deserializes directly from the data files the CLI reads.
//!
//! [`Graph::validate`] checks the structural invariants once and produces an
//! [`IndexedGraph`], where every node is addressed by a dense [`NodeIndex`].
//! The layout engine only ever works on the indexed form, so the quadratic
//! force loops never hash identifiers.
//!
//! # Example
//!
//! ```
//! # use tether_core::graph::Graph;
//! let graph = Graph::new()
//!     .with_node("A", 0.0, 0.0)
//!     .with_node("B", 1.0, 0.0)
//!     .with_edge("A", "B");
//!
//! let indexed = graph.validate().unwrap();
//! assert_eq!(indexed.node_count(), 2);
//! assert_eq!(indexed.edge_count(), 1);
//! ```

use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;

/// Largest accepted magnitude of an initial coordinate.
///
/// Differences and squared distances between any two accepted positions stay
/// finite in `f64`.
pub const MAX_COORDINATE: f64 = 1e150;

/// Structural errors detected while validating a [`Graph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("edge #{edge} references unknown node `{node}`")]
    UnknownNode { edge: usize, node: String },

    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("node `{0}` has a non-finite initial coordinate")]
    NonFiniteCoordinate(String),

    #[error("node `{0}` has an initial coordinate larger than 1e150 in magnitude")]
    CoordinateOutOfRange(String),
}

/// A node with its initial position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier of the node
    pub id: String,
    /// Initial x-coordinate
    pub x: f64,
    /// Initial y-coordinate
    pub y: f64,
}

impl Node {
    /// Creates a node at the given initial position
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    /// Returns the initial position as a [`Point`]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An undirected edge between two node identifiers.
///
/// Serialized as a two-element array, `["A", "B"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge(String, String);

impl Edge {
    /// Creates an edge between `a` and `b`
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self(a.into(), b.into())
    }

    /// Returns the first endpoint
    pub fn source(&self) -> &str {
        &self.0
    }

    /// Returns the second endpoint
    pub fn target(&self) -> &str {
        &self.1
    }
}

/// Caller-facing graph description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in declaration order
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges as identifier pairs
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns the graph
    pub fn with_node(mut self, id: impl Into<String>, x: f64, y: f64) -> Self {
        self.nodes.push(Node::new(id, x, y));
        self
    }

    /// Appends an edge and returns the graph
    pub fn with_edge(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.edges.push(Edge::new(a, b));
        self
    }

    /// Checks the structural invariants and builds the indexed form.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNode`] if two nodes share an identifier
    /// - [`GraphError::NonFiniteCoordinate`] if a node starts at NaN or infinity
    /// - [`GraphError::CoordinateOutOfRange`] if a coordinate exceeds [`MAX_COORDINATE`]
    /// - [`GraphError::UnknownNode`] if an edge endpoint is not a declared node
    pub fn validate(&self) -> Result<IndexedGraph, GraphError> {
        let mut ids = IndexSet::with_capacity(self.nodes.len());
        let mut positions = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            if !node.position().is_finite() {
                return Err(GraphError::NonFiniteCoordinate(node.id.clone()));
            }
            if node.x.abs() > MAX_COORDINATE || node.y.abs() > MAX_COORDINATE {
                return Err(GraphError::CoordinateOutOfRange(node.id.clone()));
            }
            if !ids.insert(node.id.clone()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
            positions.push(node.position());
        }

        let lookup = |edge: usize, id: &str| {
            ids.get_index_of(id)
                .map(NodeIndex)
                .ok_or_else(|| GraphError::UnknownNode {
                    edge,
                    node: id.to_string(),
                })
        };

        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| Ok((lookup(idx, edge.source())?, lookup(idx, edge.target())?)))
            .collect::<Result<Vec<_>, GraphError>>()?;

        debug!(
            node_count = ids.len(),
            edge_count = edges.len();
            "Graph validated"
        );

        Ok(IndexedGraph {
            ids,
            positions,
            edges,
        })
    }
}

/// Dense index of a node inside an [`IndexedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the raw index into the node arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A validated graph addressed by [`NodeIndex`].
///
/// Every edge endpoint is guaranteed to be a valid index and identifiers are
/// unique. Node order is the declaration order of the source [`Graph`].
#[derive(Debug, Clone)]
pub struct IndexedGraph {
    ids: IndexSet<String>,
    positions: Vec<Point>,
    edges: Vec<(NodeIndex, NodeIndex)>,
}

impl IndexedGraph {
    /// Returns the number of nodes
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the identifier of a node
    pub fn id(&self, node: NodeIndex) -> &str {
        self.ids
            .get_index(node.0)
            .map(String::as_str)
            .expect("NodeIndex is only created for nodes of this graph")
    }

    /// Looks up the index of an identifier
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.ids.get_index_of(id).map(NodeIndex)
    }

    /// Iterates identifiers in node order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Returns the initial positions, indexed by [`NodeIndex::index`]
    pub fn initial_positions(&self) -> &[Point] {
        &self.positions
    }

    /// Returns the edges as index pairs
    pub fn edges(&self) -> &[(NodeIndex, NodeIndex)] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> Graph {
        Graph::new()
            .with_node("A", 0.0, 0.0)
            .with_node("B", 1.0, 0.0)
            .with_node("C", 0.5, 1.0)
            .with_edge("A", "B")
            .with_edge("B", "C")
    }

    #[test]
    fn test_validate_builds_indices_in_declaration_order() {
        let indexed = path_graph().validate().unwrap();

        assert_eq!(indexed.node_count(), 3);
        assert_eq!(indexed.ids().collect::<Vec<_>>(), vec!["A", "B", "C"]);

        let b = indexed.index_of("B").unwrap();
        assert_eq!(b.index(), 1);
        assert_eq!(indexed.id(b), "B");
        assert_eq!(indexed.initial_positions()[1], Point::new(1.0, 0.0));
    }

    #[test]
    fn test_validate_resolves_edges() {
        let indexed = path_graph().validate().unwrap();
        let edges: Vec<_> = indexed
            .edges()
            .iter()
            .map(|&(a, b)| (indexed.id(a), indexed.id(b)))
            .collect();
        assert_eq!(edges, vec![("A", "B"), ("B", "C")]);
    }

    #[test]
    fn test_validate_rejects_unknown_endpoint() {
        let graph = path_graph().with_edge("C", "Z");
        let err = graph.validate().unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNode {
                edge: 2,
                node: "Z".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_node() {
        let graph = path_graph().with_node("A", 3.0, 3.0);
        assert_eq!(
            graph.validate().unwrap_err(),
            GraphError::DuplicateNode("A".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_coordinate() {
        let graph = Graph::new().with_node("A", f64::NAN, 0.0);
        assert_eq!(
            graph.validate().unwrap_err(),
            GraphError::NonFiniteCoordinate("A".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_huge_coordinate() {
        let graph = Graph::new()
            .with_node("A", -1.0e308, 0.0)
            .with_node("B", 1.0e308, 0.0);
        assert_eq!(
            graph.validate().unwrap_err(),
            GraphError::CoordinateOutOfRange("A".to_string())
        );

        let graph = Graph::new().with_node("A", 0.0, -MAX_COORDINATE * 2.0);
        assert!(matches!(
            graph.validate(),
            Err(GraphError::CoordinateOutOfRange(_))
        ));
    }

    #[test]
    fn test_validate_accepts_coordinate_at_limit() {
        let graph = Graph::new()
            .with_node("A", -MAX_COORDINATE, MAX_COORDINATE)
            .with_node("B", MAX_COORDINATE, -MAX_COORDINATE);
        assert_eq!(graph.validate().unwrap().node_count(), 2);
    }

    #[test]
    fn test_validate_accepts_empty_graph() {
        let indexed = Graph::new().validate().unwrap();
        assert_eq!(indexed.node_count(), 0);
        assert_eq!(indexed.edge_count(), 0);
    }

    #[test]
    fn test_index_of_missing_node() {
        let indexed = path_graph().validate().unwrap();
        assert!(indexed.index_of("nope").is_none());
    }

    #[test]
    fn test_edge_accessors() {
        let edge = Edge::new("Blantyre", "Chikwawa");
        assert_eq!(edge.source(), "Blantyre");
        assert_eq!(edge.target(), "Chikwawa");
    }
}
