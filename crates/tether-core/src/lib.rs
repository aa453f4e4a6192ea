//! Core types for the Tether force-directed layout engine.
//!
//! This crate holds the data model shared by the layout engine, the SVG
//! exporter and the command-line tool: the graph input model with its
//! validated index-based form, 2D geometry, and color parsing.

pub mod color;
pub mod geometry;
pub mod graph;
