//! Tether - force-directed graph layout.
//!
//! Computes a 2D layout for a graph with a spring-electrical simulation under
//! a decaying temperature, separates unrelated nodes that ended up crowded,
//! normalizes the result into the unit square, and renders it to SVG.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use tether_core::{color, geometry, graph};

pub use error::TetherError;

use log::{debug, info};

use config::AppConfig;
use export::svg::SvgRenderer;
use geometry::Point;
use graph::Graph;
use layout::{LayoutEngine, LayoutSummary, Positions};

/// Title of the panel showing the input coordinates.
const ORIGINAL_TITLE: &str = "Original Layout";

/// Title of the panel showing the computed layout.
const OPTIMIZED_TITLE: &str = "Optimized Layout";

/// Builder for computing and rendering layouts.
///
/// # Examples
///
/// ```rust
/// use tether::{LayoutBuilder, config::AppConfig, graph::Graph};
///
/// let graph = Graph::new()
///     .with_node("A", 0.0, 0.0)
///     .with_node("B", 1.0, 0.0)
///     .with_edge("A", "B");
///
/// let mut config = AppConfig::default();
/// config.layout_mut().set_seed(Some(42)).set_iterations(100);
///
/// let builder = LayoutBuilder::new(config);
/// let outcome = builder.layout(&graph)?;
/// let svg = builder.render_svg(&graph, &outcome)?;
/// assert!(svg.contains("<svg"));
/// # Ok::<(), tether::TetherError>(())
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate `graph` and compute its layout.
    ///
    /// # Errors
    ///
    /// Returns `TetherError` for invalid graphs or layout configurations.
    pub fn layout(&self, graph: &Graph) -> Result<LayoutOutcome, TetherError> {
        info!(
            node_count = graph.nodes.len(),
            edge_count = graph.edges.len();
            "Computing layout"
        );

        let mut engine = LayoutEngine::new(graph, self.config.layout().clone())?;
        let summary = engine.optimize_layout();
        let positions = engine.into_positions();

        debug!(stop_reason:? = summary.stop_reason; "Layout computed");
        Ok(LayoutOutcome { positions, summary })
    }

    /// Render the computed layout as a single SVG panel.
    ///
    /// # Errors
    ///
    /// Returns `TetherError` for invalid style settings.
    pub fn render_svg(&self, graph: &Graph, outcome: &LayoutOutcome) -> Result<String, TetherError> {
        let renderer = SvgRenderer::new(self.config.style())?;
        let document = renderer.render(&outcome.positions, &graph.edges, Some(OPTIMIZED_TITLE))?;

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }

    /// Render the input coordinates and the computed layout side by side.
    ///
    /// The input coordinates are normalized into the unit square before they
    /// are drawn, rather than plotted as raw values. Both panels then share
    /// the same pixel mapping, and inputs outside `[0, 1]` stay inside the
    /// left panel.
    ///
    /// # Errors
    ///
    /// Returns `TetherError` for invalid style settings.
    pub fn render_comparison_svg(
        &self,
        graph: &Graph,
        outcome: &LayoutOutcome,
    ) -> Result<String, TetherError> {
        let renderer = SvgRenderer::new(self.config.style())?;
        let original = original_positions(graph);
        let document = renderer.render_comparison(
            (&original, ORIGINAL_TITLE),
            (&outcome.positions, OPTIMIZED_TITLE),
            &graph.edges,
        )?;

        info!("Comparison SVG rendered successfully");
        Ok(document.to_string())
    }
}

/// Result of [`LayoutBuilder::layout`].
#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    positions: Positions,
    summary: LayoutSummary,
}

impl LayoutOutcome {
    /// Final identifier → position mapping in the unit square.
    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// How the simulation ended.
    pub fn summary(&self) -> LayoutSummary {
        self.summary
    }
}

fn original_positions(graph: &Graph) -> Positions {
    let mut points: Vec<Point> = graph.nodes.iter().map(|node| node.position()).collect();
    layout::normalize(&mut points);
    graph
        .nodes
        .iter()
        .map(|node| node.id.clone())
        .zip(points)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_positions_are_normalized_for_display() {
        let graph = Graph::new()
            .with_node("A", -4.0, 10.0)
            .with_node("B", 6.0, 30.0)
            .with_node("C", 1.0, 20.0);

        let original = original_positions(&graph);

        assert_eq!(
            original.keys().map(String::as_str).collect::<Vec<_>>(),
            ["A", "B", "C"]
        );
        assert_eq!(original["A"], Point::new(0.0, 0.0));
        assert_eq!(original["B"], Point::new(1.0, 1.0));
        assert_eq!(original["C"], Point::new(0.5, 0.5));
    }
}
