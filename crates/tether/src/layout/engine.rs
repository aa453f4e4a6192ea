//! The force-directed layout engine.
//!
//! [`LayoutEngine`] owns the node arena for one layout run. A run moves
//! through the phases
//!
//! ```text
//! Initialized ──► Simulating ──► Separating ──► Normalized
//! ```
//!
//! inside a single call to [`LayoutEngine::optimize_layout`]. Consuming the
//! engine with [`LayoutEngine::into_positions`] finalizes the result.

use std::ops::ControlFlow;

use indexmap::IndexMap;
use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use tether_core::{
    geometry::Point,
    graph::{Graph, IndexedGraph},
};

use super::{
    LayoutConfig,
    forces::{self, Schedule},
    normalize::normalize,
    separation::{ConnectedPairs, separate_unconnected},
};
use crate::TetherError;

/// Final mapping from node identifier to position, in node declaration order.
pub type Positions = IndexMap<String, Point>;

/// Phase of a [`LayoutEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Positions hold the input coordinates
    Initialized,
    /// The annealing loop is running
    Simulating,
    /// Unconnected pairs are being pushed apart
    Separating,
    /// Positions are normalized into the unit square
    Normalized,
}

/// Progress information passed to the control callback after every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// Zero-based index of the step that just finished
    pub step: usize,
    /// Temperature the step ran at
    pub temperature: f64,
    /// Sum of the distances moved by all nodes during the step
    pub total_displacement: f64,
    /// Largest distance moved by a single node during the step
    pub max_displacement: f64,
}

/// Why the simulation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All configured iterations ran
    Completed,
    /// A step moved the nodes less than the convergence threshold
    Converged,
    /// The control callback asked to stop
    Cancelled,
}

/// Summary of one [`LayoutEngine::optimize_layout`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSummary {
    /// Number of simulation steps actually run
    pub iterations_run: usize,
    /// Why the simulation loop ended
    pub stop_reason: StopReason,
}

/// Force-directed layout engine.
///
/// The random source `R` only feeds the jitter applied to near-coincident
/// nodes. Inject a seeded generator with [`LayoutEngine::with_rng`] for
/// reproducible runs.
///
/// # Examples
///
/// ```
/// use tether::{graph::Graph, layout::{LayoutConfig, LayoutEngine}};
///
/// let graph = Graph::new()
///     .with_node("A", 0.0, 0.0)
///     .with_node("B", 1.0, 0.0)
///     .with_node("C", 0.5, 1.0)
///     .with_edge("A", "B")
///     .with_edge("B", "C");
///
/// let mut config = LayoutConfig::default();
/// config.set_seed(Some(1));
///
/// let mut engine = LayoutEngine::new(&graph, config)?;
/// engine.optimize_layout();
///
/// let positions = engine.optimized_positions();
/// assert!(positions.values().all(|p| (0.0..=1.0).contains(&p.x())));
/// # Ok::<(), tether::TetherError>(())
/// ```
#[derive(Debug)]
pub struct LayoutEngine<R = StdRng> {
    graph: IndexedGraph,
    config: LayoutConfig,
    connected: ConnectedPairs,
    positions: Vec<Point>,
    rng: R,
    phase: Phase,
}

impl LayoutEngine<StdRng> {
    /// Creates an engine with a [`StdRng`] seeded from [`LayoutConfig::seed`],
    /// or from the operating system when no seed is configured.
    ///
    /// # Errors
    ///
    /// Returns [`TetherError::Graph`] if the graph is structurally invalid and
    /// [`TetherError::Config`] if the configuration is out of range.
    pub fn new(graph: &Graph, config: LayoutConfig) -> Result<Self, TetherError> {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(graph, config, rng)
    }
}

impl<R: Rng> LayoutEngine<R> {
    /// Creates an engine that draws its jitter from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutEngine::new`].
    pub fn with_rng(graph: &Graph, config: LayoutConfig, rng: R) -> Result<Self, TetherError> {
        config.validate()?;
        let graph = graph.validate()?;
        Ok(Self::from_indexed(graph, config, rng))
    }

    fn from_indexed(graph: IndexedGraph, config: LayoutConfig, rng: R) -> Self {
        let positions = graph.initial_positions().to_vec();
        let connected = ConnectedPairs::from_edges(graph.edges());

        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count();
            "Layout engine initialized"
        );

        Self {
            graph,
            config,
            connected,
            positions,
            rng,
            phase: Phase::Initialized,
        }
    }

    /// Runs the full schedule: simulation, separation, normalization.
    ///
    /// Calling this again re-runs the whole schedule starting from the
    /// current (already normalized) positions.
    pub fn optimize_layout(&mut self) -> LayoutSummary {
        self.optimize_layout_with(|_| ControlFlow::Continue(()))
    }

    /// Runs the full schedule, calling `control` after every simulation step.
    ///
    /// Returning [`ControlFlow::Break`] from `control` ends the simulation
    /// loop early. Separation and normalization still run, so the positions
    /// keep their unit-square invariant.
    pub fn optimize_layout_with<F>(&mut self, mut control: F) -> LayoutSummary
    where
        F: FnMut(&IterationReport) -> ControlFlow<()>,
    {
        let iterations = self.config.iterations();
        info!(
            node_count = self.graph.node_count(),
            edge_count = self.graph.edge_count(),
            iterations;
            "Starting force simulation"
        );

        self.phase = Phase::Simulating;
        let mut summary = LayoutSummary {
            iterations_run: iterations,
            stop_reason: StopReason::Completed,
        };

        for step in 0..iterations {
            let report = self.step(step);
            trace!(
                step,
                temperature = report.temperature,
                total_displacement = report.total_displacement;
                "Simulation step"
            );

            let stop_reason = if control(&report).is_break() {
                Some(StopReason::Cancelled)
            } else if self
                .config
                .convergence_threshold()
                .is_some_and(|threshold| report.total_displacement < threshold)
            {
                Some(StopReason::Converged)
            } else {
                None
            };

            if let Some(stop_reason) = stop_reason {
                summary = LayoutSummary {
                    iterations_run: step + 1,
                    stop_reason,
                };
                break;
            }
        }

        debug!(
            iterations_run = summary.iterations_run,
            stop_reason:? = summary.stop_reason;
            "Force simulation finished"
        );

        self.phase = Phase::Separating;
        separate_unconnected(
            &mut self.positions,
            &self.connected,
            self.config.separation_passes(),
            self.config.spring_ideal_length(),
            &mut self.rng,
        );
        debug!(passes = self.config.separation_passes(); "Separated unconnected nodes");

        normalize(&mut self.positions);
        self.phase = Phase::Normalized;

        info!(iterations_run = summary.iterations_run; "Layout optimized");
        summary
    }

    /// One annealing step. The force accumulator lives only inside this call.
    fn step(&mut self, step: usize) -> IterationReport {
        let schedule = Schedule::at(step, self.config.iterations(), self.config.damping_factor());
        let mut forces = vec![Point::default(); self.positions.len()];

        forces::accumulate_repulsion(&self.positions, &self.config, &mut self.rng, &mut forces);
        forces::accumulate_attraction(
            &self.positions,
            self.graph.edges(),
            &self.config,
            &mut forces,
        );
        let displacement = forces::integrate(&mut self.positions, &forces, schedule);

        IterationReport {
            step,
            temperature: schedule.temperature(),
            total_displacement: displacement.total,
            max_displacement: displacement.max,
        }
    }
}

impl<R> LayoutEngine<R> {
    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current position of a node
    pub fn position(&self, id: &str) -> Option<Point> {
        self.graph
            .index_of(id)
            .map(|node| self.positions[node.index()])
    }

    /// Returns the current identifier → position mapping without recomputing anything.
    pub fn optimized_positions(&self) -> Positions {
        self.graph
            .ids()
            .map(str::to_string)
            .zip(self.positions.iter().copied())
            .collect()
    }

    /// Consumes the engine and returns the final mapping.
    pub fn into_positions(self) -> Positions {
        self.optimized_positions()
    }
}
