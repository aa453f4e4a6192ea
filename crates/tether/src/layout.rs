//! Force-directed (spring-electrical) layout.
//!
//! Nodes repel each other with an inverse-square force, edges act as Hookean
//! springs around a rest length, and a linearly decaying temperature shrinks
//! both the damping and the largest step a node may take. After the
//! simulation, unconnected nodes that ended up crowded are nudged apart and
//! all coordinates are normalized into the unit square.
//!
//! The force computation is quadratic in the number of nodes.

mod config;
mod engine;
mod forces;
mod normalize;
mod separation;

pub use config::{ConfigError, LayoutConfig};
pub use engine::{
    IterationReport, LayoutEngine, LayoutSummary, Phase, Positions, StopReason,
};
pub use normalize::normalize;
