//! Simulation parameters and their validation.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by [`LayoutConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("iterations must be at least 1")]
    ZeroIterations,

    #[error("{parameter} must be a finite number, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("{parameter} must not be negative, got {value}")]
    Negative { parameter: &'static str, value: f64 },

    #[error("{parameter} must be greater than zero, got {value}")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error(
        "minimum_node_distance ({minimum_node_distance}) must be smaller than \
         spring_ideal_length ({spring_ideal_length})"
    )]
    MinimumDistanceTooLarge {
        minimum_node_distance: f64,
        spring_ideal_length: f64,
    },
}

/// Parameters of the force simulation.
///
/// Every field has a default, so a partial
/// TOML table such as `[layout]\niterations = 200` is enough to override a
/// single value.
///
/// | Field | Default |
/// |-------|---------|
/// | `iterations` | 800 |
/// | `repulsion_strength` | 0.08 |
/// | `attraction_strength` | 0.02 |
/// | `edge_attraction_weight` | 2.0 |
/// | `spring_ideal_length` | 0.2 |
/// | `damping_factor` | 0.85 |
/// | `minimum_node_distance` | 0.03 |
/// | `separation_passes` | 100 |
/// | `convergence_threshold` | `None` |
/// | `seed` | `None` |
///
/// # Examples
///
/// ```
/// # use tether::layout::LayoutConfig;
/// let mut config = LayoutConfig::default();
/// config.set_iterations(200).set_seed(Some(7));
///
/// assert_eq!(config.iterations(), 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    iterations: usize,
    repulsion_strength: f64,
    attraction_strength: f64,
    edge_attraction_weight: f64,
    spring_ideal_length: f64,
    damping_factor: f64,
    minimum_node_distance: f64,
    separation_passes: usize,
    convergence_threshold: Option<f64>,
    seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 800,
            repulsion_strength: 0.08,
            attraction_strength: 0.02,
            edge_attraction_weight: 2.0,
            spring_ideal_length: 0.2,
            damping_factor: 0.85,
            minimum_node_distance: 0.03,
            separation_passes: 100,
            convergence_threshold: None,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Set the number of annealing steps
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the inverse-square repulsion constant
    pub fn set_repulsion_strength(&mut self, strength: f64) -> &mut Self {
        self.repulsion_strength = strength;
        self
    }

    /// Set the spring constant
    pub fn set_attraction_strength(&mut self, strength: f64) -> &mut Self {
        self.attraction_strength = strength;
        self
    }

    /// Set the multiplier applied to the spring constant
    pub fn set_edge_attraction_weight(&mut self, weight: f64) -> &mut Self {
        self.edge_attraction_weight = weight;
        self
    }

    /// Set the rest length of the springs
    pub fn set_spring_ideal_length(&mut self, length: f64) -> &mut Self {
        self.spring_ideal_length = length;
        self
    }

    /// Set the damping factor applied before temperature scaling
    pub fn set_damping_factor(&mut self, factor: f64) -> &mut Self {
        self.damping_factor = factor;
        self
    }

    /// Set the repulsion distance floor
    pub fn set_minimum_node_distance(&mut self, distance: f64) -> &mut Self {
        self.minimum_node_distance = distance;
        self
    }

    /// Set the number of component-separation passes (0 disables the pass)
    pub fn set_separation_passes(&mut self, passes: usize) -> &mut Self {
        self.separation_passes = passes;
        self
    }

    /// Stop the simulation once a step moves all nodes less than `threshold` in total
    pub fn set_convergence_threshold(&mut self, threshold: Option<f64>) -> &mut Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Seed the jitter random source
    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn repulsion_strength(&self) -> f64 {
        self.repulsion_strength
    }

    pub fn attraction_strength(&self) -> f64 {
        self.attraction_strength
    }

    pub fn edge_attraction_weight(&self) -> f64 {
        self.edge_attraction_weight
    }

    /// Returns the effective spring constant, `attraction_strength × edge_attraction_weight`
    pub fn spring_constant(&self) -> f64 {
        self.attraction_strength * self.edge_attraction_weight
    }

    pub fn spring_ideal_length(&self) -> f64 {
        self.spring_ideal_length
    }

    pub fn damping_factor(&self) -> f64 {
        self.damping_factor
    }

    pub fn minimum_node_distance(&self) -> f64 {
        self.minimum_node_distance
    }

    pub fn separation_passes(&self) -> usize {
        self.separation_passes
    }

    pub fn convergence_threshold(&self) -> Option<f64> {
        self.convergence_threshold
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Rejects configurations that would produce a degenerate layout.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking iterations, then
    /// finiteness and sign of every real parameter, then the relation between
    /// `minimum_node_distance` and `spring_ideal_length`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        let non_negative = [
            ("repulsion_strength", self.repulsion_strength),
            ("attraction_strength", self.attraction_strength),
            ("edge_attraction_weight", self.edge_attraction_weight),
            ("damping_factor", self.damping_factor),
        ];
        let positive = [
            ("spring_ideal_length", self.spring_ideal_length),
            ("minimum_node_distance", self.minimum_node_distance),
        ];

        for (parameter, value) in non_negative.into_iter().chain(positive) {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { parameter, value });
            }
        }
        for (parameter, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { parameter, value });
            }
        }
        for (parameter, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { parameter, value });
            }
        }

        if self.minimum_node_distance >= self.spring_ideal_length {
            return Err(ConfigError::MinimumDistanceTooLarge {
                minimum_node_distance: self.minimum_node_distance,
                spring_ideal_length: self.spring_ideal_length,
            });
        }

        if let Some(threshold) = self.convergence_threshold {
            let parameter = "convergence_threshold";
            if !threshold.is_finite() {
                return Err(ConfigError::NonFinite {
                    parameter,
                    value: threshold,
                });
            }
            if threshold < 0.0 {
                return Err(ConfigError::Negative {
                    parameter,
                    value: threshold,
                });
            }
        }

        Ok(())
    }
}
