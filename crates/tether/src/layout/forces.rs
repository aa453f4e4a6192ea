//! Force laws and the clamped integration step.
//!
//! All functions work on the node arena: `positions[i]` and `forces[i]`
//! belong to the node with [`NodeIndex::index`] `i`.

use rand::Rng;

use tether_core::{geometry::Point, graph::NodeIndex};

use super::LayoutConfig;

/// Half-width of the jitter added to each displacement axis of a near-coincident pair.
const JITTER: f64 = 0.005;

/// Distance floor of the spring force.
const SPRING_DISTANCE_FLOOR: f64 = 0.001;

/// Largest step a node may take at temperature 1.0.
const MAX_STEP: f64 = 0.1;

/// Annealing state of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Schedule {
    temperature: f64,
    damping: f64,
    max_step: f64,
}

impl Schedule {
    /// Linear decay from 1.0 at step 0 towards 0.0 at the last step.
    pub(super) fn at(step: usize, iterations: usize, damping_factor: f64) -> Self {
        let temperature = 1.0 - step as f64 / iterations as f64;
        Self {
            temperature,
            damping: damping_factor * temperature,
            max_step: MAX_STEP * temperature,
        }
    }

    pub(super) fn temperature(self) -> f64 {
        self.temperature
    }
}

/// How far the nodes moved during one integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct StepDisplacement {
    pub(super) total: f64,
    pub(super) max: f64,
}

/// Adds the inverse-square repulsion of every ordered pair to the first node
/// of the pair.
///
/// Pairs closer than `minimum_node_distance` use the floor as their distance
/// and get a random jitter on the displacement so coincident nodes still push
/// in some direction.
pub(super) fn accumulate_repulsion<R: Rng + ?Sized>(
    positions: &[Point],
    config: &LayoutConfig,
    rng: &mut R,
    forces: &mut [Point],
) {
    let strength = config.repulsion_strength();
    let floor = config.minimum_node_distance();

    for (a, &pos_a) in positions.iter().enumerate() {
        for (b, &pos_b) in positions.iter().enumerate() {
            if a == b {
                continue;
            }

            let mut delta = pos_a.sub_point(pos_b);
            let mut distance = delta.hypot();

            if distance < floor {
                distance = floor;
                delta = delta.add_point(Point::new(
                    rng.random_range(-JITTER..JITTER),
                    rng.random_range(-JITTER..JITTER),
                ));
            }

            let magnitude = strength / (distance * distance);
            forces[a] = forces[a].add_point(delta.scale(magnitude / distance));
        }
    }
}

/// Applies the Hookean spring of every edge to both endpoints.
///
/// Stretched springs pull the endpoints together, compressed springs push
/// them apart.
pub(super) fn accumulate_attraction(
    positions: &[Point],
    edges: &[(NodeIndex, NodeIndex)],
    config: &LayoutConfig,
    forces: &mut [Point],
) {
    let spring_constant = config.spring_constant();
    let rest_length = config.spring_ideal_length();

    for &(a, b) in edges {
        let (a, b) = (a.index(), b.index());
        let delta = positions[a].sub_point(positions[b]);
        let distance = delta.hypot().max(SPRING_DISTANCE_FLOOR);

        let magnitude = spring_constant * (distance - rest_length);
        let force = delta.scale(magnitude / distance);

        forces[a] = forces[a].sub_point(force);
        forces[b] = forces[b].add_point(force);
    }
}

/// Moves every node by its damped force, clamped to the schedule's step limit.
pub(super) fn integrate(
    positions: &mut [Point],
    forces: &[Point],
    schedule: Schedule,
) -> StepDisplacement {
    let mut displacement = StepDisplacement::default();

    for (position, force) in positions.iter_mut().zip(forces) {
        let step = force.scale(schedule.damping).clamp_length(schedule.max_step);
        *position = position.add_point(step);

        let length = step.hypot();
        displacement.total += length;
        displacement.max = displacement.max.max(length);
    }

    displacement
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use tether_core::graph::Graph;

    use super::*;

    fn zero_forces(n: usize) -> Vec<Point> {
        vec![Point::default(); n]
    }

    #[test]
    fn test_schedule_decays_linearly() {
        let first = Schedule::at(0, 800, 0.85);
        assert_approx_eq!(f64, first.temperature(), 1.0);
        assert_approx_eq!(f64, first.damping, 0.85);
        assert_approx_eq!(f64, first.max_step, 0.1);

        let half = Schedule::at(400, 800, 0.85);
        assert_approx_eq!(f64, half.temperature(), 0.5);
        assert_approx_eq!(f64, half.damping, 0.425);
        assert_approx_eq!(f64, half.max_step, 0.05);

        let last = Schedule::at(799, 800, 0.85);
        assert!(last.temperature() > 0.0);
    }

    #[test]
    fn test_repulsion_inverse_square() {
        let positions = [Point::new(0.0, 0.0), Point::new(0.5, 0.0)];
        let mut forces = zero_forces(2);
        let mut rng = StdRng::seed_from_u64(0);

        accumulate_repulsion(&positions, &LayoutConfig::default(), &mut rng, &mut forces);

        // 0.08 / 0.5^2 = 0.32, pushing the nodes apart along x.
        assert_approx_eq!(f64, forces[0].x(), -0.32, epsilon = 1e-12);
        assert_approx_eq!(f64, forces[0].y(), 0.0);
        assert_approx_eq!(f64, forces[1].x(), 0.32, epsilon = 1e-12);
        assert_approx_eq!(f64, forces[1].y(), 0.0);
    }

    #[test]
    fn test_repulsion_coincident_nodes_stay_finite() {
        let positions = [Point::new(0.3, 0.3), Point::new(0.3, 0.3)];
        let mut forces = zero_forces(2);
        let mut rng = StdRng::seed_from_u64(42);

        accumulate_repulsion(&positions, &LayoutConfig::default(), &mut rng, &mut forces);

        for force in &forces {
            assert!(force.is_finite());
        }
        // Jitter of at most 0.005 per axis over the 0.03 floor, scaled by 0.08 / 0.03^3.
        let bound = 0.005 * 2f64.sqrt() * 0.08 / 0.03f64.powi(3);
        assert!(forces[0].hypot() <= bound + 1e-9);
    }

    #[test]
    fn test_attraction_pulls_stretched_spring_together() {
        let graph = Graph::new()
            .with_node("A", 0.0, 0.0)
            .with_node("B", 1.0, 0.0)
            .with_edge("A", "B")
            .validate()
            .unwrap();
        let mut forces = zero_forces(2);

        accumulate_attraction(
            graph.initial_positions(),
            graph.edges(),
            &LayoutConfig::default(),
            &mut forces,
        );

        // 0.04 * (1.0 - 0.2) = 0.032 towards each other.
        assert_approx_eq!(f64, forces[0].x(), 0.032, epsilon = 1e-12);
        assert_approx_eq!(f64, forces[1].x(), -0.032, epsilon = 1e-12);
    }

    #[test]
    fn test_attraction_pushes_compressed_spring_apart() {
        let graph = Graph::new()
            .with_node("A", 0.0, 0.0)
            .with_node("B", 0.1, 0.0)
            .with_edge("A", "B")
            .validate()
            .unwrap();
        let mut forces = zero_forces(2);

        accumulate_attraction(
            graph.initial_positions(),
            graph.edges(),
            &LayoutConfig::default(),
            &mut forces,
        );

        assert!(forces[0].x() < 0.0);
        assert!(forces[1].x() > 0.0);
        assert_approx_eq!(f64, forces[0].x(), -0.004, epsilon = 1e-12);
    }

    #[test]
    fn test_attraction_coincident_endpoints_yield_zero_force() {
        let graph = Graph::new()
            .with_node("A", 0.5, 0.5)
            .with_node("B", 0.5, 0.5)
            .with_edge("A", "B")
            .validate()
            .unwrap();
        let mut forces = zero_forces(2);

        accumulate_attraction(
            graph.initial_positions(),
            graph.edges(),
            &LayoutConfig::default(),
            &mut forces,
        );

        assert!(forces.iter().all(|f| f.is_finite() && f.is_zero()));
    }

    #[test]
    fn test_integrate_clamps_large_steps() {
        let mut positions = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let forces = vec![Point::new(100.0, 0.0), Point::new(0.01, 0.0)];
        let schedule = Schedule::at(0, 10, 1.0);

        let displacement = integrate(&mut positions, &forces, schedule);

        assert_approx_eq!(f64, positions[0].x(), 0.1);
        assert_approx_eq!(f64, positions[1].x(), 1.01, epsilon = 1e-12);
        assert_approx_eq!(f64, displacement.max, 0.1);
        assert_approx_eq!(f64, displacement.total, 0.11, epsilon = 1e-12);
    }

    #[test]
    fn test_integrate_applies_damping() {
        let mut positions = vec![Point::new(0.0, 0.0)];
        let forces = vec![Point::new(0.0, 0.02)];
        let schedule = Schedule::at(5, 10, 0.8);

        integrate(&mut positions, &forces, schedule);

        // damping 0.8 * 0.5 = 0.4, max step 0.05
        assert_approx_eq!(f64, positions[0].y(), 0.008, epsilon = 1e-12);
    }
}
