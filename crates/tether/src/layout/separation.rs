//! Post-simulation pass that nudges apart unrelated nodes.
//!
//! Spring attraction can pull separate clusters back over each other once the
//! main simulation has cooled down. This pass applies a small fixed push to
//! every pair that shares no edge and sits closer than
//! `1.5 × spring_ideal_length`.

use std::{collections::HashSet, f64::consts::TAU};

use rand::Rng;

use tether_core::{geometry::Point, graph::NodeIndex};

/// Distance each node of a crowded pair moves per visit.
const PUSH: f64 = 0.001;

/// Crowding radius as a multiple of the spring rest length.
const CROWDING_FACTOR: f64 = 1.5;

/// Lookup of directly connected node pairs, both orderings stored.
#[derive(Debug, Clone, Default)]
pub(super) struct ConnectedPairs {
    pairs: HashSet<(usize, usize)>,
}

impl ConnectedPairs {
    pub(super) fn from_edges(edges: &[(NodeIndex, NodeIndex)]) -> Self {
        let pairs = edges
            .iter()
            .flat_map(|&(a, b)| [(a.index(), b.index()), (b.index(), a.index())])
            .collect();
        Self { pairs }
    }

    pub(super) fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&(a, b))
    }
}

/// Runs `passes` sweeps over all ordered pairs, updating positions in place.
///
/// Exactly coincident pairs have no displacement direction, so they are
/// pushed along a random unit vector instead.
pub(super) fn separate_unconnected<R: Rng + ?Sized>(
    positions: &mut [Point],
    connected: &ConnectedPairs,
    passes: usize,
    spring_ideal_length: f64,
    rng: &mut R,
) {
    let crowding_distance = spring_ideal_length * CROWDING_FACTOR;
    let n = positions.len();

    for _ in 0..passes {
        for a in 0..n {
            for b in 0..n {
                if a == b || connected.contains(a, b) {
                    continue;
                }

                let delta = positions[a].sub_point(positions[b]);
                let distance = delta.hypot();
                if distance >= crowding_distance {
                    continue;
                }

                let push = if distance > 0.0 {
                    delta.scale(PUSH / distance)
                } else {
                    let angle = rng.random_range(0.0..TAU);
                    Point::new(angle.cos(), angle.sin()).scale(PUSH)
                };

                positions[a] = positions[a].add_point(push);
                positions[b] = positions[b].sub_point(push);
            }
        }
    }
}
