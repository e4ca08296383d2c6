use crate::model::{Position, Trajectory};
#[cfg(test)]
use std::cell::Cell;

#[cfg(test)]
thread_local! {
    /// Number of times statistics were computed on this thread.
    pub static N_COMPUTED: Cell<usize> = const { Cell::new(0) };
}

/// Aggregate metrics over the recorded trajectory.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Stats {
    /// Length of the path travelled so far.
    pub total_distance: f64,
    /// Mean of all recorded speeds.
    pub avg_speed: f64,
    /// Number of recorded positions lying on the arena boundary.
    pub collisions: usize,
}

impl Stats {
    /// Compute the statistics of a trajectory from scratch.
    pub fn from_trajectory(trajectory: &Trajectory, arena_size: f64) -> Self {
        #[cfg(test)]
        N_COMPUTED.with(|n| n.set(n.get() + 1));

        Self {
            total_distance: compute_path_length(trajectory.positions()),
            avg_speed: compute_mean(trajectory.speeds()),
            collisions: count_boundary_hits(trajectory.positions(), arena_size),
        }
    }
}

fn compute_path_length(positions: &[Position]) -> f64 {
    positions
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

// Counts every recorded position on (or past) the boundary, not collision steps.
fn count_boundary_hits(positions: &[Position], arena_size: f64) -> usize {
    let on_boundary = |c: f64| c <= 0.0 || c >= arena_size;
    positions
        .iter()
        .filter(|pos| on_boundary(pos.x) || on_boundary(pos.y))
        .count()
}
