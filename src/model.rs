//! Simulation data types.

/// Point in the arena.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Recorded history of the agent.
///
/// Positions and realized speeds are stored side by side and can only be
/// appended together, so both sequences always have the same length.
#[derive(Debug, Clone)]
pub struct Trajectory {
    positions: Vec<Position>,
    speeds: Vec<f64>,
}

impl Trajectory {
    /// Create a trajectory holding a single initial entry.
    pub fn new(position: Position, speed: f64) -> Self {
        Self {
            positions: vec![position],
            speeds: vec![speed],
        }
    }

    /// Append the position and speed of one step.
    pub fn push(&mut self, position: Position, speed: f64) {
        self.positions.push(position);
        self.speeds.push(speed);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }
}

/// State of the agent at a given step.
#[derive(Debug, Clone)]
pub struct State {
    /// Current position.
    pub position: Position,

    /// Current heading in radians, in `[0, 2π)`.
    pub heading: f64,

    /// Every committed position and realized speed so far.
    pub trajectory: Trajectory,
}
