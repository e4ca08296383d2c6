use crate::config::ModelConfig;
use crate::model::{Position, State, Trajectory};
use crate::render::{Frame, Renderer};
use crate::stats::Stats;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::{Normal, Uniform};
use std::f64::consts::TAU;

/// Lowest speed the agent can move at.
const MIN_SPEED: f64 = 0.05;
/// Highest speed the agent can move at, relative to its base speed.
const MAX_SPEED_FACTOR: f64 = 2.0;

/// Simulation engine.
///
/// Holds the model configuration, the agent state, and the random number
/// generator, and advances the agent one step at a time.
pub struct Engine {
    cfg: ModelConfig,
    state: State,
    rng: ChaCha12Rng,
    speed_dist: Normal<f64>,
    heading_dist: Uniform<f64>,
}

impl Engine {
    /// Create a new `Engine` with the agent at the arena center and a random heading.
    ///
    /// # Errors
    /// Returns an error if the model configuration is invalid.
    pub fn new(cfg: ModelConfig, mut rng: ChaCha12Rng) -> Result<Self> {
        cfg.validate().context("invalid model config")?;

        let speed_dist = Normal::new(1.0, cfg.speed_std_dev)?;
        let heading_dist = Uniform::new(0.0, TAU)?;

        let center = cfg.arena_size / 2.0;
        let position = Position::new(center, center);
        let state = State {
            position,
            heading: heading_dist.sample(&mut rng),
            trajectory: Trajectory::new(position, cfg.base_speed),
        };

        Ok(Self {
            cfg,
            state,
            rng,
            speed_dist,
            heading_dist,
        })
    }

    /// Create a new `Engine` seeded with `seed`, or from OS entropy if `None`.
    pub fn from_seed(cfg: ModelConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng()?,
        };
        Self::new(cfg, rng)
    }

    /// Advance the agent by one step and record the result.
    ///
    /// Returns whether the step hit the arena boundary.
    pub fn step(&mut self) -> bool {
        let base_speed = self.cfg.base_speed;
        let arena_size = self.cfg.arena_size;

        // Lower bound wins if the range is empty.
        let speed = (self.speed_dist.sample(&mut self.rng) * base_speed)
            .min(MAX_SPEED_FACTOR * base_speed)
            .max(MIN_SPEED);

        let heading = self.state.heading;
        let dt = self.cfg.time_step;
        let x = self.state.position.x + speed * heading.cos() * dt;
        let y = self.state.position.y + speed * heading.sin() * dt;

        // Tested on the candidate, so landing exactly on the boundary counts.
        let hits = |c: f64| c <= 0.0 || c >= arena_size;
        let collision = hits(x) || hits(y);

        let position = if collision {
            self.state.heading = self.heading_dist.sample(&mut self.rng);
            Position::new(x.clamp(0.0, arena_size), y.clamp(0.0, arena_size))
        } else {
            Position::new(x, y)
        };

        self.state.position = position;
        self.state.trajectory.push(position, speed);

        collision
    }

    /// Perform `n_steps` steps, handing a frame to `renderer` after each one.
    pub fn run(&mut self, n_steps: usize, renderer: &mut dyn Renderer) -> Result<()> {
        for i_step in 0..n_steps {
            if self.step() {
                log::debug!("collision at step {i_step}: {:?}", self.state.position);
            }

            let frame = Frame {
                step: i_step,
                position: self.state.position,
                trajectory: &self.state.trajectory,
                arena_size: self.cfg.arena_size,
            };
            renderer
                .draw(&frame)
                .with_context(|| format!("failed to draw frame {i_step}"))?;
        }

        renderer.finish().context("failed to finish rendering")?;

        Ok(())
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn heading(&self) -> f64 {
        self.state.heading
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.state.trajectory
    }

    pub fn cfg(&self) -> &ModelConfig {
        &self.cfg
    }

    /// Compute the movement statistics of the whole trajectory.
    pub fn stats(&self) -> Stats {
        Stats::from_trajectory(&self.state.trajectory, self.cfg.arena_size)
    }

    /// Move the agent to `position` with `heading`, restarting its trajectory.
    #[cfg(test)]
    fn place(&mut self, position: Position, heading: f64) {
        self.state = State {
            position,
            heading,
            trajectory: Trajectory::new(position, self.cfg.base_speed),
        };
    }
}
