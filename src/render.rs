use crate::model::{Position, Trajectory};
use crate::stats::Stats;
use anyhow::Result;

/// Read-only view of the simulation handed to a renderer after each step.
pub struct Frame<'a> {
    /// Index of the step that produced this frame.
    pub step: usize,
    pub position: Position,
    pub trajectory: &'a Trajectory,
    pub arena_size: f64,
}

impl Frame<'_> {
    /// Compute the movement statistics of the trajectory so far.
    pub fn stats(&self) -> Stats {
        Stats::from_trajectory(self.trajectory, self.arena_size)
    }
}

/// Consumer of simulation frames.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Renderer writing the statistics overlay to the log.
pub struct LogRenderer {
    n_steps: usize,
    report_interval: usize,
    n_frames: usize,
}

impl LogRenderer {
    pub fn new(n_steps: usize, report_interval: usize) -> Self {
        Self {
            n_steps,
            report_interval: report_interval.max(1),
            n_frames: 0,
        }
    }

    fn should_report(&self, step: usize) -> bool {
        (step + 1) % self.report_interval == 0 || step + 1 == self.n_steps
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.n_frames += 1;

        if self.should_report(frame.step) {
            let stats = frame.stats();
            let progress = 100.0 * (frame.step + 1) as f64 / self.n_steps as f64;
            let speed = frame.trajectory.speeds().last().copied().unwrap_or(f64::NAN);
            log::info!(
                "completed {progress:06.2}% | position ({:.3}, {:.3}) | speed {speed:.3} | {}",
                frame.position.x,
                frame.position.y,
                overlay(&stats)
            );
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::info!("rendered {} frames", self.n_frames);
        Ok(())
    }
}

fn overlay(stats: &Stats) -> String {
    format!(
        "distance {:.2} | avg speed {:.3} | collisions {}",
        stats.total_distance, stats.avg_speed, stats.collisions
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::engine::Engine;
    use crate::stats::N_COMPUTED;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder {
        steps: Vec<usize>,
        lens: Vec<usize>,
        finished: bool,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &Frame) -> Result<()> {
            assert_eq!(frame.trajectory.positions().last(), Some(&frame.position));
            assert_eq!(frame.trajectory.speeds().len(), frame.trajectory.len());
            self.steps.push(frame.step);
            self.lens.push(frame.trajectory.len());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    struct Idle;

    impl Renderer for Idle {
        fn draw(&mut self, _frame: &Frame) -> Result<()> {
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            Ok(())
        }
    }

    struct Failing;

    impl Renderer for Failing {
        fn draw(&mut self, _frame: &Frame) -> Result<()> {
            anyhow::bail!("no output");
        }

        fn finish(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn one_frame_per_step() {
        let mut engine = Engine::from_seed(ModelConfig::default(), Some(9)).unwrap();
        let mut recorder = Recorder::default();
        engine.run(50, &mut recorder).unwrap();

        assert_eq!(recorder.steps, (0..50).collect::<Vec<_>>());
        assert_eq!(recorder.lens, (2..52).collect::<Vec<_>>());
        assert!(recorder.finished);
        assert_eq!(engine.trajectory().len(), 51);
    }

    #[test]
    fn renderer_error_stops_the_run() {
        let mut engine = Engine::from_seed(ModelConfig::default(), Some(10)).unwrap();
        assert!(engine.run(10, &mut Failing).is_err());
        assert_eq!(engine.trajectory().len(), 2);
    }

    #[test]
    fn stats_are_not_computed_unless_requested() {
        let mut engine = Engine::from_seed(ModelConfig::default(), Some(12)).unwrap();
        let n_before = N_COMPUTED.with(Cell::get);
        engine.run(1000, &mut Idle).unwrap();
        assert_eq!(N_COMPUTED.with(Cell::get), n_before);
    }

    #[test]
    fn log_renderer_computes_stats_only_when_reporting() {
        let mut engine = Engine::from_seed(ModelConfig::default(), Some(13)).unwrap();
        let mut renderer = LogRenderer::new(25, 10);
        let n_before = N_COMPUTED.with(Cell::get);
        engine.run(25, &mut renderer).unwrap();
        assert_eq!(N_COMPUTED.with(Cell::get), n_before + 3);
        assert_eq!(renderer.n_frames, 25);
    }

    #[test]
    fn reports_on_interval_and_last_step() {
        let renderer = LogRenderer::new(25, 10);
        let reported: Vec<_> = (0..25).filter(|&s| renderer.should_report(s)).collect();
        assert_eq!(reported, vec![9, 19, 24]);
    }

    #[test]
    fn overlay_formats_stats() {
        let stats = Stats {
            total_distance: 12.3456,
            avg_speed: 0.10049,
            collisions: 3,
        };
        assert_eq!(
            overlay(&stats),
            "distance 12.35 | avg speed 0.100 | collisions 3"
        );
    }
}
