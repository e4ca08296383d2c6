use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    ops::{Bound, RangeBounds},
    path::Path,
};

/// Simulation configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Model parameters.
    pub model: ModelConfig,

    /// Initialization parameters.
    pub init: InitConfig,

    /// Output parameters.
    pub output: OutputConfig,
}

/// Parameters of the motion model.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Side length of the square arena.
    pub arena_size: f64,
    /// Mean speed of the agent.
    pub base_speed: f64,
    /// Time elapsed per step.
    pub time_step: f64,
    /// Standard deviation of the per-step speed multiplier.
    pub speed_std_dev: f64,
}

/// Parameters of the initial condition.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitConfig {
    /// Seed of the random number generator (OS entropy if absent).
    pub seed: Option<u64>,
}

/// Parameters of the simulation output.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Number of steps in a run.
    pub n_steps: usize,
    /// Number of steps between progress reports.
    pub report_interval: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            arena_size: 10.0,
            base_speed: 0.1,
            time_step: 0.1,
            speed_std_dev: 0.1,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            n_steps: 2000,
            report_interval: 100,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// Missing tables and fields take their default values.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.model.validate().context("invalid model config")?;

        check_num(self.output.n_steps, 1..1_000_000).context("invalid number of steps")?;
        check_num(self.output.report_interval, 1..)
            .context("invalid number of steps per report")?;

        Ok(())
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = (Bound::Excluded(0.0), Bound::Excluded(f64::INFINITY));
        check_num(self.arena_size, positive).context("invalid arena size")?;
        check_num(self.base_speed, positive).context("invalid base speed")?;
        check_num(self.time_step, positive).context("invalid time step")?;
        check_num(self.speed_std_dev, 0.0..1.0).context("invalid speed standard deviation")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
