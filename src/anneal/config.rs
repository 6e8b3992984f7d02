//! Annealing configuration and temperature schedule.

use crate::error::{Result, SeatingError};

/// Configuration for the swap annealer.
///
/// The schedule has `steps - 1` checkpoints `t` evenly spaced over
/// `[1/steps, 1 - 1/steps]`; checkpoint `t` runs at temperature
/// `-temperature_scale * ln(t)`, which falls as `t` rises. Each checkpoint
/// runs `microsteps` swap proposals.
///
/// # Examples
///
/// ```
/// use u_seating::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_steps(64)
///     .with_microsteps(200)
///     .with_temperature_scale(0.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert!(config.clone().with_steps(1).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Schedule resolution. Must be at least 2; yields `steps - 1` checkpoints.
    pub steps: usize,

    /// Swap proposals per checkpoint.
    pub microsteps: usize,

    /// Temperature magnitude `A` in `-A * ln(t)`.
    pub temperature_scale: f64,

    /// Random seed for reproducibility. `None` draws one at run time.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            steps: 1 << 8,
            microsteps: 1 << 10,
            temperature_scale: 0.5,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_microsteps(mut self, microsteps: usize) -> Self {
        self.microsteps = microsteps;
        self
    }

    pub fn with_temperature_scale(mut self, scale: f64) -> Self {
        self.temperature_scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.steps <= 1 {
            return Err(SeatingError::DegenerateSchedule { steps: self.steps });
        }
        if self.microsteps == 0 {
            return Err(SeatingError::InvalidAnnealConfig(
                "microsteps must be positive".into(),
            ));
        }
        if !self.temperature_scale.is_finite() || self.temperature_scale <= 0.0 {
            return Err(SeatingError::InvalidAnnealConfig(format!(
                "temperature_scale must be finite and positive, got {}",
                self.temperature_scale
            )));
        }
        Ok(())
    }

    /// Builds the checkpoint schedule after validating.
    pub fn schedule(&self) -> Result<Schedule> {
        self.validate()?;
        Ok(Schedule::new(self.steps, self.temperature_scale))
    }
}

/// One temperature level of the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub index: usize,
    pub t: f64,
    pub temperature: f64,
}

/// The full, strictly decreasing temperature schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    checkpoints: Vec<Checkpoint>,
}

impl Schedule {
    /// `steps - 1` checkpoints on `[1/steps, 1 - 1/steps]`, both ends
    /// included, so every temperature is finite and strictly positive.
    /// Callers validate `steps >= 2` first.
    fn new(steps: usize, scale: f64) -> Self {
        let count = steps - 1;
        let lo = 1.0 / steps as f64;
        let hi = 1.0 - lo;
        let checkpoints = (0..count)
            .map(|index| {
                let t = if count == 1 {
                    lo
                } else {
                    lo + index as f64 * (hi - lo) / (count - 1) as f64
                };
                Checkpoint {
                    index,
                    t,
                    temperature: -scale * t.ln(),
                }
            })
            .collect();
        Self { checkpoints }
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }
}
