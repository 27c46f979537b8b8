use serde::{Deserialize, Serialize};

/// Reference rotation presets of the sweep, in rotations per minute.
pub const DEFAULT_RPM_PRESETS: [f64; 2] = [13.5, 27.0];
/// Reference host cadence: one tick every 50ms.
pub const REFERENCE_TICK_SECONDS: f64 = 0.05;

/// When a fully faded target receives a new bearing and range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepositionPolicy {
    /// Only on the tick where opacity transitions from visible to exactly zero.
    #[default]
    OnExpiry,
    /// On every tick the target ends at zero opacity, so unseen targets drift.
    WhileExpired,
}

/// How the fade step relates to elapsed time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum FadeTiming {
    /// `fade_step` is removed once per tick, whatever the tick length.
    #[default]
    PerTick,
    /// `fade_step` is the amount removed per `reference_tick_seconds` of
    /// elapsed time, so fades last the same wall-clock time at any cadence.
    PerSecond { reference_tick_seconds: f64 },
}

/// Tuning for the target fade/reveal state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetFieldSettings {
    pub fade_step: f64,
    pub hit_threshold_degrees: f64,
    pub bearing_jitter_radians: f64,
    pub range_min: f64,
    pub range_max: f64,
    pub reposition: RepositionPolicy,
    pub timing: FadeTiming,
}

impl Default for TargetFieldSettings {
    fn default() -> Self {
        Self {
            fade_step: 0.05,
            hit_threshold_degrees: 2.0,
            bearing_jitter_radians: 0.1,
            range_min: 10.0,
            range_max: 100.0,
            reposition: RepositionPolicy::OnExpiry,
            timing: FadeTiming::PerTick,
        }
    }
}

impl TargetFieldSettings {
    pub fn validate(&self) -> SweepResult<()> {
        if !self.fade_step.is_finite() || self.fade_step <= 0.0 || self.fade_step > 1.0 {
            return Err(SweepError::InvalidConfiguration(format!(
                "fade step {} outside (0, 1]",
                self.fade_step
            )));
        }
        if !self.hit_threshold_degrees.is_finite() || self.hit_threshold_degrees <= 0.0 {
            return Err(SweepError::InvalidConfiguration(format!(
                "hit threshold {} must be positive",
                self.hit_threshold_degrees
            )));
        }
        if !self.bearing_jitter_radians.is_finite() || self.bearing_jitter_radians < 0.0 {
            return Err(SweepError::InvalidConfiguration(format!(
                "bearing jitter {} must be non-negative",
                self.bearing_jitter_radians
            )));
        }
        if !self.range_min.is_finite()
            || !self.range_max.is_finite()
            || self.range_min < 0.0
            || self.range_min > self.range_max
        {
            return Err(SweepError::InvalidConfiguration(format!(
                "range domain [{}, {}] is not valid",
                self.range_min, self.range_max
            )));
        }
        if let FadeTiming::PerSecond {
            reference_tick_seconds,
        } = self.timing
        {
            if !reference_tick_seconds.is_finite() || reference_tick_seconds <= 0.0 {
                return Err(SweepError::InvalidConfiguration(format!(
                    "reference tick {} must be positive",
                    reference_tick_seconds
                )));
            }
        }
        Ok(())
    }
}

/// Everything needed to build a [`crate::session::SweepSession`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepSettings {
    pub target_count: usize,
    pub rpm_presets: Vec<f64>,
    pub start_angle_degrees: f64,
    pub field: TargetFieldSettings,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            target_count: 10,
            rpm_presets: DEFAULT_RPM_PRESETS.to_vec(),
            start_angle_degrees: 0.0,
            field: TargetFieldSettings::default(),
        }
    }
}

/// Common error type for the sweep core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

pub type SweepResult<T> = Result<T, SweepError>;

/// Source of uniform samples for target placement.
pub trait RandomSource {
    /// Uniform sample in `[min, max)`. Returns `min` when the interval is empty.
    fn uniform_float(&mut self, min: f64, max: f64) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform_float(&mut self, min: f64, max: f64) -> f64 {
        (**self).uniform_float(min, max)
    }
}
