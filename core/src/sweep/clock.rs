use crate::math::angles::wrap_degrees;
use crate::prelude::{SweepError, SweepResult};
use crate::sweep::presets::RotationPresets;
use log::{debug, warn};

/// Rotating beam: current bearing plus the selected rotation preset.
#[derive(Debug, Clone)]
pub struct SweepClock {
    angle_degrees: f64,
    presets: RotationPresets,
    selected: usize,
}

impl SweepClock {
    /// Starts at 0° on the first preset.
    pub fn new(presets: RotationPresets) -> Self {
        Self {
            angle_degrees: 0.0,
            presets,
            selected: 0,
        }
    }

    pub fn with_start_angle(presets: RotationPresets, angle_degrees: f64) -> Self {
        let angle = if angle_degrees.is_finite() {
            wrap_degrees(angle_degrees)
        } else {
            0.0
        };
        Self {
            angle_degrees: angle,
            ..Self::new(presets)
        }
    }

    pub fn current_angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    pub fn rotations_per_minute(&self) -> f64 {
        self.presets.get(self.selected)
    }

    pub fn angular_speed_deg_per_sec(&self) -> f64 {
        self.rotations_per_minute() / 60.0 * 360.0
    }

    /// Selects `rpm` if it is one of the presets; otherwise leaves the rate alone.
    pub fn set_rotation_rate(&mut self, rpm: f64) -> SweepResult<()> {
        match self.presets.position(rpm) {
            Some(index) => {
                self.selected = index;
                Ok(())
            }
            None => Err(SweepError::InvalidConfiguration(format!(
                "{} RPM is not a supported preset (choose from {:?})",
                rpm,
                self.presets.rates()
            ))),
        }
    }

    /// Moves to the next preset, wrapping to the first.
    pub fn toggle_rotation_rate(&mut self) {
        self.selected = (self.selected + 1) % self.presets.len();
        debug!("sweep rate now {} RPM", self.rotations_per_minute());
    }

    /// Rotates the beam by the angle covered in `elapsed_seconds`.
    ///
    /// Negative or non-finite durations are treated as zero.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        let elapsed = if elapsed_seconds.is_finite() && elapsed_seconds >= 0.0 {
            elapsed_seconds
        } else {
            warn!(
                "{}",
                SweepError::DegenerateInput(format!(
                    "elapsed {} clamped to 0",
                    elapsed_seconds
                ))
            );
            0.0
        };
        if elapsed == 0.0 {
            return;
        }
        self.angle_degrees =
            wrap_degrees(self.angle_degrees + self.angular_speed_deg_per_sec() * elapsed);
    }
}

impl Default for SweepClock {
    fn default() -> Self {
        Self::new(RotationPresets::default())
    }
}
