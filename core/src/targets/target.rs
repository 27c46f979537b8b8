use crate::math::angles::wrap_radians;
use crate::prelude::{RandomSource, TargetFieldSettings};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Simulated point return on the PPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub bearing_radians: f64,
    pub range_units: f64,
    pub opacity: f64,
}

impl Target {
    pub fn new(bearing_radians: f64, range_units: f64, opacity: f64) -> Self {
        Self {
            bearing_radians: wrap_radians(bearing_radians),
            range_units,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Fresh, invisible target anywhere in the range domain.
    pub fn random<R: RandomSource + ?Sized>(settings: &TargetFieldSettings, rng: &mut R) -> Self {
        let bearing = rng.uniform_float(0.0, TAU);
        let range = rng.uniform_float(settings.range_min, settings.range_max);
        Self::new(bearing, range, 0.0)
    }

    pub fn bearing_degrees(&self) -> f64 {
        self.bearing_radians.to_degrees()
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Nudges the bearing and draws a brand-new range.
    pub(crate) fn reposition<R: RandomSource + ?Sized>(
        &mut self,
        settings: &TargetFieldSettings,
        rng: &mut R,
    ) {
        let jitter = settings.bearing_jitter_radians;
        let offset = rng.uniform_float(-jitter, jitter);
        self.bearing_radians = wrap_radians(self.bearing_radians + offset);
        self.range_units = rng
            .uniform_float(settings.range_min, settings.range_max)
            .clamp(settings.range_min, settings.range_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::random::ScriptedRandom;

    #[test]
    fn new_target_normalizes_inputs() {
        let target = Target::new(-0.5, 40.0, 3.0);
        assert!((target.bearing_radians - (TAU - 0.5)).abs() < 1e-12);
        assert_eq!(target.opacity, 1.0);
    }

    #[test]
    fn reposition_wraps_bearing_below_zero() {
        let settings = TargetFieldSettings::default();
        let mut target = Target::new(0.02, 50.0, 0.0);
        // jitter sample 0.0 maps to -0.1 rad, range sample 0.0 maps to range_min
        let mut rng = ScriptedRandom::new(vec![0.0]);
        target.reposition(&settings, &mut rng);
        assert!((target.bearing_radians - (TAU - 0.08)).abs() < 1e-12);
        assert_eq!(target.range_units, settings.range_min);
    }
}
