use crate::math::angles::angular_distance_degrees;
use crate::prelude::{
    FadeTiming, RandomSource, RepositionPolicy, SweepResult, TargetFieldSettings,
};
use crate::targets::target::Target;
use log::debug;

/// Remainders below this fraction of one fade step are treated as fully faded.
const FADE_SNAP_FRACTION: f64 = 1e-9;

/// Counts produced by one [`TargetField::update`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    pub hits: usize,
    pub repositions: usize,
}

/// Builds `count` invisible targets spread uniformly over the display.
pub fn generate_targets<R: RandomSource + ?Sized>(
    count: usize,
    settings: &TargetFieldSettings,
    rng: &mut R,
) -> Vec<Target> {
    (0..count).map(|_| Target::random(settings, rng)).collect()
}

/// Fixed-size set of targets and the reveal/fade/reposition rules applied to them.
#[derive(Debug, Clone)]
pub struct TargetField {
    targets: Vec<Target>,
    settings: TargetFieldSettings,
}

impl TargetField {
    pub fn generate<R: RandomSource + ?Sized>(
        count: usize,
        settings: TargetFieldSettings,
        rng: &mut R,
    ) -> SweepResult<Self> {
        settings.validate()?;
        let targets = generate_targets(count, &settings, rng);
        debug!("generated {} targets", targets.len());
        Ok(Self { targets, settings })
    }

    /// Wraps an explicit target list, clamping ranges into the configured domain.
    pub fn from_targets(targets: Vec<Target>, settings: TargetFieldSettings) -> SweepResult<Self> {
        settings.validate()?;
        let targets = targets
            .into_iter()
            .map(|target| Target {
                range_units: target.range_units.clamp(settings.range_min, settings.range_max),
                ..Target::new(target.bearing_radians, target.range_units, target.opacity)
            })
            .collect();
        Ok(Self { targets, settings })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_visible()).count()
    }

    /// Opacity removed from a visible target this tick.
    fn fade_amount(&self, elapsed_seconds: f64) -> f64 {
        match self.settings.timing {
            FadeTiming::PerTick => self.settings.fade_step,
            FadeTiming::PerSecond {
                reference_tick_seconds,
            } => self.settings.fade_step * (elapsed_seconds.max(0.0) / reference_tick_seconds),
        }
    }

    /// Runs fade, hit, and reposition for every target against the sweep bearing.
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        sweep_angle_degrees: f64,
        elapsed_seconds: f64,
        rng: &mut R,
    ) -> FieldUpdate {
        let step = self.fade_amount(elapsed_seconds);
        let mut summary = FieldUpdate::default();

        for target in &mut self.targets {
            let was_visible = target.is_visible();

            if was_visible && step > 0.0 {
                let next = target.opacity - step;
                target.opacity = if next <= step * FADE_SNAP_FRACTION {
                    0.0
                } else {
                    next
                };
            }

            let distance = angular_distance_degrees(sweep_angle_degrees, target.bearing_degrees());
            if distance < self.settings.hit_threshold_degrees {
                target.opacity = 1.0;
                summary.hits += 1;
            }

            let expired = target.opacity == 0.0;
            let reposition = match self.settings.reposition {
                RepositionPolicy::OnExpiry => expired && was_visible,
                RepositionPolicy::WhileExpired => expired,
            };
            if reposition {
                target.reposition(&self.settings, rng);
                summary.repositions += 1;
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::random::{ScriptedRandom, SeededRandom};
    use proptest::prelude::*;

    fn single(bearing_degrees: f64, opacity: f64) -> TargetField {
        TargetField::from_targets(
            vec![Target::new(bearing_degrees.to_radians(), 50.0, opacity)],
            TargetFieldSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn generated_targets_start_invisible_in_bounds() {
        let mut rng = SeededRandom::new(3);
        let field = TargetField::generate(64, TargetFieldSettings::default(), &mut rng).unwrap();
        assert_eq!(field.len(), 64);
        for target in field.targets() {
            assert_eq!(target.opacity, 0.0);
            assert!((10.0..=100.0).contains(&target.range_units));
            assert!((0.0..std::f64::consts::TAU).contains(&target.bearing_radians));
        }
    }

    #[test]
    fn empty_field_is_valid() {
        let mut rng = SeededRandom::new(0);
        let mut field = TargetField::generate(0, TargetFieldSettings::default(), &mut rng).unwrap();
        assert!(field.is_empty());
        assert_eq!(field.update(0.0, 0.05, &mut rng), FieldUpdate::default());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut rng = SeededRandom::new(0);
        let settings = TargetFieldSettings {
            hit_threshold_degrees: -1.0,
            ..Default::default()
        };
        assert!(TargetField::generate(4, settings, &mut rng).is_err());
    }

    #[test]
    fn visible_count_tracks_lit_targets() {
        let mut field = TargetField::from_targets(
            vec![
                Target::new(0.0, 20.0, 0.0),
                Target::new(std::f64::consts::PI, 40.0, 0.5),
                Target::new(1.0, 60.0, 0.0),
            ],
            TargetFieldSettings::default(),
        )
        .unwrap();
        assert_eq!(field.visible_count(), 1);
        let mut rng = ScriptedRandom::midpoint();
        // beam on north lights the first target
        field.update(0.5, 0.05, &mut rng);
        assert_eq!(field.visible_count(), 2);
    }

    #[test]
    fn hit_overrides_decay() {
        let mut field = single(90.0, 0.3);
        let mut rng = ScriptedRandom::midpoint();
        let summary = field.update(89.0, 0.05, &mut rng);
        assert_eq!(summary.hits, 1);
        assert_eq!(field.targets()[0].opacity, 1.0);
    }

    #[test]
    fn hit_detection_crosses_north() {
        // sweep lands on 1° while the target sits at 0°
        let mut field = single(0.0, 0.0);
        let mut rng = ScriptedRandom::midpoint();
        field.update(1.0, 0.05, &mut rng);
        assert_eq!(field.targets()[0].opacity, 1.0);

        let mut field = single(0.0, 0.0);
        field.update(359.0, 0.05, &mut rng);
        assert_eq!(field.targets()[0].opacity, 1.0);
    }

    #[test]
    fn sweep_outside_threshold_does_not_reveal() {
        let mut field = single(0.0, 0.6);
        let mut rng = ScriptedRandom::midpoint();
        let summary = field.update(8.0, 0.05, &mut rng);
        assert_eq!(summary.hits, 0);
        assert!((field.targets()[0].opacity - 0.55).abs() < 1e-12);
    }

    #[test]
    fn exact_threshold_is_not_a_hit() {
        let mut field = single(0.0, 0.0);
        let mut rng = ScriptedRandom::midpoint();
        field.update(2.0, 0.05, &mut rng);
        assert_eq!(field.targets()[0].opacity, 0.0);
    }

    #[test]
    fn fade_reaches_zero_after_twenty_ticks_and_repositions_once() {
        let mut field = single(180.0, 1.0);
        let mut rng = ScriptedRandom::new(vec![0.25, 0.75]);
        let original = field.targets()[0];
        let mut previous = original.opacity;

        for tick in 1..=20 {
            let summary = field.update(0.0, 0.05, &mut rng);
            let target = field.targets()[0];
            assert!(target.opacity <= previous);
            previous = target.opacity;
            if tick < 20 {
                assert!(target.opacity > 0.0, "expired early at tick {}", tick);
                assert_eq!(summary.repositions, 0);
                assert_eq!(target.bearing_radians, original.bearing_radians);
                assert_eq!(target.range_units, original.range_units);
            } else {
                assert_eq!(target.opacity, 0.0);
                assert_eq!(summary.repositions, 1);
            }
        }

        let moved = field.targets()[0];
        // jitter 0.25 -> -0.05 rad, range 0.75 -> 77.5
        assert!((moved.bearing_radians - (original.bearing_radians - 0.05)).abs() < 1e-12);
        assert!((moved.range_units - 77.5).abs() < 1e-12);

        for _ in 0..10 {
            let summary = field.update(0.0, 0.05, &mut rng);
            assert_eq!(summary.repositions, 0);
        }
        assert_eq!(field.targets()[0], moved);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn while_expired_policy_drifts_hidden_targets() {
        let settings = TargetFieldSettings {
            reposition: RepositionPolicy::WhileExpired,
            ..Default::default()
        };
        let mut field = TargetField::from_targets(
            vec![Target::new(std::f64::consts::PI, 50.0, 0.0)],
            settings,
        )
        .unwrap();
        let mut rng = ScriptedRandom::new(vec![1.0, 0.0]);
        let summary = field.update(0.0, 0.05, &mut rng);
        assert_eq!(summary.repositions, 1);
        assert!((field.targets()[0].bearing_radians - (std::f64::consts::PI + 0.1)).abs() < 1e-12);
        assert_eq!(field.targets()[0].range_units, 10.0);
    }

    #[test]
    fn on_expiry_policy_leaves_unrevealed_targets_alone() {
        let mut field = single(200.0, 0.0);
        let before = field.targets()[0];
        let mut rng = ScriptedRandom::midpoint();
        for _ in 0..5 {
            field.update(0.0, 0.05, &mut rng);
        }
        assert_eq!(field.targets()[0], before);
    }

    #[test]
    fn per_second_timing_scales_fade_with_elapsed_time() {
        let settings = TargetFieldSettings {
            timing: FadeTiming::PerSecond {
                reference_tick_seconds: 0.05,
            },
            ..Default::default()
        };
        let mut field =
            TargetField::from_targets(vec![Target::new(3.0, 50.0, 1.0)], settings).unwrap();
        let mut rng = ScriptedRandom::midpoint();
        // 0.1s at 0.05 per 0.05s removes 0.1
        field.update(0.0, 0.1, &mut rng);
        assert!((field.targets()[0].opacity - 0.9).abs() < 1e-12);
        field.update(0.0, 0.0, &mut rng);
        assert!((field.targets()[0].opacity - 0.9).abs() < 1e-12);
    }

    #[test]
    fn awkward_fade_step_still_expires_on_schedule() {
        let settings = TargetFieldSettings {
            fade_step: 0.1,
            ..Default::default()
        };
        let mut field =
            TargetField::from_targets(vec![Target::new(3.0, 50.0, 1.0)], settings).unwrap();
        let mut rng = ScriptedRandom::midpoint();
        for _ in 0..10 {
            field.update(0.0, 0.05, &mut rng);
        }
        assert_eq!(field.targets()[0].opacity, 0.0);
    }

    proptest! {
        #[test]
        fn opacity_and_range_stay_bounded(seed in any::<u64>(), count in 0_usize..24) {
            let mut rng = SeededRandom::new(seed);
            let mut field =
                TargetField::generate(count, TargetFieldSettings::default(), &mut rng).unwrap();
            let mut angle = 0.0_f64;
            for _ in 0..200 {
                angle = (angle + 4.05) % 360.0;
                let before: Vec<Target> = field.targets().to_vec();
                field.update(angle, 0.05, &mut rng);
                for (old, new) in before.iter().zip(field.targets()) {
                    prop_assert!((0.0..=1.0).contains(&new.opacity));
                    prop_assert!((10.0..=100.0).contains(&new.range_units));
                    let moved = old.bearing_radians != new.bearing_radians
                        || old.range_units != new.range_units;
                    if moved {
                        prop_assert!(old.opacity > 0.0);
                        prop_assert_eq!(new.opacity, 0.0);
                    }
                }
            }
        }
    }
}
