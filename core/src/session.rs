use crate::math::random::SeededRandom;
use crate::ppi_interface::{RenderSnapshot, TargetSnapshot};
use crate::prelude::{RandomSource, SweepError, SweepResult, SweepSettings};
use crate::sweep::{RotationPresets, SweepClock};
use crate::targets::TargetField;
use crate::telemetry::{LogManager, MetricsRecorder, SweepMetrics};

/// Owns one sweep clock and one target field and advances them together.
///
/// Hosts call [`SweepSession::tick`] on their own schedule and hand the returned
/// snapshot to a renderer; nothing else mutates the live state.
pub struct SweepSession {
    clock: SweepClock,
    field: TargetField,
    rng: Box<dyn RandomSource + Send>,
    tick: u64,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl SweepSession {
    pub fn new(settings: SweepSettings, mut rng: Box<dyn RandomSource + Send>) -> SweepResult<Self> {
        let presets = RotationPresets::new(settings.rpm_presets.clone())?;
        let clock = SweepClock::with_start_angle(presets, settings.start_angle_degrees);
        let field = TargetField::generate(settings.target_count, settings.field, &mut rng)?;
        let session = Self::from_parts(clock, field, rng);
        session.logger.record(&format!(
            "session ready: {} targets at {} RPM",
            session.field.len(),
            session.clock.rotations_per_minute()
        ));
        Ok(session)
    }

    pub fn seeded(settings: SweepSettings, seed: u64) -> SweepResult<Self> {
        Self::new(settings, Box::new(SeededRandom::new(seed)))
    }

    /// Assembles a session from prepared components, e.g. a fixed scenario.
    pub fn from_parts(
        clock: SweepClock,
        field: TargetField,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        Self {
            clock,
            field,
            rng,
            tick: 0,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("session"),
        }
    }

    pub fn clock(&self) -> &SweepClock {
        &self.clock
    }

    pub fn field(&self) -> &TargetField {
        &self.field
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn metrics(&self) -> SweepMetrics {
        self.metrics.snapshot()
    }

    /// Advances the sweep by `elapsed_seconds` and updates every target.
    pub fn tick(&mut self, elapsed_seconds: f64) -> RenderSnapshot {
        let elapsed = if elapsed_seconds.is_finite() && elapsed_seconds >= 0.0 {
            elapsed_seconds
        } else {
            self.logger.warning(
                &SweepError::DegenerateInput(format!(
                    "tick elapsed {} treated as 0",
                    elapsed_seconds
                ))
                .to_string(),
            );
            0.0
        };

        self.clock.advance(elapsed);
        let angle = self.clock.current_angle_degrees();
        let update = self.field.update(angle, elapsed, &mut self.rng);
        self.tick += 1;
        self.metrics.record_tick(update.hits, update.repositions);
        if update.hits > 0 || update.repositions > 0 {
            self.logger.detail(&format!(
                "tick {} at {:.2}°: {} hits, {} repositions",
                self.tick, angle, update.hits, update.repositions
            ));
        }

        self.snapshot()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            sweep_angle_degrees: self.clock.current_angle_degrees(),
            rotations_per_minute: self.clock.rotations_per_minute(),
            tick: self.tick,
            targets: self.field.targets().iter().map(TargetSnapshot::from).collect(),
        }
    }

    pub fn toggle_rotation_rate(&mut self) {
        self.clock.toggle_rotation_rate();
        self.logger.record(&format!(
            "rotation rate toggled to {} RPM",
            self.clock.rotations_per_minute()
        ));
    }

    /// Selects a preset rate; unsupported values are rejected and counted.
    pub fn set_rotation_rate(&mut self, rpm: f64) -> SweepResult<()> {
        self.clock.set_rotation_rate(rpm).map_err(|err| {
            self.metrics.record_rejected();
            self.logger.warning(&err.to_string());
            err
        })
    }
}
