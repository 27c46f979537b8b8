use anyhow::{ensure, Context};
use ppicore::prelude::{
    FadeTiming, RepositionPolicy, SweepSettings, TargetFieldSettings, DEFAULT_RPM_PRESETS,
    REFERENCE_TICK_SECONDS,
};
use ppicore::sweep::RotationPresets;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

/// Shortest tick the real-time driver will schedule.
pub const MIN_TICK_SECONDS: f64 = 0.001;

/// Session parameters, loadable from YAML; missing keys take reference values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub target_count: usize,
    pub tick_seconds: f64,
    pub rpm_presets: Vec<f64>,
    pub initial_rpm: Option<f64>,
    pub start_angle_degrees: f64,
    pub fade_step: f64,
    pub hit_threshold_degrees: f64,
    pub bearing_jitter_radians: f64,
    pub range_min: f64,
    pub range_max: f64,
    pub reposition: RepositionPolicy,
    pub timing: FadeTiming,
    pub seed: Option<u64>,
    pub bridge_address: SocketAddr,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let field = TargetFieldSettings::default();
        Self {
            target_count: 10,
            tick_seconds: REFERENCE_TICK_SECONDS,
            rpm_presets: DEFAULT_RPM_PRESETS.to_vec(),
            initial_rpm: None,
            start_angle_degrees: 0.0,
            fade_step: field.fade_step,
            hit_threshold_degrees: field.hit_threshold_degrees,
            bearing_jitter_radians: field.bearing_jitter_radians,
            range_min: field.range_min,
            range_max: field.range_max,
            reposition: field.reposition,
            timing: field.timing,
            seed: None,
            bridge_address: SocketAddr::from(([127, 0, 0, 1], 9000)),
        }
    }
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session config {}", path_ref.display()))?;
        let config: SessionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session config {}", path_ref.display()))?;
        config
            .validate()
            .with_context(|| format!("validating session config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(target_count: usize, seed: Option<u64>) -> Self {
        Self {
            target_count,
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.tick_seconds.is_finite() && self.tick_seconds >= MIN_TICK_SECONDS,
            "tick_seconds must be at least {}, got {}",
            MIN_TICK_SECONDS,
            self.tick_seconds
        );
        RotationPresets::new(self.rpm_presets.clone())?;
        self.to_sweep_settings().field.validate()?;
        Ok(())
    }

    pub fn to_sweep_settings(&self) -> SweepSettings {
        SweepSettings {
            target_count: self.target_count,
            rpm_presets: self.rpm_presets.clone(),
            start_angle_degrees: self.start_angle_degrees,
            field: TargetFieldSettings {
                fade_step: self.fade_step,
                hit_threshold_degrees: self.hit_threshold_degrees,
                bearing_jitter_radians: self.bearing_jitter_radians,
                range_min: self.range_min,
                range_max: self.range_max,
                reposition: self.reposition,
                timing: self.timing,
            },
        }
    }
}
