use crate::targets::Target;
use serde::{Deserialize, Serialize};

/// Render-facing copy of one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub bearing_radians: f64,
    pub range_units: f64,
    pub opacity: f64,
}

impl From<&Target> for TargetSnapshot {
    fn from(target: &Target) -> Self {
        Self {
            bearing_radians: target.bearing_radians,
            range_units: target.range_units,
            opacity: target.opacity,
        }
    }
}

/// Immutable per-tick view handed to renderers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub sweep_angle_degrees: f64,
    pub rotations_per_minute: f64,
    pub tick: u64,
    pub targets: Vec<TargetSnapshot>,
}

impl RenderSnapshot {
    pub fn visible_targets(&self) -> impl Iterator<Item = &TargetSnapshot> {
        self.targets.iter().filter(|target| target.opacity > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_with_field_names() {
        let snapshot = RenderSnapshot {
            sweep_angle_degrees: 12.5,
            rotations_per_minute: 13.5,
            tick: 3,
            targets: vec![TargetSnapshot {
                bearing_radians: 1.0,
                range_units: 42.0,
                opacity: 0.5,
            }],
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["sweep_angle_degrees"], 12.5);
        assert_eq!(value["targets"][0]["range_units"], 42.0);
    }

    #[test]
    fn visible_targets_skips_faded_entries() {
        let snapshot = RenderSnapshot {
            targets: vec![
                TargetSnapshot::from(&Target::new(0.0, 20.0, 0.0)),
                TargetSnapshot::from(&Target::new(1.0, 30.0, 0.4)),
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.visible_targets().count(), 1);
    }
}
