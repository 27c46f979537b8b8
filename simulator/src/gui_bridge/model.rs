use ppicore::telemetry::SweepMetrics;
use ppicore::RenderSnapshot;
use serde::{Deserialize, Serialize};

/// What the bridge serves to viewers: the latest frame plus running counters.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VisualizationModel {
    pub snapshot: RenderSnapshot,
    pub metrics: SweepMetrics,
}

impl VisualizationModel {
    pub fn new(snapshot: RenderSnapshot, metrics: SweepMetrics) -> Self {
        Self { snapshot, metrics }
    }
}
