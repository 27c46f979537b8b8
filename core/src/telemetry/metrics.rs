use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Running counters for a sweep session.
pub struct MetricsRecorder {
    inner: Mutex<SweepMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepMetrics {
    pub ticks: u64,
    pub hits: u64,
    pub repositions: u64,
    pub rejected_commands: u64,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SweepMetrics::default()),
        }
    }

    pub fn record_tick(&self, hits: usize, repositions: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.ticks += 1;
            metrics.hits += hits as u64;
            metrics.repositions += repositions as u64;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected_commands += 1;
        }
    }

    pub fn snapshot(&self) -> SweepMetrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            SweepMetrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_tick(2, 1);
        recorder.record_tick(0, 3);
        recorder.record_rejected();
        let metrics = recorder.snapshot();
        assert_eq!(metrics.ticks, 2);
        assert_eq!(metrics.hits, 2);
        assert_eq!(metrics.repositions, 4);
        assert_eq!(metrics.rejected_commands, 1);
    }
}
