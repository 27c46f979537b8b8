use crate::prelude::{SweepError, SweepResult, DEFAULT_RPM_PRESETS};

/// Ordered, non-empty set of selectable rotation rates.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationPresets {
    rates: Vec<f64>,
}

impl RotationPresets {
    pub fn new(rates: Vec<f64>) -> SweepResult<Self> {
        if rates.is_empty() {
            return Err(SweepError::InvalidConfiguration(
                "at least one rotation preset is required".into(),
            ));
        }
        if let Some(bad) = rates.iter().find(|rpm| !rpm.is_finite() || **rpm <= 0.0) {
            return Err(SweepError::InvalidConfiguration(format!(
                "rotation preset {} must be a positive rate",
                bad
            )));
        }
        if let Some((index, dup)) = rates
            .iter()
            .enumerate()
            .find(|(index, rpm)| rates[..*index].contains(*rpm))
        {
            return Err(SweepError::InvalidConfiguration(format!(
                "rotation preset {} is listed twice (position {})",
                dup, index
            )));
        }
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    pub fn position(&self, rpm: f64) -> Option<usize> {
        self.rates.iter().position(|&candidate| candidate == rpm)
    }

    pub fn get(&self, index: usize) -> f64 {
        self.rates[index % self.rates.len()]
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RotationPresets {
    fn default() -> Self {
        Self {
            rates: DEFAULT_RPM_PRESETS.to_vec(),
        }
    }
}
