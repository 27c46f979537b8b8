use log::{debug, info, warn};

/// Thin wrapper so sweep components log under one target.
pub struct LogManager {
    scope: &'static str,
}

impl LogManager {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn record(&self, message: &str) {
        info!(target: "ppicore", "[{}] {}", self.scope, message);
    }

    pub fn detail(&self, message: &str) {
        debug!(target: "ppicore", "[{}] {}", self.scope, message);
    }

    pub fn warning(&self, message: &str) {
        warn!(target: "ppicore", "[{}] {}", self.scope, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("sweep")
    }
}
