//! Init timing collection.

use crate::module::ModuleId;

/// Wall-clock init time of a single module.
#[derive(Debug, Clone)]
pub struct ModuleInitMetrics {
    pub id: ModuleId,
    pub duration_ms: u128,
}

/// Timing collected over one bulk init pass.
#[derive(Debug, Clone, Default)]
pub struct InitMetrics {
    pub total_duration_ms: u128,
    pub modules: Vec<ModuleInitMetrics>,
}

impl InitMetrics {
    /// Init duration for one module, if it came up.
    pub fn module_duration_ms(&self, id: ModuleId) -> Option<u128> {
        self.modules
            .iter()
            .find(|metrics| metrics.id == id)
            .map(|metrics| metrics.duration_ms)
    }

    /// Log one line per module plus the total.
    pub fn log_summary(&self) {
        for metrics in &self.modules {
            tracing::info!(
                module = %metrics.id,
                duration_ms = metrics.duration_ms,
                "module init time"
            );
        }
        tracing::info!(
            total_duration_ms = self.total_duration_ms,
            modules = self.modules.len(),
            "init pass complete"
        );
    }
}
