//! Reporting configuration.
//!
//! [`ReportConfig`] controls when [`best_of`](super::best_of) emits a
//! [`GenerationRecord`](super::GenerationRecord).

/// Cadence of the per-generation observability record.
///
/// A record is emitted every `log_interval` generations, and whenever a new
/// best (fewer used sensors) is found regardless of the interval.
///
/// # Defaults
///
/// ```
/// use kcmc_heur::ga::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.log_interval, 10);
/// assert!(ReportConfig::quiet().with_log_interval(5).emits_at(15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportConfig {
    /// Generations between periodic records; `0` disables them.
    pub log_interval: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { log_interval: 10 }
    }
}

impl ReportConfig {
    /// Sets the periodic interval (0 to disable).
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Preset emitting a record every generation.
    pub fn verbose() -> Self {
        Self { log_interval: 1 }
    }

    /// Preset emitting records only on improvement.
    pub fn quiet() -> Self {
        Self { log_interval: 0 }
    }

    /// Whether `generation` falls on the periodic cadence.
    pub fn emits_at(&self, generation: usize) -> bool {
        self.log_interval > 0 && generation % self.log_interval == 0
    }
}
