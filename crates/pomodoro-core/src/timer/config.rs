use serde::{Deserialize, Serialize};

use super::phase::RestKind;
use crate::error::ConfigError;

/// Durations and cycle length for one engine instance.
///
/// All durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_secs: u32,
    pub short_rest_secs: u32,
    pub long_rest_secs: u32,
    /// Work intervals per cycle; the last one is followed by a long rest.
    pub cycles: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_rest_secs: 5 * 60,
            long_rest_secs: 15 * 60,
            cycles: 4,
        }
    }
}

impl TimerConfig {
    pub fn new(work_secs: u32, short_rest_secs: u32, long_rest_secs: u32, cycles: u32) -> Self {
        Self {
            work_secs,
            short_rest_secs,
            long_rest_secs,
            cycles,
        }
    }

    /// Reject zero durations and a zero cycle count.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("work_secs", self.work_secs),
            ("short_rest_secs", self.short_rest_secs),
            ("long_rest_secs", self.long_rest_secs),
            ("cycles", self.cycles),
        ];
        for (key, value) in fields {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn rest_secs(&self, kind: RestKind) -> u32 {
        match kind {
            RestKind::Short => self.short_rest_secs,
            RestKind::Long => self.long_rest_secs,
        }
    }

    /// Short rests granted before the long rest of a cycle.
    pub fn short_rests_per_cycle(&self) -> u32 {
        self.cycles.saturating_sub(1)
    }
}
