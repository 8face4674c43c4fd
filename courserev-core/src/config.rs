use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do when more than one course carries the requested course number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateCoursePolicy {
    /// Take the first match in store order and log a warning
    #[default]
    First,
    /// Fail with `AmbiguousMatch`
    Reject,
}

/// What to do with a section whose lecturer does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Fail the whole report with `DanglingReference`
    #[default]
    Fail,
    /// Drop the section (and its reviews) from the report and log a warning
    Skip,
}

/// Tuning for report generation (`[report]` in config.toml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Timeout applied to each individual store call
    pub call_timeout_ms: u64,
    /// Maximum concurrent per-section lookups
    pub fan_out: usize,
    pub duplicate_courses: DuplicateCoursePolicy,
    pub orphaned_sections: OrphanPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            call_timeout_ms: 5_000,
            fan_out: 8,
            duplicate_courses: DuplicateCoursePolicy::default(),
            orphaned_sections: OrphanPolicy::default(),
        }
    }
}

impl ReportOptions {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Fan-out limit, never below one
    pub fn fan_out(&self) -> usize {
        self.fan_out.max(1)
    }
}
