//! Health analysis and alerting core.
//!
//! Computes per-metric trends, behavior patterns and consecutive-entry
//! alerts from a window of [`DailyRecord`]s. Every entry point expects the
//! window ordered oldest first; callers sort with
//! [`vitalwatch_common::types::sort_chronologically`] when the source does
//! not already guarantee it. All functions are pure and safe to call from
//! any thread.

pub mod engine;
pub mod patterns;
pub mod period;
pub mod report;
pub mod rules;
pub mod stats;
pub mod trend;
pub mod window;

#[cfg(test)]
mod tests;

use std::sync::LazyLock;

use engine::{AlertEngine, HealthAlert};
use report::AnalysisReport;
use vitalwatch_common::i18n::DEFAULT_LOCALE;
use vitalwatch_common::types::{DailyRecord, Severity};

/// A rule that fires when its condition holds on enough consecutive
/// records of a window.
///
/// Implementations are registered in an [`engine::AlertEngine`] and
/// evaluated in registration order.
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule (e.g., `"high-glucose"`).
    fn id(&self) -> &str;

    /// The severity level assigned to alerts produced by this rule.
    fn severity(&self) -> Severity;

    /// Number of consecutive matching records needed to fire.
    fn required_run(&self) -> usize;

    /// Whether a single record satisfies the rule condition. Missing or
    /// unparsable fields never match.
    fn matches(&self, record: &DailyRecord) -> bool;

    /// Alert text in the given locale.
    fn message(&self, locale: &str) -> String;

    /// Scans the window and returns an alert if the condition held on
    /// [`required_run`](Self::required_run) consecutive records.
    fn evaluate(&self, window: &[DailyRecord], locale: &str) -> Option<HealthAlert> {
        if !window::has_consecutive_condition(window, self.required_run(), |r| self.matches(r)) {
            return None;
        }
        Some(HealthAlert {
            rule_id: self.id().to_string(),
            severity: self.severity(),
            message: self.message(locale),
        })
    }
}

static DEFAULT_ENGINE: LazyLock<AlertEngine> = LazyLock::new(AlertEngine::with_default_rules);

/// Evaluates the built-in rule set over `records` (oldest first).
pub fn generate_alerts(records: &[DailyRecord]) -> Vec<HealthAlert> {
    DEFAULT_ENGINE.evaluate(records, DEFAULT_LOCALE)
}

/// Trends, patterns and alerts for `records` (oldest first), using the
/// built-in rules and the default locale.
pub fn build_report(records: &[DailyRecord]) -> AnalysisReport {
    report::build_report_with(records, &DEFAULT_ENGINE, DEFAULT_LOCALE)
}
