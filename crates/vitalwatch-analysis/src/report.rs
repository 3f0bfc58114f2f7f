use crate::engine::{AlertEngine, HealthAlert};
use crate::patterns::{detect_patterns, DetectedPattern};
use crate::trend::{metric_trend, TrendResult};
use serde::{Deserialize, Serialize};
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::{DailyRecord, Metric};

/// Trend of every tracked metric. `None` means insufficient data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTrends {
    pub weight: Option<TrendResult>,
    pub glucose: Option<TrendResult>,
    pub mood: Option<TrendResult>,
    pub sleep_hours: Option<TrendResult>,
    pub bpm: Option<TrendResult>,
}

impl MetricTrends {
    pub fn analyze(records: &[DailyRecord]) -> Self {
        Self {
            weight: metric_trend(records, Metric::Weight),
            glucose: metric_trend(records, Metric::Glucose),
            mood: metric_trend(records, Metric::Mood),
            sleep_hours: metric_trend(records, Metric::SleepHours),
            bpm: metric_trend(records, Metric::Bpm),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<&TrendResult> {
        match metric {
            Metric::Weight => self.weight.as_ref(),
            Metric::Glucose => self.glucose.as_ref(),
            Metric::Mood => self.mood.as_ref(),
            Metric::SleepHours => self.sleep_hours.as_ref(),
            Metric::Bpm => self.bpm.as_ref(),
        }
    }

    /// Metrics paired with their trend, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Option<&TrendResult>)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

/// Display string for one metric's trend.
pub fn describe_trend(trend: Option<&TrendResult>, locale: &str) -> String {
    match trend {
        Some(trend) => trend.describe(locale),
        None => TRANSLATIONS
            .get(locale, "trend.insufficient", "insufficient data")
            .to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub trends: MetricTrends,
    pub patterns: Vec<DetectedPattern>,
    pub alerts: Vec<HealthAlert>,
}

impl AnalysisReport {
    /// `(label, summary)` pairs for every metric, in report order.
    pub fn trend_summaries(&self, locale: &str) -> Vec<(&'static str, String)> {
        self.trends
            .iter()
            .map(|(metric, trend)| (metric.label(locale), describe_trend(trend, locale)))
            .collect()
    }
}

/// Composes trends, patterns and alerts for `records` (oldest first).
///
/// Nothing is cached: every call recomputes from the window it is given.
pub fn build_report_with(
    records: &[DailyRecord],
    engine: &AlertEngine,
    locale: &str,
) -> AnalysisReport {
    AnalysisReport {
        trends: MetricTrends::analyze(records),
        patterns: detect_patterns(records, locale),
        alerts: engine.evaluate(records, locale),
    }
}
