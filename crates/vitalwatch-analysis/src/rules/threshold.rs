use crate::AlertRule;
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::{DailyRecord, Metric, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
}

/// Renders the comparison as it reads in an alert sentence.
impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::GreaterThan => "above",
            Self::LessThan => "below",
            Self::GreaterEqual => "at or above",
            Self::LessEqual => "at or below",
        })
    }
}

impl CompareOp {
    pub fn check(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
            Self::GreaterEqual => value >= threshold,
            Self::LessEqual => value <= threshold,
        }
    }
}

/// Fires when a single metric crosses a fixed threshold on `required_run`
/// consecutive records. Records missing the metric break the run.
pub struct MetricThresholdRule {
    pub id: String,
    pub metric: Metric,
    pub operator: CompareOp,
    pub value: f64,
    pub required_run: usize,
    pub severity: Severity,
    /// Translation key of the alert text.
    pub message_key: String,
}

impl MetricThresholdRule {
    /// Glucose at or above 130 on 3 consecutive records.
    pub fn high_glucose() -> Self {
        Self {
            id: "high-glucose".into(),
            metric: Metric::Glucose,
            operator: CompareOp::GreaterEqual,
            value: 130.0,
            required_run: 3,
            severity: Severity::Critical,
            message_key: "alert.high_glucose".into(),
        }
    }

    /// Under 5 hours of sleep on 3 consecutive records.
    pub fn low_sleep() -> Self {
        Self {
            id: "low-sleep".into(),
            metric: Metric::SleepHours,
            operator: CompareOp::LessThan,
            value: 5.0,
            required_run: 3,
            severity: Severity::Warning,
            message_key: "alert.low_sleep".into(),
        }
    }

    /// Heart rate at or above 100 bpm on 2 consecutive records.
    pub fn tachycardia() -> Self {
        Self {
            id: "tachycardia".into(),
            metric: Metric::Bpm,
            operator: CompareOp::GreaterEqual,
            value: 100.0,
            required_run: 2,
            severity: Severity::Warning,
            message_key: "alert.tachycardia".into(),
        }
    }
}

impl AlertRule for MetricThresholdRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn required_run(&self) -> usize {
        self.required_run
    }

    fn matches(&self, record: &DailyRecord) -> bool {
        record
            .metric_value(self.metric)
            .is_some_and(|v| self.operator.check(v, self.value))
    }

    fn message(&self, locale: &str) -> String {
        let fallback = format!(
            "{} {} {} for {} consecutive entries.",
            self.metric, self.operator, self.value, self.required_run
        );
        TRANSLATIONS
            .get(locale, &self.message_key, &fallback)
            .to_string()
    }
}
