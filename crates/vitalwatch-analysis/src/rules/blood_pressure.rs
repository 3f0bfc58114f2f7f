use crate::AlertRule;
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::{DailyRecord, Severity};

/// Fires when systolic or diastolic pressure is elevated on `required_run`
/// consecutive records. Unparsable readings count as not elevated.
pub struct BloodPressureRule {
    pub id: String,
    pub systolic_limit: i32,
    pub diastolic_limit: i32,
    pub required_run: usize,
    pub severity: Severity,
}

impl Default for BloodPressureRule {
    fn default() -> Self {
        Self {
            id: "high-blood-pressure".into(),
            systolic_limit: 130,
            diastolic_limit: 85,
            required_run: 3,
            severity: Severity::Warning,
        }
    }
}

impl AlertRule for BloodPressureRule {
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
        record.parsed_blood_pressure().is_some_and(|bp| {
            bp.systolic >= self.systolic_limit || bp.diastolic >= self.diastolic_limit
        })
    }

    fn message(&self, locale: &str) -> String {
        TRANSLATIONS
            .get(
                locale,
                "alert.high_blood_pressure",
                "Elevated blood pressure for 3 consecutive entries.",
            )
            .to_string()
    }
}
