pub mod blood_pressure;
pub mod threshold;

use crate::AlertRule;
use blood_pressure::BloodPressureRule;
use threshold::MetricThresholdRule;

/// The built-in rule set in evaluation order: blood pressure, glucose,
/// sleep, heart rate.
pub fn default_rules() -> Vec<Box<dyn AlertRule>> {
    vec![
        Box::new(BloodPressureRule::default()),
        Box::new(MetricThresholdRule::high_glucose()),
        Box::new(MetricThresholdRule::low_sleep()),
        Box::new(MetricThresholdRule::tachycardia()),
    ]
}
