use crate::rules::default_rules;
use crate::AlertRule;
use serde::{Deserialize, Serialize};
use vitalwatch_common::types::{DailyRecord, Severity};

/// A fired consecutive-entry rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAlert {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for HealthAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered set of alert rules applied to a record window.
///
/// The engine keeps no per-window state, so one instance can be shared by
/// the interactive flow and the background scheduler.
pub struct AlertEngine {
    rules: Vec<Box<dyn AlertRule>>,
}

impl AlertEngine {
    pub fn new(rules: Vec<Box<dyn AlertRule>>) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(default_rules())
    }

    /// Get a rule by its ID.
    pub fn get_rule(&self, id: &str) -> Option<&dyn AlertRule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    /// Add a new rule at runtime. It is evaluated after the existing ones.
    pub fn add_rule(&mut self, rule: Box<dyn AlertRule>) {
        self.rules.push(rule);
    }

    /// Remove a rule by ID. Returns true if found and removed.
    pub fn remove_rule(&mut self, id: &str) -> bool {
        let len_before = self.rules.len();
        self.rules.retain(|r| r.id() != id);
        self.rules.len() < len_before
    }

    /// Replace all rules with a new set.
    pub fn replace_rules(&mut self, rules: Vec<Box<dyn AlertRule>>) {
        self.rules = rules;
    }

    /// Runs every rule over `records` (oldest first) and returns the alerts
    /// of all rules that fired, in rule order.
    pub fn evaluate(&self, records: &[DailyRecord], locale: &str) -> Vec<HealthAlert> {
        if records.is_empty() {
            return Vec::new();
        }

        let alerts: Vec<HealthAlert> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(records, locale))
            .collect();

        if !alerts.is_empty() {
            tracing::debug!(
                records = records.len(),
                alerts = alerts.len(),
                "Alert rules fired"
            );
        }
        alerts
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
