use vitalwatch_analysis::engine::HealthAlert;
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::UserRef;

/// Destination for alerts raised by the background scheduler.
pub trait AlertSink: Send + Sync {
    /// Called once per user per pass, only when `alerts` is non-empty.
    fn deliver(&self, user: &UserRef, alerts: &[HealthAlert]);
}

/// Prints alerts to the console and mirrors them to the log.
pub struct ConsoleAlertSink {
    locale: String,
}

impl ConsoleAlertSink {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn render(&self, user: &UserRef, alerts: &[HealthAlert]) -> String {
        let mut out = TRANSLATIONS
            .get(&self.locale, "scheduler.header", "[AUTOMATIC ALERT] {user} (ID {id})")
            .replace("{user}", &user.name)
            .replace("{id}", &user.id.to_string());
        for alert in alerts {
            out.push_str("\n  - ");
            out.push_str(&alert.message);
        }
        out
    }
}

impl AlertSink for ConsoleAlertSink {
    #[allow(clippy::print_stdout)]
    fn deliver(&self, user: &UserRef, alerts: &[HealthAlert]) {
        for alert in alerts {
            tracing::warn!(
                user_id = user.id,
                rule_id = %alert.rule_id,
                severity = %alert.severity,
                "{}",
                alert.message
            );
        }
        println!("\n{}", self.render(user, alerts));
    }
}

/// Display name used when a user's record cannot be loaded.
pub fn fallback_user(user_id: i64, locale: &str) -> UserRef {
    UserRef {
        id: user_id,
        name: TRANSLATIONS
            .get(locale, "user.fallback", "User {id}")
            .replace("{id}", &user_id.to_string()),
    }
}
