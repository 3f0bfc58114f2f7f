use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vitalwatch_common::i18n::{normalize_locale, DEFAULT_LOCALE};
use vitalwatch_common::types::DailyRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Message locale (`en` or `es`). Unsupported values fall back to `en`.
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub alerts: AlertSchedulerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSchedulerConfig {
    #[serde(default = "default_alerts_enabled")]
    pub enabled: bool,
    /// Pause between two passes over all users.
    #[serde(default = "default_alert_interval_secs")]
    pub interval_secs: u64,
    /// Most recent records evaluated per user on each pass.
    #[serde(default = "default_records_per_user")]
    pub records_per_user: usize,
    /// How long `stop` waits for the worker before detaching it.
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl Default for AlertSchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_alerts_enabled(),
            interval_secs: default_alert_interval_secs(),
            records_per_user: default_records_per_user(),
            stop_timeout_ms: default_stop_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Window size when users look at their own analysis.
    #[serde(default = "default_user_records_limit")]
    pub user_records_limit: usize,
    /// Window size when an administrator inspects another user.
    #[serde(default = "default_admin_records_limit")]
    pub admin_records_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            user_records_limit: default_user_records_limit(),
            admin_records_limit: default_admin_records_limit(),
        }
    }
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/vitalwatch.db")
}

fn default_alerts_enabled() -> bool {
    true
}

fn default_alert_interval_secs() -> u64 {
    180
}

fn default_records_per_user() -> usize {
    10
}

fn default_stop_timeout_ms() -> u64 {
    1000
}

fn default_user_records_limit() -> usize {
    14
}

fn default_admin_records_limit() -> usize {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            database: DatabaseConfig::default(),
            alerts: AlertSchedulerConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.locale = normalize_locale(&config.locale).to_string();
        Ok(config)
    }
}

// ---- Seed file types (used by the `seed` CLI subcommand) ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_seed_role")]
    pub role: String,
    /// Records without `user_id`; the ID assigned on insert is used.
    #[serde(default)]
    pub records: Vec<SeedRecord>,
}

/// A [`DailyRecord`] without ownership fields, as written in seed files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRecord {
    pub date: chrono::NaiveDate,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub mood: Option<i32>,
    #[serde(default)]
    pub physical_activity: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub glucose: Option<f64>,
    #[serde(default)]
    pub bpm: Option<i32>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl SeedRecord {
    /// Builds the record for `user_id`; omitted text fields get the usual
    /// defaults.
    pub fn into_record(self, user_id: i64) -> DailyRecord {
        let mut record = DailyRecord::new(user_id, self.date);
        record.sleep_hours = self.sleep_hours;
        record.mood = self.mood;
        record.food = self.food;
        record.glucose = self.glucose;
        record.bpm = self.bpm;
        record.weight = self.weight;
        if self.physical_activity.is_some() {
            record.physical_activity = self.physical_activity;
        }
        if self.symptoms.is_some() {
            record.symptoms = self.symptoms;
        }
        if self.blood_pressure.is_some() {
            record.blood_pressure = self.blood_pressure;
        }
        record
    }
}

fn default_seed_role() -> String {
    "user".to_string()
}
