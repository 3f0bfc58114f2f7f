use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::i18n::TRANSLATIONS;

pub const DEFAULT_PHYSICAL_ACTIVITY: &str = "no activity";
pub const DEFAULT_SYMPTOMS: &str = "none reported";
pub const DEFAULT_BLOOD_PRESSURE: &str = "N/A";

fn default_physical_activity() -> Option<String> {
    Some(DEFAULT_PHYSICAL_ACTIVITY.to_string())
}

fn default_symptoms() -> Option<String> {
    Some(DEFAULT_SYMPTOMS.to_string())
}

fn default_blood_pressure() -> Option<String> {
    Some(DEFAULT_BLOOD_PRESSURE.to_string())
}

/// One health observation for one user on one day.
///
/// Records are read-only to the analysis code. Every analysis entry point
/// expects its window sorted oldest first (see [`sort_chronologically`]).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vitalwatch_common::types::DailyRecord;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let record = DailyRecord::new(7, day);
/// assert_eq!(record.physical_activity.as_deref(), Some("no activity"));
/// assert_eq!(record.blood_pressure.as_deref(), Some("N/A"));
/// assert!(record.glucose.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Store row id, absent for records that were never persisted.
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    pub date: NaiveDate,
    /// Hours slept, 0 to 24.
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    /// Self-reported mood, 1 to 10.
    #[serde(default)]
    pub mood: Option<i32>,
    #[serde(default = "default_physical_activity")]
    pub physical_activity: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default = "default_symptoms")]
    pub symptoms: Option<String>,
    /// Free-form `"systolic/diastolic"`, see [`parse_blood_pressure`].
    #[serde(default = "default_blood_pressure")]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub glucose: Option<f64>,
    #[serde(default)]
    pub bpm: Option<i32>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl DailyRecord {
    /// Creates an empty record carrying the same defaults the console
    /// collaborator applies when a field is skipped.
    pub fn new(user_id: i64, date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            date,
            sleep_hours: None,
            mood: None,
            physical_activity: default_physical_activity(),
            food: None,
            symptoms: default_symptoms(),
            blood_pressure: default_blood_pressure(),
            glucose: None,
            bpm: None,
            weight: None,
        }
    }

    /// Numeric value of `metric` on this record, if it was reported.
    pub fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Weight => self.weight,
            Metric::Glucose => self.glucose,
            Metric::Mood => self.mood.map(f64::from),
            Metric::SleepHours => self.sleep_hours,
            Metric::Bpm => self.bpm.map(f64::from),
        }
    }

    /// First metric, in report order, whose value falls outside
    /// [`Metric::accepts`].
    pub fn out_of_range_metric(&self) -> Option<Metric> {
        Metric::ALL
            .into_iter()
            .find(|&m| self.metric_value(m).is_some_and(|v| !m.accepts(v)))
    }

    pub fn parsed_blood_pressure(&self) -> Option<BloodPressure> {
        self.blood_pressure.as_deref().and_then(parse_blood_pressure)
    }
}

/// Sorts a window oldest first. The sort is stable, so records sharing a
/// date keep their insertion order.
pub fn sort_chronologically(records: &mut [DailyRecord]) {
    records.sort_by_key(|r| r.date);
}

/// Returns true if no record is dated before its predecessor.
pub fn is_chronological(records: &[DailyRecord]) -> bool {
    records.windows(2).all(|pair| pair[0].date <= pair[1].date)
}

/// A tracked numeric health field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Weight,
    Glucose,
    Mood,
    SleepHours,
    Bpm,
}

impl Metric {
    /// All metrics, in report order.
    pub const ALL: [Metric; 5] = [
        Metric::Weight,
        Metric::Glucose,
        Metric::Mood,
        Metric::SleepHours,
        Metric::Bpm,
    ];

    /// Largest half-over-half delta still classified as a stable trend.
    pub fn tolerance(self) -> f64 {
        match self {
            Metric::Weight => 0.3,
            Metric::Glucose => 5.0,
            Metric::Mood => 0.5,
            Metric::SleepHours => 0.4,
            Metric::Bpm => 2.0,
        }
    }

    /// Whether `value` is a plausible reading: mood 1-10, sleep 0-24 hours,
    /// non-negative weight and bpm. Glucose only has to be finite.
    pub fn accepts(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Metric::Mood => (1.0..=10.0).contains(&value),
            Metric::SleepHours => (0.0..=24.0).contains(&value),
            Metric::Weight | Metric::Bpm => value >= 0.0,
            Metric::Glucose => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Glucose => "glucose",
            Metric::Mood => "mood",
            Metric::SleepHours => "sleep_hours",
            Metric::Bpm => "bpm",
        }
    }

    /// Display label in the given locale.
    pub fn label(self, locale: &str) -> &'static str {
        match self {
            Metric::Weight => TRANSLATIONS.get(locale, "metric.weight", "Weight"),
            Metric::Glucose => TRANSLATIONS.get(locale, "metric.glucose", "Glucose"),
            Metric::Mood => TRANSLATIONS.get(locale, "metric.mood", "Mood"),
            Metric::SleepHours => TRANSLATIONS.get(locale, "metric.sleep_hours", "Sleep hours"),
            Metric::Bpm => TRANSLATIONS.get(locale, "metric.bpm", "Beats per minute"),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(Metric::Weight),
            "glucose" => Ok(Metric::Glucose),
            "mood" => Ok(Metric::Mood),
            "sleep_hours" | "sleep" => Ok(Metric::SleepHours),
            "bpm" => Ok(Metric::Bpm),
            _ => Err(format!("unknown metric: {s}")),
        }
    }
}

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use vitalwatch_common::types::Severity;
///
/// let sev: Severity = "warning".parse().unwrap();
/// assert_eq!(sev, Severity::Warning);
/// assert_eq!(sev.to_string(), "warning");
/// assert!(Severity::Critical > Severity::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// A parsed `"systolic/diastolic"` reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: i32,
}

/// Parses a `"systolic/diastolic"` string, splitting on the first `/`.
///
/// Both halves must be integers once surrounding whitespace is trimmed.
/// Anything else yields `None`.
///
/// # Examples
///
/// ```
/// use vitalwatch_common::types::{parse_blood_pressure, BloodPressure};
///
/// assert_eq!(
///     parse_blood_pressure("130/85"),
///     Some(BloodPressure { systolic: 130, diastolic: 85 })
/// );
/// assert_eq!(parse_blood_pressure("invalid"), None);
/// assert_eq!(parse_blood_pressure("120"), None);
/// ```
pub fn parse_blood_pressure(value: &str) -> Option<BloodPressure> {
    let (systolic, diastolic) = value.split_once('/')?;
    Some(BloodPressure {
        systolic: systolic.trim().parse().ok()?,
        diastolic: diastolic.trim().parse().ok()?,
    })
}

/// Account data used to attribute findings to a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
}

/// Minimal `{id, name}` pair embedded in exported reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
}

impl From<&UserInfo> for UserRef {
    fn from(user: &UserInfo) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn out_of_range_values_are_flagged() {
        let mut record = DailyRecord::new(1, day(1));
        record.mood = Some(10);
        record.sleep_hours = Some(0.0);
        record.bpm = Some(0);
        record.glucose = Some(-3.0);
        assert_eq!(record.out_of_range_metric(), None);

        record.mood = Some(0);
        assert_eq!(record.out_of_range_metric(), Some(Metric::Mood));

        record.mood = Some(11);
        record.weight = Some(-1.0);
        assert_eq!(record.out_of_range_metric(), Some(Metric::Weight));

        let mut sleepy = DailyRecord::new(1, day(2));
        sleepy.sleep_hours = Some(24.5);
        assert_eq!(sleepy.out_of_range_metric(), Some(Metric::SleepHours));
        sleepy.sleep_hours = Some(f64::NAN);
        assert_eq!(sleepy.out_of_range_metric(), Some(Metric::SleepHours));
    }

    #[test]
    fn blood_pressure_trims_whitespace() {
        assert_eq!(
            parse_blood_pressure(" 140 / 90 "),
            Some(BloodPressure {
                systolic: 140,
                diastolic: 90
            })
        );
    }

    #[test]
    fn blood_pressure_rejects_malformed_values() {
        assert_eq!(parse_blood_pressure("N/A"), None);
        assert_eq!(parse_blood_pressure(""), None);
        assert_eq!(parse_blood_pressure("130/"), None);
        assert_eq!(parse_blood_pressure("130/85/90"), None);
        assert_eq!(parse_blood_pressure("12.5/80"), None);
    }

    #[test]
    fn metric_value_widens_integer_fields() {
        let mut record = DailyRecord::new(1, day(1));
        record.mood = Some(6);
        record.bpm = Some(72);
        assert_eq!(record.metric_value(Metric::Mood), Some(6.0));
        assert_eq!(record.metric_value(Metric::Bpm), Some(72.0));
        assert_eq!(record.metric_value(Metric::Weight), None);
    }

    #[test]
    fn sort_keeps_same_day_insertion_order() {
        let mut first = DailyRecord::new(1, day(2));
        first.id = Some(10);
        let mut second = DailyRecord::new(1, day(2));
        second.id = Some(11);
        let earlier = DailyRecord::new(1, day(1));

        let mut records = vec![first, second, earlier];
        assert!(!is_chronological(&records));

        sort_chronologically(&mut records);
        assert!(is_chronological(&records));
        assert_eq!(records[0].date, day(1));
        assert_eq!(records[1].id, Some(10));
        assert_eq!(records[2].id, Some(11));
    }

    #[test]
    fn deserialize_fills_record_defaults() {
        let record: DailyRecord =
            serde_json::from_str(r#"{"user_id": 3, "date": "2024-05-01", "mood": 7}"#).unwrap();
        assert_eq!(record.mood, Some(7));
        assert_eq!(record.physical_activity.as_deref(), Some(DEFAULT_PHYSICAL_ACTIVITY));
        assert_eq!(record.symptoms.as_deref(), Some(DEFAULT_SYMPTOMS));
        assert_eq!(record.blood_pressure.as_deref(), Some(DEFAULT_BLOOD_PRESSURE));
    }

    #[test]
    fn metric_parses_from_field_names() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
        assert!("pulse".parse::<Metric>().is_err());
    }
}
