use serde::{Deserialize, Serialize};
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::DailyRecord;

const SHORT_SLEEP_HOURS: f64 = 6.0;
const LOW_MOOD: i32 = 4;
const MIN_SLEEP_MOOD_DAYS: usize = 3;

const SEDENTARY_MARKER: &str = "no activity";
const MIN_SEDENTARY_DAYS: usize = 2;
const MIN_WEIGHT_GAIN: f64 = 1.0;

const HIGH_GLUCOSE: f64 = 130.0;
const MIN_HIGH_GLUCOSE_DAYS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    SleepMood,
    SedentaryWeightGain,
    FrequentHighGlucose,
}

impl PatternKind {
    fn message_key(self) -> &'static str {
        match self {
            PatternKind::SleepMood => "pattern.sleep_mood",
            PatternKind::SedentaryWeightGain => "pattern.sedentary_weight",
            PatternKind::FrequentHighGlucose => "pattern.frequent_high_glucose",
        }
    }
}

/// A behavioral finding over a whole window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub kind: PatternKind,
    pub message: String,
}

impl DetectedPattern {
    fn new(kind: PatternKind, locale: &str) -> Self {
        Self {
            kind,
            message: TRANSLATIONS
                .get(locale, kind.message_key(), kind.message_key())
                .to_string(),
        }
    }
}

impl std::fmt::Display for DetectedPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Evaluates the behavior heuristics over `records` (oldest first).
///
/// Heuristics run in a fixed order, which is also the output order:
/// short sleep with low mood, weight gain during sedentary stretches, and
/// frequent high glucose. An empty result means nothing stood out.
pub fn detect_patterns(records: &[DailyRecord], locale: &str) -> Vec<DetectedPattern> {
    let mut patterns = Vec::new();

    if count_short_sleep_low_mood(records) >= MIN_SLEEP_MOOD_DAYS {
        patterns.push(DetectedPattern::new(PatternKind::SleepMood, locale));
    }

    if has_sedentary_weight_gain(records) {
        patterns.push(DetectedPattern::new(
            PatternKind::SedentaryWeightGain,
            locale,
        ));
    }

    if count_high_glucose(records) >= MIN_HIGH_GLUCOSE_DAYS {
        patterns.push(DetectedPattern::new(
            PatternKind::FrequentHighGlucose,
            locale,
        ));
    }

    patterns
}

fn count_short_sleep_low_mood(records: &[DailyRecord]) -> usize {
    records
        .iter()
        .filter(|r| {
            r.sleep_hours.is_some_and(|h| h < SHORT_SLEEP_HOURS)
                && r.mood.is_some_and(|m| m <= LOW_MOOD)
        })
        .count()
}

fn is_sedentary(record: &DailyRecord) -> bool {
    record
        .physical_activity
        .as_deref()
        .is_some_and(|a| a.to_lowercase().contains(SEDENTARY_MARKER))
}

// Compares the first and last weight samples of the window, not averages.
fn has_sedentary_weight_gain(records: &[DailyRecord]) -> bool {
    let sedentary_days = records.iter().filter(|r| is_sedentary(r)).count();
    let weights: Vec<f64> = records.iter().filter_map(|r| r.weight).collect();

    let (Some(first), Some(last)) = (weights.first(), weights.last()) else {
        return false;
    };

    weights.len() >= 2
        && sedentary_days >= MIN_SEDENTARY_DAYS.max(records.len() / 3)
        && last - first >= MIN_WEIGHT_GAIN
}

fn count_high_glucose(records: &[DailyRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.glucose.is_some_and(|g| g >= HIGH_GLUCOSE))
        .count()
}
