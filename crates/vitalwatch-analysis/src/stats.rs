use crate::trend::round2;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vitalwatch_common::types::{DailyRecord, Metric};

/// Symptom texts that mean "nothing to report".
const NO_SYMPTOM_MARKERS: &[&str] = &[
    "none reported",
    "none",
    "n/a",
    "sin sintomas reportados",
    "sin sintomas",
];

const HIGH_SYSTOLIC: i32 = 130;
const HIGH_DIASTOLIC: i32 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodDay {
    pub date: NaiveDate,
    pub value: i32,
}

/// Descriptive statistics over a reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatistics {
    pub total_records: usize,
    pub avg_sleep_hours: Option<f64>,
    pub avg_mood: Option<f64>,
    pub avg_glucose: Option<f64>,
    pub avg_weight: Option<f64>,
    pub avg_bpm: Option<f64>,
    pub max_sleep_hours: Option<f64>,
    pub min_sleep_hours: Option<f64>,
    pub best_mood_day: Option<MoodDay>,
    pub worst_mood_day: Option<MoodDay>,
    pub symptomatic_days: usize,
    pub high_pressure_days: usize,
}

pub fn summarize_statistics(records: &[DailyRecord]) -> PeriodStatistics {
    let sleep: Vec<f64> = records.iter().filter_map(|r| r.sleep_hours).collect();

    PeriodStatistics {
        total_records: records.len(),
        avg_sleep_hours: average(&sleep),
        avg_mood: metric_average(records, Metric::Mood),
        avg_glucose: metric_average(records, Metric::Glucose),
        avg_weight: metric_average(records, Metric::Weight),
        avg_bpm: metric_average(records, Metric::Bpm),
        max_sleep_hours: sleep.iter().copied().reduce(f64::max),
        min_sleep_hours: sleep.iter().copied().reduce(f64::min),
        best_mood_day: extreme_mood_day(records, |candidate, best| candidate > best),
        worst_mood_day: extreme_mood_day(records, |candidate, worst| candidate < worst),
        symptomatic_days: records.iter().filter(|r| is_symptomatic(r)).count(),
        high_pressure_days: records
            .iter()
            .filter_map(DailyRecord::parsed_blood_pressure)
            .filter(|bp| bp.systolic >= HIGH_SYSTOLIC || bp.diastolic >= HIGH_DIASTOLIC)
            .count(),
    }
}

fn metric_average(records: &[DailyRecord], metric: Metric) -> Option<f64> {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.metric_value(metric))
        .collect();
    average(&values)
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
}

// Ties keep the earliest day.
fn extreme_mood_day(
    records: &[DailyRecord],
    better: impl Fn(i32, i32) -> bool,
) -> Option<MoodDay> {
    let mut found: Option<MoodDay> = None;
    for record in records {
        let Some(value) = record.mood else { continue };
        match found {
            Some(current) if !better(value, current.value) => {}
            _ => {
                found = Some(MoodDay {
                    date: record.date,
                    value,
                })
            }
        }
    }
    found
}

fn is_symptomatic(record: &DailyRecord) -> bool {
    record.symptoms.as_deref().is_some_and(|s| {
        !s.is_empty() && !NO_SYMPTOM_MARKERS.contains(&s.trim().to_lowercase().as_str())
    })
}
