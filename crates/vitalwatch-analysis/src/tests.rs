use crate::engine::AlertEngine;
use crate::patterns::{detect_patterns, PatternKind};
use crate::period::{PeriodReport, Timeframe};
use crate::report::{build_report_with, describe_trend};
use crate::rules::threshold::{CompareOp, MetricThresholdRule};
use crate::stats::summarize_statistics;
use crate::trend::{trend_for_metric, TrendDirection};
use crate::{build_report, generate_alerts, AlertRule};
use chrono::{Duration, NaiveDate};
use vitalwatch_common::types::{DailyRecord, Metric, Severity, UserRef};

fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

/// `count` consecutive daily records for user 1, starting 2024-04-01.
fn make_records(count: usize) -> Vec<DailyRecord> {
    (0..count)
        .map(|i| {
            let mut record = DailyRecord::new(1, start_day() + Duration::days(i as i64));
            record.id = Some(i as i64 + 1);
            record.physical_activity = Some("walking 30 min".to_string());
            record
        })
        .collect()
}

fn with_blood_pressure(values: &[&str]) -> Vec<DailyRecord> {
    let mut records = make_records(values.len());
    for (record, bp) in records.iter_mut().zip(values) {
        record.blood_pressure = Some(bp.to_string());
    }
    records
}

fn rule_ids(records: &[DailyRecord]) -> Vec<String> {
    generate_alerts(records)
        .into_iter()
        .map(|a| a.rule_id)
        .collect()
}

// ---- Trend analyzer ----

#[test]
fn trend_needs_two_values_for_every_metric() {
    for metric in Metric::ALL {
        assert!(trend_for_metric(&[], metric.tolerance()).is_none());
        assert!(trend_for_metric(&[42.0], metric.tolerance()).is_none());
    }
}

#[test]
fn constant_series_is_stable_with_zero_delta() {
    let trend = trend_for_metric(&[7.5; 6], Metric::SleepHours.tolerance()).unwrap();
    assert_eq!(trend.direction, TrendDirection::Stable);
    assert_eq!(trend.delta, 0.0);
    assert_eq!(trend.recent_average, 7.5);
}

#[test]
fn monotonic_series_rise_and_fall() {
    let rising = trend_for_metric(&[90.0, 95.0, 100.0, 105.0], Metric::Glucose.tolerance()).unwrap();
    assert_eq!(rising.direction, TrendDirection::Rising);
    assert!(rising.delta > 0.0);
    assert_eq!(rising.delta, 10.0);

    let falling = trend_for_metric(&[80.0, 78.0, 76.0, 74.0], Metric::Weight.tolerance()).unwrap();
    assert_eq!(falling.direction, TrendDirection::Falling);
    assert!(falling.delta < 0.0);
    assert_eq!(falling.delta, -4.0);
    assert_eq!(falling.recent_average, 75.0);
}

#[test]
fn report_trends_skip_missing_samples() {
    let mut records = make_records(4);
    records[0].weight = Some(70.0);
    records[2].weight = Some(72.0);
    records[3].mood = Some(6);

    let report = build_report(&records);
    let weight = report.trends.weight.unwrap();
    assert_eq!(weight.direction, TrendDirection::Rising);
    assert_eq!(
        describe_trend(Some(&weight), "en"),
        "rising (+2.0) recent average 72.0"
    );
    assert!(report.trends.mood.is_none());
    assert_eq!(describe_trend(report.trends.mood.as_ref(), "en"), "insufficient data");
}

// ---- Pattern detector ----

#[test]
fn sleep_mood_pattern_detected_end_to_end() {
    let moods = [8, 8, 8, 3, 3, 3, 2];
    let sleep = [7.0, 7.0, 7.0, 5.0, 5.0, 4.0, 4.5];
    let mut records = make_records(moods.len());
    for (i, record) in records.iter_mut().enumerate() {
        record.mood = Some(moods[i]);
        record.sleep_hours = Some(sleep[i]);
    }

    let report = build_report(&records);
    assert_eq!(report.patterns.len(), 1);
    assert_eq!(report.patterns[0].kind, PatternKind::SleepMood);
    assert_eq!(
        report.patterns[0].to_string(),
        "Sleeping less than 6 hours appears to be associated with low mood."
    );
}

#[test]
fn sleep_mood_pattern_needs_both_fields() {
    let mut records = make_records(4);
    for record in &mut records {
        record.sleep_hours = Some(4.0);
    }
    records[0].mood = Some(2);
    records[1].mood = Some(3);
    assert!(detect_patterns(&records, "en").is_empty());
}

#[test]
fn sedentary_weight_gain_uses_first_and_last_weight() {
    let mut records = make_records(6);
    for record in records.iter_mut().take(2) {
        record.physical_activity = Some("No Activity today".to_string());
    }
    records[0].weight = Some(80.0);
    records[2].weight = Some(79.0);
    records[5].weight = Some(81.0);

    let patterns = detect_patterns(&records, "en");
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].kind, PatternKind::SedentaryWeightGain);
}

#[test]
fn sedentary_weight_gain_requires_a_third_of_days_inactive() {
    let mut records = make_records(9);
    for record in records.iter_mut().take(2) {
        record.physical_activity = Some("no activity".to_string());
    }
    records[0].weight = Some(80.0);
    records[8].weight = Some(82.0);

    // 2 sedentary days < max(2, 9 / 3)
    assert!(detect_patterns(&records, "en").is_empty());

    records[4].physical_activity = Some("no activity".to_string());
    assert_eq!(
        detect_patterns(&records, "en")[0].kind,
        PatternKind::SedentaryWeightGain
    );
}

#[test]
fn sedentary_weight_gain_needs_one_kilo() {
    let mut records = make_records(3);
    for record in &mut records {
        record.physical_activity = None;
    }
    records[0].physical_activity = Some("no activity".to_string());
    records[1].physical_activity = Some("no activity".to_string());
    records[0].weight = Some(80.0);
    records[2].weight = Some(80.9);
    assert!(detect_patterns(&records, "en").is_empty());
}

#[test]
fn patterns_keep_fixed_order() {
    let mut records = make_records(6);
    for record in &mut records {
        record.sleep_hours = Some(5.0);
        record.mood = Some(3);
        record.glucose = Some(135.0);
        record.physical_activity = Some("no activity".to_string());
    }
    records[0].weight = Some(70.0);
    records[5].weight = Some(72.0);

    let kinds: Vec<PatternKind> = detect_patterns(&records, "en")
        .into_iter()
        .map(|p| p.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            PatternKind::SleepMood,
            PatternKind::SedentaryWeightGain,
            PatternKind::FrequentHighGlucose,
        ]
    );
}

#[test]
fn frequent_glucose_counts_non_consecutive_days() {
    let mut records = make_records(6);
    records[0].glucose = Some(140.0);
    records[2].glucose = Some(130.0);
    records[4].glucose = Some(150.0);
    records[5].glucose = Some(100.0);

    let patterns = detect_patterns(&records, "en");
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].kind, PatternKind::FrequentHighGlucose);
    // Not consecutive, so no alert.
    assert!(generate_alerts(&records).is_empty());
}

// ---- Alert evaluator ----

#[test]
fn blood_pressure_alert_after_three_in_a_row() {
    let records = with_blood_pressure(&["120/80", "135/80", "135/80", "135/80"]);
    let alerts = generate_alerts(&records);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].rule_id, "high-blood-pressure");
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert!(alerts[0].message.contains("blood pressure"));
}

#[test]
fn blood_pressure_run_resets_on_normal_reading() {
    let records = with_blood_pressure(&["135/80", "135/80", "110/70", "135/80", "135/80"]);
    assert!(generate_alerts(&records).is_empty());
}

#[test]
fn diastolic_alone_is_enough() {
    let records = with_blood_pressure(&["120/85", "118/90", "125/88"]);
    assert_eq!(rule_ids(&records), vec!["high-blood-pressure"]);
}

#[test]
fn unparsable_blood_pressure_breaks_the_run() {
    let records = with_blood_pressure(&["140/90", "140/90", "N/A", "140/90", "oops"]);
    assert!(generate_alerts(&records).is_empty());
}

#[test]
fn missing_values_break_metric_runs() {
    let mut records = make_records(4);
    records[0].glucose = Some(140.0);
    records[1].glucose = Some(140.0);
    records[3].glucose = Some(140.0);
    assert!(generate_alerts(&records).is_empty());

    records[2].glucose = Some(131.0);
    let alerts = generate_alerts(&records);
    assert_eq!(alerts[0].rule_id, "high-glucose");
    assert_eq!(alerts[0].severity, Severity::Critical);
}

#[test]
fn calendar_gaps_do_not_break_streaks() {
    let mut records = make_records(2);
    records[1].date = records[0].date + Duration::days(20);
    for record in &mut records {
        record.bpm = Some(110);
    }
    assert_eq!(rule_ids(&records), vec!["tachycardia"]);
}

#[test]
fn all_matching_rules_fire_in_table_order() {
    let mut records = with_blood_pressure(&["140/95", "140/95", "140/95"]);
    for record in &mut records {
        record.glucose = Some(180.0);
        record.sleep_hours = Some(4.0);
        record.bpm = Some(104);
    }
    assert_eq!(
        rule_ids(&records),
        vec!["high-blood-pressure", "high-glucose", "low-sleep", "tachycardia"]
    );
}

#[test]
fn low_sleep_threshold_is_strict() {
    let mut records = make_records(3);
    for record in &mut records {
        record.sleep_hours = Some(5.0);
    }
    assert!(generate_alerts(&records).is_empty());

    records[1].sleep_hours = Some(4.9);
    records[0].sleep_hours = Some(3.0);
    records[2].sleep_hours = Some(0.0);
    assert_eq!(rule_ids(&records), vec!["low-sleep"]);
}

#[test]
fn engine_supports_custom_rules() {
    let mut engine = AlertEngine::with_default_rules();
    assert!(engine.remove_rule("tachycardia"));
    assert!(!engine.remove_rule("tachycardia"));
    engine.add_rule(Box::new(MetricThresholdRule {
        id: "weight-high".into(),
        metric: Metric::Weight,
        operator: CompareOp::GreaterThan,
        value: 100.0,
        required_run: 2,
        severity: Severity::Info,
        message_key: "alert.weight_high".into(),
    }));

    let mut records = make_records(2);
    for record in &mut records {
        record.weight = Some(101.0);
        record.bpm = Some(120);
    }

    let alerts = engine.evaluate(&records, "en");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].rule_id, "weight-high");
    assert_eq!(
        alerts[0].message,
        "weight above 100 for 2 consecutive entries."
    );
    assert!(engine.get_rule("weight-high").is_some());
}

#[test]
fn replaced_rule_set_is_the_only_one_evaluated() {
    let mut engine = AlertEngine::with_default_rules();
    engine.replace_rules(vec![Box::new(MetricThresholdRule {
        id: "mood-low".into(),
        metric: Metric::Mood,
        operator: CompareOp::LessEqual,
        value: 2.0,
        required_run: 2,
        severity: Severity::Warning,
        message_key: "alert.mood_low".into(),
    })]);
    assert!(engine.get_rule("tachycardia").is_none());

    let mut records = make_records(2);
    for record in &mut records {
        record.mood = Some(2);
        record.bpm = Some(120);
    }

    let alerts = engine.evaluate(&records, "en");
    let ids: Vec<&str> = alerts.iter().map(|a| a.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["mood-low"]);
    assert_eq!(
        alerts[0].message,
        "mood at or below 2 for 2 consecutive entries."
    );
}

#[test]
fn rule_matches_single_record() {
    let rule = MetricThresholdRule::tachycardia();
    let mut record = DailyRecord::new(1, start_day());
    assert!(!rule.matches(&record));
    record.bpm = Some(100);
    assert!(rule.matches(&record));
}

#[test]
fn alerts_are_localized() {
    let mut records = make_records(2);
    for record in &mut records {
        record.bpm = Some(120);
    }
    let engine = AlertEngine::default();
    let alerts = engine.evaluate(&records, "es");
    assert_eq!(alerts[0].message, "Dos días seguidos con ritmo cardiaco elevado.");
}

// ---- Aggregator ----

#[test]
fn empty_window_yields_empty_report() {
    let report = build_report(&[]);
    assert!(report.alerts.is_empty());
    assert!(report.patterns.is_empty());
    for (_, summary) in report.trend_summaries("en") {
        assert_eq!(summary, "insufficient data");
    }
}

#[test]
fn trend_summaries_follow_metric_order() {
    let report = build_report(&make_records(1));
    let labels: Vec<&str> = report
        .trend_summaries("en")
        .into_iter()
        .map(|(label, _)| label)
        .collect();
    assert_eq!(
        labels,
        vec!["Weight", "Glucose", "Mood", "Sleep hours", "Beats per minute"]
    );
}

#[test]
fn report_recomputes_for_changed_window() {
    let engine = AlertEngine::default();
    let mut records = make_records(2);
    let before = build_report_with(&records, &engine, "en");
    assert!(before.alerts.is_empty());

    for record in &mut records {
        record.bpm = Some(130);
    }
    let after = build_report_with(&records, &engine, "en");
    assert_eq!(after.alerts.len(), 1);
}

// ---- Period statistics and report ----

#[test]
fn statistics_summarize_period() {
    let mut records = with_blood_pressure(&["135/80", "120/80", "bad", "118/86"]);
    records[0].mood = Some(4);
    records[1].mood = Some(9);
    records[2].mood = Some(9);
    records[3].mood = Some(2);
    records[0].sleep_hours = Some(6.5);
    records[3].sleep_hours = Some(8.0);
    records[1].symptoms = Some("headache".to_string());
    records[2].symptoms = Some(" None ".to_string());

    let stats = summarize_statistics(&records);
    assert_eq!(stats.total_records, 4);
    assert_eq!(stats.avg_mood, Some(6.0));
    assert_eq!(stats.avg_sleep_hours, Some(7.25));
    assert_eq!(stats.max_sleep_hours, Some(8.0));
    assert_eq!(stats.min_sleep_hours, Some(6.5));
    assert!(stats.avg_glucose.is_none());

    let best = stats.best_mood_day.unwrap();
    assert_eq!(best.value, 9);
    assert_eq!(best.date, records[1].date);
    assert_eq!(stats.worst_mood_day.unwrap().value, 2);

    assert_eq!(stats.symptomatic_days, 1);
    assert_eq!(stats.high_pressure_days, 2);
}

#[test]
fn timeframe_ranges_are_inclusive() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    assert_eq!(
        Timeframe::Weekly.date_range(today),
        (NaiveDate::from_ymd_opt(2024, 5, 25).unwrap(), today)
    );
    assert_eq!(
        Timeframe::Monthly.date_range(today),
        (NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), today)
    );
}

#[test]
fn period_report_summarizes_and_renders() {
    let mut records = make_records(2);
    records[0].mood = Some(5);
    records[1].mood = Some(6);
    for record in &mut records {
        record.bpm = Some(120);
    }

    let user = UserRef {
        id: 7,
        name: "Ana".into(),
    };
    let today = start_day() + Duration::days(1);
    let generated_at = today.and_hms_opt(9, 30, 0).unwrap();
    let report = PeriodReport::build(
        user,
        Timeframe::Weekly,
        today,
        generated_at,
        &records,
        &AlertEngine::default(),
        "en",
    );

    assert_eq!(
        report.summary,
        "2 entries recorded. Average mood: 5.50. Alerts detected: 1."
    );
    assert_eq!(report.file_name("json"), "report_7_weekly_20240402.json");

    let text = report.render_text("en");
    assert!(text.starts_with("Health report - Ana (ID 7)"));
    assert!(text.contains("Period: 2024-03-27 to 2024-04-02 (weekly)"));
    assert!(text.contains("  - Average mood: 5.50"));
    assert!(text.contains("- Elevated heart rate for 2 consecutive entries."));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["timeframe"], "weekly");
    assert_eq!(json["alerts"].as_array().unwrap().len(), 1);
}

#[test]
fn empty_period_report() {
    let report = PeriodReport::build(
        UserRef {
            id: 1,
            name: "Luis".into(),
        },
        Timeframe::Monthly,
        start_day(),
        start_day().and_hms_opt(0, 0, 0).unwrap(),
        &[],
        &AlertEngine::default(),
        "en",
    );
    assert_eq!(report.summary, "No data was recorded in the selected period.");
    let text = report.render_text("en");
    assert!(text.contains("Period: 2024-03-03 to 2024-04-01 (monthly)"));
    assert!(text.contains("  - Average mood: N/A"));
    assert!(text.ends_with("  No alerts in this period."));
}

#[test]
fn period_report_renders_in_spanish() {
    let mut records = make_records(2);
    records[0].mood = Some(5);
    records[1].mood = Some(6);
    for record in &mut records {
        record.bpm = Some(120);
    }

    let today = start_day() + Duration::days(1);
    let report = PeriodReport::build(
        UserRef {
            id: 7,
            name: "Ana".into(),
        },
        Timeframe::Weekly,
        today,
        today.and_hms_opt(9, 30, 0).unwrap(),
        &records,
        &AlertEngine::default(),
        "es",
    );

    assert_eq!(
        report.summary,
        "Se registraron 2 eventos. Promedio de estado de ánimo: 5.50. Alertas detectadas: 1."
    );
    // File names and serialized fields stay locale-neutral.
    assert_eq!(report.file_name("txt"), "report_7_weekly_20240402.txt");

    let text = report.render_text("es");
    assert!(text.starts_with("Reporte de salud - Ana (ID 7)\n"));
    assert!(text.contains("Periodo: 2024-03-27 al 2024-04-02 (semanal)\n"));
    assert!(text.contains("Generado: 2024-04-02T09:30:00\n"));
    assert!(text.contains("Estadísticas:\n  - Total registros: 2\n"));
    assert!(text.contains("  - Promedio estado de ánimo: 5.50\n"));
    assert!(text.contains("  - Promedio glucosa: N/A\n"));
    assert!(text.contains("  - Mejor estado de ánimo: 6 (fecha 2024-04-02)\n"));
    assert!(text.contains("Alertas detectadas:\n- Dos días seguidos con ritmo cardiaco elevado."));
    assert!(!text.contains("Average"));
}

#[test]
fn empty_period_report_in_spanish() {
    let report = PeriodReport::build(
        UserRef {
            id: 1,
            name: "Luis".into(),
        },
        Timeframe::Monthly,
        start_day(),
        start_day().and_hms_opt(0, 0, 0).unwrap(),
        &[],
        &AlertEngine::default(),
        "es",
    );
    assert_eq!(
        report.summary,
        "No se registraron datos en el periodo seleccionado."
    );
    let text = report.render_text("es");
    assert!(text.contains("(mensual)"));
    assert!(text.ends_with("  Sin alertas en este periodo."));
}
