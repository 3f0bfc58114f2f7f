use crate::engine::AlertEngine;
use crate::stats::{summarize_statistics, PeriodStatistics};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::{DailyRecord, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Weekly,
    Monthly,
}

impl Timeframe {
    /// Inclusive `(start, end)` range ending on `today`: the last 7 days for
    /// a weekly report, the last 30 for a monthly one.
    pub fn date_range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let span = match self {
            Timeframe::Weekly => 6,
            Timeframe::Monthly => 29,
        };
        (today - Duration::days(span), today)
    }

    /// Localized name used in rendered report text.
    pub fn label(self, locale: &str) -> &'static str {
        match self {
            Timeframe::Weekly => TRANSLATIONS.get(locale, "timeframe.weekly", "weekly"),
            Timeframe::Monthly => TRANSLATIONS.get(locale, "timeframe.monthly", "monthly"),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Weekly => write!(f, "weekly"),
            Timeframe::Monthly => write!(f, "monthly"),
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" | "week" => Ok(Timeframe::Weekly),
            "monthly" | "month" => Ok(Timeframe::Monthly),
            _ => Err(format!("unknown timeframe: {s}")),
        }
    }
}

/// Exportable summary of one user's records over a weekly or monthly period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub user: UserRef,
    pub timeframe: Timeframe,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub stats: PeriodStatistics,
    pub alerts: Vec<String>,
    pub summary: String,
}

impl PeriodReport {
    /// Builds the report from the records that fall inside
    /// `timeframe.date_range(today)`, oldest first. Alert texts and the
    /// summary are written in `locale`.
    pub fn build(
        user: UserRef,
        timeframe: Timeframe,
        today: NaiveDate,
        generated_at: NaiveDateTime,
        records: &[DailyRecord],
        engine: &AlertEngine,
        locale: &str,
    ) -> Self {
        let (start_date, end_date) = timeframe.date_range(today);
        let stats = summarize_statistics(records);
        let alerts: Vec<String> = engine
            .evaluate(records, locale)
            .into_iter()
            .map(|a| a.message)
            .collect();

        let summary = if stats.total_records == 0 {
            TRANSLATIONS
                .get(
                    locale,
                    "report.summary_empty",
                    "No data was recorded in the selected period.",
                )
                .to_string()
        } else {
            TRANSLATIONS
                .get(
                    locale,
                    "report.summary",
                    "{count} entries recorded. Average mood: {mood}. Alerts detected: {alerts}.",
                )
                .replace("{count}", &stats.total_records.to_string())
                .replace("{mood}", &optional(stats.avg_mood, locale))
                .replace("{alerts}", &alerts.len().to_string())
        };

        Self {
            user,
            timeframe,
            start_date,
            end_date,
            generated_at,
            stats,
            alerts,
            summary,
        }
    }

    /// Suggested export file name, e.g. `report_7_weekly_20240510.json`.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "report_{}_{}_{}.{extension}",
            self.user.id,
            self.timeframe,
            self.end_date.format("%Y%m%d")
        )
    }

    /// Plain-text rendering with headings in `locale`.
    pub fn render_text(&self, locale: &str) -> String {
        let t = |key: &str, default: &'static str| TRANSLATIONS.get(locale, key, default);
        let s = &self.stats;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{}",
            t("report.title", "Health report - {name} (ID {id})")
                .replace("{name}", &self.user.name)
                .replace("{id}", &self.user.id.to_string())
        );
        let _ = writeln!(
            out,
            "{}",
            t("report.period", "Period: {start} to {end} ({timeframe})")
                .replace("{start}", &self.start_date.to_string())
                .replace("{end}", &self.end_date.to_string())
                .replace("{timeframe}", self.timeframe.label(locale))
        );
        let _ = writeln!(
            out,
            "{}",
            t("report.generated", "Generated: {at}").replace(
                "{at}",
                &self.generated_at.format("%Y-%m-%dT%H:%M:%S").to_string()
            )
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.summary);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", t("report.statistics", "Statistics:"));

        let lines = [
            (t("report.total_records", "Total records"), s.total_records.to_string()),
            (t("report.avg_sleep", "Average sleep hours"), optional(s.avg_sleep_hours, locale)),
            (t("report.avg_mood", "Average mood"), optional(s.avg_mood, locale)),
            (t("report.avg_glucose", "Average glucose"), optional(s.avg_glucose, locale)),
            (t("report.avg_weight", "Average weight"), optional(s.avg_weight, locale)),
            (t("report.avg_bpm", "Average BPM"), optional(s.avg_bpm, locale)),
            (t("report.symptomatic_days", "Days with symptoms"), s.symptomatic_days.to_string()),
            (
                t("report.high_pressure_days", "Days with high blood pressure"),
                s.high_pressure_days.to_string(),
            ),
        ];
        for (label, value) in lines {
            let _ = writeln!(out, "  - {label}: {value}");
        }

        let mood_days = [
            (s.best_mood_day, t("report.best_mood", "Best mood: {value} (date {date})")),
            (s.worst_mood_day, t("report.worst_mood", "Worst mood: {value} (date {date})")),
        ];
        for (day, template) in mood_days {
            if let Some(day) = day {
                let _ = writeln!(
                    out,
                    "  - {}",
                    template
                        .replace("{value}", &day.value.to_string())
                        .replace("{date}", &day.date.to_string())
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", t("report.alerts", "Detected alerts:"));
        if self.alerts.is_empty() {
            let _ = writeln!(out, "  {}", t("report.no_alerts", "No alerts in this period."));
        }
        for alert in &self.alerts {
            let _ = writeln!(out, "- {alert}");
        }

        out.truncate(out.trim_end().len());
        out
    }
}

fn optional(value: Option<f64>, locale: &str) -> String {
    value.map_or_else(
        || TRANSLATIONS.get(locale, "report.not_available", "N/A").to_string(),
        |v| format!("{v:.2}"),
    )
}
