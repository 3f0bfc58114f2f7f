use serde::{Deserialize, Serialize};
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::{DailyRecord, Metric};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Stable,
    Rising,
    Falling,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Rising => write!(f, "rising"),
            TrendDirection::Falling => write!(f, "falling"),
        }
    }
}

/// Half-over-half comparison of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Mean of the recent half, rounded to 2 decimals.
    pub recent_average: f64,
    /// Recent-half mean minus earlier-half mean, rounded to 2 decimals.
    pub delta: f64,
}

impl TrendResult {
    pub fn describe(&self, locale: &str) -> String {
        let avg = format_number(self.recent_average);
        let delta = format_number(self.delta);
        match self.direction {
            TrendDirection::Stable => TRANSLATIONS
                .get(locale, "trend.stable", "Stable trend (~{avg})")
                .replace("{avg}", &avg),
            TrendDirection::Rising => TRANSLATIONS
                .get(locale, "trend.rising", "rising (+{delta}) recent average {avg}")
                .replace("{delta}", &delta)
                .replace("{avg}", &avg),
            TrendDirection::Falling => TRANSLATIONS
                .get(locale, "trend.falling", "falling ({delta}) recent average {avg}")
                .replace("{delta}", &delta)
                .replace("{avg}", &avg),
        }
    }
}

/// Classifies the direction of a chronological series of samples.
///
/// The series is split at `len / 2`: the earlier half holds the first
/// `len / 2` samples and the recent half the rest, so an odd-length series
/// gives its extra sample to the recent half. Returns `None` for fewer than
/// two samples.
///
/// # Examples
///
/// ```
/// use vitalwatch_analysis::trend::{trend_for_metric, TrendDirection};
///
/// let trend = trend_for_metric(&[70.0, 70.2, 71.0, 71.4], 0.3).unwrap();
/// assert_eq!(trend.direction, TrendDirection::Rising);
/// assert_eq!(trend.delta, 1.1);
/// assert_eq!(trend.recent_average, 71.2);
///
/// assert!(trend_for_metric(&[70.0], 0.3).is_none());
/// ```
pub fn trend_for_metric(values: &[f64], tolerance: f64) -> Option<TrendResult> {
    if values.len() < 2 {
        return None;
    }
    let (earlier, recent) = values.split_at(values.len() / 2);
    let earlier_avg = mean(earlier)?;
    let recent_avg = mean(recent)?;
    let delta = round2(recent_avg - earlier_avg);

    let direction = if delta.abs() <= tolerance {
        TrendDirection::Stable
    } else if delta > 0.0 {
        TrendDirection::Rising
    } else {
        TrendDirection::Falling
    };

    Some(TrendResult {
        direction,
        recent_average: round2(recent_avg),
        delta,
    })
}

/// Trend of `metric` over every record that reported it.
pub fn metric_trend(records: &[DailyRecord], metric: Metric) -> Option<TrendResult> {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.metric_value(metric))
        .collect();
    trend_for_metric(&values, metric.tolerance())
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rounds to 2 decimals, sending exact ties to the even neighbour
/// (`5.125` becomes `5.12`, `5.135` becomes `5.14`).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Renders a rounded value the way report readers expect: integral values
/// keep one decimal (`7.0`), others use the shortest exact form (`7.25`).
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
