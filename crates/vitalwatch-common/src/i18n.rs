//! Lightweight i18n translation registry.
//!
//! Provides a centralized, static translation map keyed by `(locale, message_key)`.
//! Supported locales: `en`, `es`. No external i18n framework dependency.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Default locale when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Supported locales.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es"];

/// Central translation registry.
pub struct Translations {
    map: HashMap<(&'static str, &'static str), &'static str>,
}

impl Translations {
    /// Get a translated string for the given locale and key.
    /// Falls back to `en` if the locale is not found, then to the provided default.
    pub fn get<'a>(&self, locale: &str, key: &str, default: &'a str) -> &'a str {
        if let Some(&val) = self.map.get(&(locale, key)) {
            return val;
        }
        if locale != "en" {
            if let Some(&val) = self.map.get(&("en", key)) {
                return val;
            }
        }
        default
    }
}

/// Global translation singleton.
pub static TRANSLATIONS: LazyLock<Translations> = LazyLock::new(|| {
    let mut map = HashMap::new();

    macro_rules! t {
        ($locale:expr, $key:expr, $val:expr) => {
            map.insert(($locale, $key), $val);
        };
    }

    // ---- Metric labels ----

    t!("en", "metric.weight", "Weight");
    t!("es", "metric.weight", "Peso");
    t!("en", "metric.glucose", "Glucose");
    t!("es", "metric.glucose", "Glucosa");
    t!("en", "metric.mood", "Mood");
    t!("es", "metric.mood", "Estado de ánimo");
    t!("en", "metric.sleep_hours", "Sleep hours");
    t!("es", "metric.sleep_hours", "Horas de sueño");
    t!("en", "metric.bpm", "Beats per minute");
    t!("es", "metric.bpm", "Latidos por minuto");

    // ---- Trend summaries ----

    t!("en", "trend.insufficient", "insufficient data");
    t!("es", "trend.insufficient", "Sin datos suficientes.");
    t!("en", "trend.stable", "Stable trend (~{avg})");
    t!("es", "trend.stable", "Tendencia estable (~{avg})");
    t!("en", "trend.rising", "rising (+{delta}) recent average {avg}");
    t!("es", "trend.rising", "al alza (+{delta}) promedio reciente {avg}");
    t!("en", "trend.falling", "falling ({delta}) recent average {avg}");
    t!("es", "trend.falling", "a la baja ({delta}) promedio reciente {avg}");

    // ---- Behavior patterns ----

    t!(
        "en",
        "pattern.sleep_mood",
        "Sleeping less than 6 hours appears to be associated with low mood."
    );
    t!(
        "es",
        "pattern.sleep_mood",
        "Se detecta que dormir menos de 6 horas se asocia con estados de ánimo bajos."
    );
    t!(
        "en",
        "pattern.sedentary_weight",
        "Weight has increased while days without physical activity predominate."
    );
    t!(
        "es",
        "pattern.sedentary_weight",
        "El peso ha aumentado mientras predominan días sin actividad física."
    );
    t!(
        "en",
        "pattern.frequent_high_glucose",
        "Frequent elevated glucose readings observed. Review your diet."
    );
    t!(
        "es",
        "pattern.frequent_high_glucose",
        "Se observan valores frecuentes de glucosa elevados. Revisa tu alimentación."
    );

    // ---- Alerts ----

    t!(
        "en",
        "alert.high_blood_pressure",
        "Elevated blood pressure for 3 consecutive entries."
    );
    t!(
        "es",
        "alert.high_blood_pressure",
        "Tres días consecutivos con presión arterial elevada."
    );
    t!(
        "en",
        "alert.high_glucose",
        "Elevated glucose for 3 consecutive entries. Consider consulting a doctor."
    );
    t!(
        "es",
        "alert.high_glucose",
        "Tres días seguidos con glucosa elevada. Considera consultar al médico."
    );
    t!("en", "alert.low_sleep", "Low sleep for 3 consecutive entries.");
    t!(
        "es",
        "alert.low_sleep",
        "Pocas horas de sueño durante tres días consecutivos."
    );
    t!(
        "en",
        "alert.tachycardia",
        "Elevated heart rate for 2 consecutive entries."
    );
    t!(
        "es",
        "alert.tachycardia",
        "Dos días seguidos con ritmo cardiaco elevado."
    );

    // ---- Console rendering ----

    t!("en", "analysis.title", "Health analysis: {title}");
    t!("es", "analysis.title", "Análisis de salud: {title}");
    t!("en", "analysis.trends", "Trends:");
    t!("es", "analysis.trends", "Tendencias:");
    t!("en", "analysis.patterns", "Detected patterns:");
    t!("es", "analysis.patterns", "Patrones detectados:");
    t!("en", "analysis.no_patterns", "No significant patterns.");
    t!("es", "analysis.no_patterns", "Sin patrones significativos.");
    t!("en", "analysis.alerts", "Alerts:");
    t!("es", "analysis.alerts", "Alertas:");
    t!("en", "analysis.no_alerts", "No recent alerts detected.");
    t!("es", "analysis.no_alerts", "No se detectaron alertas recientes.");
    t!("en", "analysis.window", "{name} (last {count} records)");
    t!("es", "analysis.window", "{name} (últimos {count} registros)");
    t!("en", "analysis.empty", "Not enough records yet to build an analysis.");
    t!(
        "es",
        "analysis.empty",
        "Aún no hay registros suficientes para generar un análisis."
    );

    // ---- Period report ----

    t!("en", "timeframe.weekly", "weekly");
    t!("es", "timeframe.weekly", "semanal");
    t!("en", "timeframe.monthly", "monthly");
    t!("es", "timeframe.monthly", "mensual");
    t!("en", "report.not_available", "N/A");
    t!("es", "report.not_available", "N/A");
    t!(
        "en",
        "report.summary_empty",
        "No data was recorded in the selected period."
    );
    t!(
        "es",
        "report.summary_empty",
        "No se registraron datos en el periodo seleccionado."
    );
    t!(
        "en",
        "report.summary",
        "{count} entries recorded. Average mood: {mood}. Alerts detected: {alerts}."
    );
    t!(
        "es",
        "report.summary",
        "Se registraron {count} eventos. Promedio de estado de ánimo: {mood}. Alertas detectadas: {alerts}."
    );
    t!("en", "report.title", "Health report - {name} (ID {id})");
    t!("es", "report.title", "Reporte de salud - {name} (ID {id})");
    t!("en", "report.period", "Period: {start} to {end} ({timeframe})");
    t!("es", "report.period", "Periodo: {start} al {end} ({timeframe})");
    t!("en", "report.generated", "Generated: {at}");
    t!("es", "report.generated", "Generado: {at}");
    t!("en", "report.statistics", "Statistics:");
    t!("es", "report.statistics", "Estadísticas:");
    t!("en", "report.total_records", "Total records");
    t!("es", "report.total_records", "Total registros");
    t!("en", "report.avg_sleep", "Average sleep hours");
    t!("es", "report.avg_sleep", "Promedio horas de sueño");
    t!("en", "report.avg_mood", "Average mood");
    t!("es", "report.avg_mood", "Promedio estado de ánimo");
    t!("en", "report.avg_glucose", "Average glucose");
    t!("es", "report.avg_glucose", "Promedio glucosa");
    t!("en", "report.avg_weight", "Average weight");
    t!("es", "report.avg_weight", "Promedio peso");
    t!("en", "report.avg_bpm", "Average BPM");
    t!("es", "report.avg_bpm", "Promedio BPM");
    t!("en", "report.symptomatic_days", "Days with symptoms");
    t!("es", "report.symptomatic_days", "Días con síntomas");
    t!("en", "report.high_pressure_days", "Days with high blood pressure");
    t!("es", "report.high_pressure_days", "Días con presión alta");
    t!("en", "report.best_mood", "Best mood: {value} (date {date})");
    t!("es", "report.best_mood", "Mejor estado de ánimo: {value} (fecha {date})");
    t!("en", "report.worst_mood", "Worst mood: {value} (date {date})");
    t!("es", "report.worst_mood", "Peor estado de ánimo: {value} (fecha {date})");
    t!("en", "report.alerts", "Detected alerts:");
    t!("es", "report.alerts", "Alertas detectadas:");
    t!("en", "report.no_alerts", "No alerts in this period.");
    t!("es", "report.no_alerts", "Sin alertas en este periodo.");

    // ---- Scheduler ----

    t!("en", "scheduler.header", "[AUTOMATIC ALERT] {user} (ID {id})");
    t!("es", "scheduler.header", "[ALERTA AUTOMÁTICA] {user} (ID {id})");
    t!("en", "user.fallback", "User {id}");
    t!("es", "user.fallback", "Usuario {id}");

    Translations { map }
});

/// Check if a locale is supported.
pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Normalize locale: return the locale if supported, otherwise return the default.
pub fn normalize_locale(locale: &str) -> &str {
    if is_supported_locale(locale) {
        locale
    } else {
        DEFAULT_LOCALE
    }
}
