use std::fmt::Write;
use vitalwatch_analysis::report::AnalysisReport;
use vitalwatch_common::i18n::TRANSLATIONS;

const BULLET: &str = "  • ";

/// Title for an analysis over the last `count` records of `name`.
pub fn analysis_title(name: &str, count: usize, locale: &str) -> String {
    TRANSLATIONS
        .get(locale, "analysis.window", "{name} (last {count} records)")
        .replace("{name}", name)
        .replace("{count}", &count.to_string())
}

/// Renders an analysis as the console block shown to users.
pub fn render_analysis(report: &AnalysisReport, title: &str, locale: &str) -> String {
    let t = |key: &str, default: &'static str| TRANSLATIONS.get(locale, key, default);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        t("analysis.title", "Health analysis: {title}").replace("{title}", title)
    );
    let _ = writeln!(out, "{}", t("analysis.trends", "Trends:"));
    for (label, summary) in report.trend_summaries(locale) {
        let _ = writeln!(out, "{BULLET}{label}: {summary}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", t("analysis.patterns", "Detected patterns:"));
    if report.patterns.is_empty() {
        let _ = writeln!(
            out,
            "{BULLET}{}",
            t("analysis.no_patterns", "No significant patterns.")
        );
    }
    for pattern in &report.patterns {
        let _ = writeln!(out, "{BULLET}{pattern}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", t("analysis.alerts", "Alerts:"));
    if report.alerts.is_empty() {
        let _ = writeln!(
            out,
            "{BULLET}{}",
            t("analysis.no_alerts", "No recent alerts detected.")
        );
    }
    for alert in &report.alerts {
        let _ = writeln!(out, "{BULLET}{alert}");
    }

    out
}
