use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vitalwatch_analysis::engine::AlertEngine;
use vitalwatch_analysis::period::{PeriodReport, Timeframe};
use vitalwatch_analysis::report::build_report_with;
use vitalwatch_common::i18n::TRANSLATIONS;
use vitalwatch_common::types::UserRef;
use vitalwatch_storage::{RecordStore, SqliteRecordStore};

use vitalwatch_server::config::AppConfig;
use vitalwatch_server::console;
use vitalwatch_server::export::{self, ReportFormat};
use vitalwatch_server::notify::{fallback_user, ConsoleAlertSink};
use vitalwatch_server::scheduler::AlertScheduler;
use vitalwatch_server::seed;

const DEFAULT_CONFIG_PATH: &str = "config/vitalwatch.toml";

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  vitalwatch [config.toml]                                       Run the alert scheduler");
    eprintln!("  vitalwatch analyze <config.toml> <user_id> [--admin]           Print a user's health analysis");
    eprintln!("  vitalwatch report <config.toml> <user_id> [weekly|monthly] [json|txt] [--out <dir>]");
    eprintln!("                                                                 Print or save a period report");
    eprintln!("  vitalwatch seed <config.toml> <seed.json>                      Load users and records from a seed file");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vitalwatch=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("analyze") => {
            let (config_path, user_id) = config_and_user(&args, "analyze")?;
            let admin = args[4..].iter().any(|a| a == "--admin");
            run_analyze(config_path, user_id, admin)
        }
        Some("report") => {
            let (config_path, user_id) = config_and_user(&args, "report")?;
            let mut out_dir = None;
            let mut positional = Vec::new();
            let mut rest = args[4..].iter();
            while let Some(arg) = rest.next() {
                if arg == "--out" {
                    let dir = rest.next().ok_or_else(|| {
                        print_usage();
                        anyhow::anyhow!("--out requires a directory argument")
                    })?;
                    out_dir = Some(PathBuf::from(dir));
                } else {
                    positional.push(arg.as_str());
                }
            }
            let timeframe = match positional.first() {
                Some(s) => s.parse::<Timeframe>().map_err(anyhow::Error::msg)?,
                None => Timeframe::Weekly,
            };
            let format = match positional.get(1) {
                Some(s) => s.parse::<ReportFormat>().map_err(|e| {
                    print_usage();
                    anyhow::Error::msg(e)
                })?,
                None => ReportFormat::Txt,
            };
            run_report(config_path, user_id, timeframe, format, out_dir.as_deref())
        }
        Some("seed") => {
            let config_path = args.get(2).ok_or_else(|| {
                print_usage();
                anyhow::anyhow!("seed requires <config.toml> and <seed.json> arguments")
            })?;
            let seed_path = args.get(3).ok_or_else(|| {
                print_usage();
                anyhow::anyhow!("seed requires <seed.json> argument")
            })?;
            run_seed(config_path, seed_path)
        }
        Some("--help" | "-h") => {
            print_usage();
            Ok(())
        }
        _ => {
            let config_path = args
                .get(1)
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_CONFIG_PATH);
            run_scheduler(config_path).await
        }
    }
}

/// Extracts `<config.toml> <user_id>` for subcommands that take both.
fn config_and_user<'a>(args: &'a [String], command: &str) -> Result<(&'a str, i64)> {
    let config_path = args.get(2).ok_or_else(|| {
        print_usage();
        anyhow::anyhow!("{command} requires <config.toml> and <user_id> arguments")
    })?;
    let user_id = args
        .get(3)
        .ok_or_else(|| {
            print_usage();
            anyhow::anyhow!("{command} requires <user_id> argument")
        })?
        .parse::<i64>()
        .context("user_id must be an integer")?;
    Ok((config_path, user_id))
}

fn load_config(path: &str) -> Result<AppConfig> {
    AppConfig::load(path).with_context(|| format!("Failed to load config '{path}'"))
}

fn open_store(config: &AppConfig) -> Result<SqliteRecordStore> {
    SqliteRecordStore::open(&config.database.path).with_context(|| {
        format!(
            "Failed to open database '{}'",
            config.database.path.display()
        )
    })
}

fn lookup_user(store: &dyn RecordStore, user_id: i64, locale: &str) -> Result<UserRef> {
    Ok(store
        .get_user_by_id(user_id)?
        .map(|u| UserRef::from(&u))
        .unwrap_or_else(|| fallback_user(user_id, locale)))
}

#[allow(clippy::print_stdout)]
fn run_analyze(config_path: &str, user_id: i64, admin: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let locale = config.locale.as_str();

    let limit = if admin {
        config.analysis.admin_records_limit
    } else {
        config.analysis.user_records_limit
    };
    let records = store.get_records_for_analysis(user_id, limit)?;
    if records.is_empty() {
        println!(
            "{}",
            TRANSLATIONS.get(
                locale,
                "analysis.empty",
                "Not enough records yet to build an analysis."
            )
        );
        return Ok(());
    }

    let user = lookup_user(&store, user_id, locale)?;
    let engine = AlertEngine::with_default_rules();
    let report = build_report_with(&records, &engine, locale);
    let title = console::analysis_title(&user.name, records.len(), locale);
    println!("\n{}", console::render_analysis(&report, &title, locale));
    Ok(())
}

#[allow(clippy::print_stdout)]
fn run_report(
    config_path: &str,
    user_id: i64,
    timeframe: Timeframe,
    format: ReportFormat,
    out_dir: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let locale = config.locale.as_str();

    let now = Local::now().naive_local();
    let today = now.date();
    let (from, to) = timeframe.date_range(today);
    let records = store.get_records_in_range(user_id, from, to)?;
    let user = lookup_user(&store, user_id, locale)?;

    let engine = AlertEngine::with_default_rules();
    let report = PeriodReport::build(user, timeframe, today, now, &records, &engine, locale);
    tracing::info!(
        user_id,
        %timeframe,
        records = records.len(),
        "Period report generated"
    );

    match out_dir {
        Some(dir) => {
            let path = export::write_report(&report, dir, format, locale)?;
            tracing::info!(path = %path.display(), "Period report saved");
        }
        None => println!("{}", export::render_report(&report, format, locale)?),
    }
    Ok(())
}

fn run_seed(config_path: &str, seed_path: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let seed_file = seed::read_seed_file(seed_path)?;

    let summary = seed::apply_seed(&store, seed_file);
    tracing::info!(
        users_created = summary.users_created,
        users_failed = summary.users_failed,
        records_created = summary.records_created,
        records_skipped = summary.records_skipped,
        "Seed complete"
    );
    Ok(())
}

async fn run_scheduler(config_path: &str) -> Result<()> {
    let config = if Path::new(config_path).exists() {
        load_config(config_path)?
    } else {
        tracing::warn!(path = config_path, "Config file not found, using defaults");
        AppConfig::default()
    };

    tracing::info!(
        db = %config.database.path.display(),
        locale = %config.locale,
        alerts_enabled = config.alerts.enabled,
        "vitalwatch starting"
    );

    let store: Arc<dyn RecordStore> = Arc::new(open_store(&config)?);
    let sink = Arc::new(ConsoleAlertSink::new(config.locale.clone()));
    let engine = Arc::new(AlertEngine::with_default_rules());
    let mut scheduler = AlertScheduler::from_config(store, sink, engine, &config);

    if config.alerts.enabled {
        scheduler.start(config.alerts.interval_secs);
    } else {
        tracing::info!("Alert scheduler disabled");
    }

    signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutting down gracefully");

    scheduler.stop().await;
    tracing::info!("vitalwatch stopped");
    Ok(())
}
