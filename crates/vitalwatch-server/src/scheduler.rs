use crate::config::AppConfig;
use crate::notify::{fallback_user, AlertSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use vitalwatch_analysis::engine::AlertEngine;
use vitalwatch_common::types::UserRef;
use vitalwatch_storage::error::Result;
use vitalwatch_storage::RecordStore;

/// Outcome of one pass over all users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Users that had records and were evaluated.
    pub users_checked: usize,
    /// Users with at least one alert delivered.
    pub users_alerted: usize,
    /// Users skipped because their records could not be loaded.
    pub users_failed: usize,
}

struct AlertCycle {
    store: Arc<dyn RecordStore>,
    sink: Arc<dyn AlertSink>,
    engine: Arc<AlertEngine>,
    records_per_user: usize,
    locale: String,
}

impl AlertCycle {
    fn run(&self) -> Result<CycleSummary> {
        let user_ids = self.store.get_all_user_ids()?;
        let mut summary = CycleSummary::default();

        for user_id in user_ids {
            let records = match self
                .store
                .get_records_for_analysis(user_id, self.records_per_user)
            {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(user_id, error = %e, "Failed to load records, skipping user");
                    summary.users_failed += 1;
                    continue;
                }
            };
            if records.is_empty() {
                continue;
            }
            summary.users_checked += 1;

            let alerts = self.engine.evaluate(&records, &self.locale);
            if alerts.is_empty() {
                continue;
            }

            let user = self.resolve_user(user_id);
            self.sink.deliver(&user, &alerts);
            summary.users_alerted += 1;
        }

        Ok(summary)
    }

    fn resolve_user(&self, user_id: i64) -> UserRef {
        match self.store.get_user_by_id(user_id) {
            Ok(Some(user)) => UserRef::from(&user),
            Ok(None) => fallback_user(user_id, &self.locale),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to load user, using fallback name");
                fallback_user(user_id, &self.locale)
            }
        }
    }
}

struct Worker {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Periodically evaluates the alert rules for every user in the background.
///
/// At most one worker runs per scheduler: `start` on a running scheduler is
/// a no-op. Cancellation is cooperative. The pause between passes ends as
/// soon as `stop` signals, but a pass already in progress runs to
/// completion. Dropping the scheduler also ends the worker after its
/// current pass.
pub struct AlertScheduler {
    cycle: Arc<AlertCycle>,
    stop_timeout: Duration,
    worker: Option<Worker>,
}

impl AlertScheduler {
    pub fn new(
        store: Arc<dyn RecordStore>,
        sink: Arc<dyn AlertSink>,
        engine: Arc<AlertEngine>,
        records_per_user: usize,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            cycle: Arc::new(AlertCycle {
                store,
                sink,
                engine,
                records_per_user,
                locale: locale.into(),
            }),
            stop_timeout: Duration::from_secs(1),
            worker: None,
        }
    }

    pub fn from_config(
        store: Arc<dyn RecordStore>,
        sink: Arc<dyn AlertSink>,
        engine: Arc<AlertEngine>,
        config: &AppConfig,
    ) -> Self {
        Self::new(
            store,
            sink,
            engine,
            config.alerts.records_per_user,
            config.locale.clone(),
        )
        .with_stop_timeout(Duration::from_millis(config.alerts.stop_timeout_ms))
    }

    /// Upper bound on how long [`stop`](Self::stop) waits for the worker.
    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Runs a single pass synchronously. Per-user failures are logged and
    /// counted; only a failure to list users is returned.
    pub fn run_cycle(&self) -> Result<CycleSummary> {
        self.cycle.run()
    }

    /// Starts the background loop with a pause of `interval_secs` (at least
    /// one second) between passes. Returns false if already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self, interval_secs: u64) -> bool {
        self.start_every(Duration::from_secs(interval_secs.max(1)))
    }

    /// Like [`start`](Self::start) with an arbitrary non-zero interval.
    pub fn start_every(&mut self, interval: Duration) -> bool {
        if self.is_running() {
            tracing::debug!("Alert scheduler already running");
            return false;
        }

        let interval = interval.max(Duration::from_millis(1));
        let (cancel, mut cancelled) = watch::channel(false);
        let cycle = self.cycle.clone();

        let handle = tokio::spawn(async move {
            tracing::info!(
                interval_secs = interval.as_secs_f64(),
                records_per_user = cycle.records_per_user,
                "Alert scheduler started"
            );
            loop {
                if *cancelled.borrow() {
                    break;
                }
                // Store reads block, so the pass runs off the async workers.
                let pass = cycle.clone();
                match tokio::task::spawn_blocking(move || pass.run()).await {
                    Ok(Ok(summary)) => tracing::debug!(
                        users_checked = summary.users_checked,
                        users_alerted = summary.users_alerted,
                        users_failed = summary.users_failed,
                        "Alert cycle finished"
                    ),
                    Ok(Err(e)) => tracing::error!(error = %e, "Alert cycle failed"),
                    Err(e) => tracing::error!(error = %e, "Alert cycle panicked"),
                }
                // A closed channel means the scheduler was dropped.
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = cancelled.changed() => break,
                }
            }
            tracing::info!("Alert scheduler stopped");
        });

        self.worker = Some(Worker { cancel, handle });
        true
    }

    /// Signals the worker and waits up to the stop timeout for it to exit.
    /// The scheduler is idle afterwards even if the worker is still
    /// finishing a pass; such a worker is detached and exits once the pass
    /// returns.
    pub async fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.cancel.send(true);

        match tokio::time::timeout(self.stop_timeout, worker.handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Alert scheduler task panicked"),
            Err(_) => tracing::warn!(
                timeout_ms = self.stop_timeout.as_millis() as u64,
                "Alert scheduler did not stop in time, detaching"
            ),
        }
    }
}
