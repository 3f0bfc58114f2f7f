use crate::config::SeedFile;
use anyhow::{Context, Result};
use vitalwatch_storage::SqliteRecordStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users_created: usize,
    pub users_failed: usize,
    pub records_created: usize,
    /// Records rejected for holding an out-of-range value.
    pub records_skipped: usize,
}

pub fn read_seed_file(path: &str) -> Result<SeedFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file '{path}'"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse seed file '{path}'"))
}

/// Inserts every user of `seed` and their records. A user that cannot be
/// created is logged and skipped together with its records. Records with a
/// value outside [`Metric::accepts`](vitalwatch_common::types::Metric::accepts)
/// are logged and skipped.
pub fn apply_seed(store: &SqliteRecordStore, seed: SeedFile) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for user in seed.users {
        let user_id = match store.insert_user(&user.name, user.age, user.email.as_deref(), &user.role)
        {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(name = %user.name, error = %e, "Failed to create user");
                summary.users_failed += 1;
                continue;
            }
        };
        tracing::info!(name = %user.name, user_id, "User created");
        summary.users_created += 1;

        for record in user.records {
            let date = record.date;
            let record = record.into_record(user_id);
            if let Some(metric) = record.out_of_range_metric() {
                tracing::warn!(user_id, %date, %metric, "Record value out of range, skipping");
                summary.records_skipped += 1;
                continue;
            }
            match store.insert_record(&record) {
                Ok(_) => summary.records_created += 1,
                Err(e) => {
                    tracing::warn!(user_id, %date, error = %e, "Failed to insert record")
                }
            }
        }
    }

    summary
}
