//! Record storage for users and daily health records.
//!
//! The analysis core only reads through the [`RecordStore`] trait. The
//! default implementation ([`sqlite::SqliteRecordStore`]) keeps users,
//! roles and daily records in a single SQLite database.

pub mod error;
pub mod sqlite;


use chrono::NaiveDate;
use error::Result;
use vitalwatch_common::types::{DailyRecord, UserInfo};

pub use sqlite::SqliteRecordStore;

/// Read access to users and their daily records.
///
/// Implementations must be safe to share across threads (`Send + Sync`)
/// because the store is read from both the interactive flow and the
/// background alert scheduler.
pub trait RecordStore: Send + Sync {
    /// IDs of every registered user, ascending.
    fn get_all_user_ids(&self) -> Result<Vec<i64>>;

    /// The `limit` most recent records of a user, returned oldest first.
    /// Same-day records are ordered by insertion.
    fn get_records_for_analysis(&self, user_id: i64, limit: usize) -> Result<Vec<DailyRecord>>;

    /// Records of a user dated within `from..=to`, oldest first.
    fn get_records_in_range(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyRecord>>;

    /// Looks up a user, returning `None` if the ID is unknown.
    fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserInfo>>;
}
