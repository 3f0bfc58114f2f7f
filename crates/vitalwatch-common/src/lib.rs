//! Shared data model for the vitalwatch workspace: daily health records,
//! tracked metrics, severities and the message translation table.

pub mod i18n;
pub mod types;
