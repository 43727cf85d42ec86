use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Audit entry appended when an occurrence is marked done. Exactly one record
/// per completed transition; un-completing appends nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub item_id: String,
    pub title: String,
    /// The occurrence date that was completed, not the wall-clock date.
    pub date: NaiveDate,
    pub recorded_at: NaiveDateTime,
}
