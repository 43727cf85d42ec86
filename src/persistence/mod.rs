use crate::item::ScheduleItem;
use crate::item_validation;
use crate::schedule::CareSchedule;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
    NotFound,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::NotFound => write!(f, "no schedule stored"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub trait ScheduleStore {
    fn save_schedule(&self, schedule: &CareSchedule) -> PersistenceResult<()>;
    fn load_schedule(&self) -> PersistenceResult<Option<CareSchedule>>;
}

pub fn validate_items(items: &[ScheduleItem]) -> PersistenceResult<()> {
    item_validation::validate_item_collection(items)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

/// Structural check applied when loading. Per-item rule violations in stored
/// data (a weekly item with no days, an end date before the start) are
/// tolerated here; the resolver degrades them to producing no occurrences.
/// Duplicate ids are not tolerated, they corrupt lookups.
pub fn check_loaded_items(items: &[ScheduleItem]) -> PersistenceResult<()> {
    let mut seen_ids = std::collections::HashSet::with_capacity(items.len());
    for item in items {
        if !seen_ids.insert(item.id.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate item id {}",
                item.id
            )));
        }
    }
    Ok(())
}

pub fn validate_schedule(schedule: &CareSchedule) -> PersistenceResult<()> {
    validate_items(schedule.items())
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    load_schedule_from_csv, load_schedule_from_json, save_schedule_to_csv, save_schedule_to_json,
};
