use crate::item::{Recurrence, ScheduleItem};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    MissingWeeklyDays,
    EndBeforeStart {
        start: NaiveDate,
        end: NaiveDate,
    },
    InvalidTime(String),
    DuplicateId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "item title must not be empty"),
            ValidationError::MissingWeeklyDays => {
                write!(f, "weekly item requires at least one day of the week")
            }
            ValidationError::EndBeforeStart { start, end } => write!(
                f,
                "end date {end} must not precede start date {start}"
            ),
            ValidationError::InvalidTime(time) => {
                write!(f, "invalid time '{time}' (expected HH:MM, 24-hour)")
            }
            ValidationError::DuplicateId(id) => write!(f, "duplicate item id {id}"),
        }
    }
}

impl std::error::Error for ValidationError {}

fn valid_time(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hour < 24 && minute < 60
}

/// Checks the rules applied when an item is created or edited. Stored data
/// that predates a rule change is not re-validated; the resolver degrades it
/// to producing no occurrences instead.
pub fn validate_item(item: &ScheduleItem) -> Result<(), ValidationError> {
    if item.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    if item.recurrence == Recurrence::Weekly && item.days_of_week.is_empty() {
        return Err(ValidationError::MissingWeeklyDays);
    }

    if let Some(end) = item.end_date {
        if end < item.start_date {
            return Err(ValidationError::EndBeforeStart {
                start: item.start_date,
                end,
            });
        }
    }

    if !valid_time(&item.time) {
        return Err(ValidationError::InvalidTime(item.time.clone()));
    }

    Ok(())
}

pub fn validate_item_collection(items: &[ScheduleItem]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(items.len());
    for item in items {
        if !seen_ids.insert(item.id.as_str()) {
            return Err(ValidationError::DuplicateId(item.id.clone()));
        }
        validate_item(item)?;
    }
    Ok(())
}
