use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of care obligation an item represents. Classification only;
/// recurrence behaves identically across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medication,
    Care,
    Appointment,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Medication => "medication",
            Category::Care => "care",
            Category::Appointment => "appointment",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "medication" => Some(Category::Medication),
            "care" => Some(Category::Care),
            "appointment" => Some(Category::Appointment),
            _ => None,
        }
    }
}

/// How often an item produces occurrences after its start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// A single occurrence on the start date.
    Once,
    Daily,
    /// Due on the weekdays listed in `days_of_week`.
    Weekly,
    /// Due on the start date's day-of-month. Months without that day are
    /// skipped, never clamped to their last day.
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Once => "once",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "once" => Some(Recurrence::Once),
            "daily" => Some(Recurrence::Daily),
            "weekly" => Some(Recurrence::Weekly),
            "monthly" => Some(Recurrence::Monthly),
            _ => None,
        }
    }
}

/// A stored schedule template: one recurring or one-off care obligation
/// together with its per-date completion ledger.
///
/// The ledger (`completed_dates`) is keyed independently of the recurrence
/// rule: narrowing the rule later never invalidates historical completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub category: Category,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub start_date: NaiveDate,
    /// `HH:MM`, 24-hour, zero-padded. Used only to order items within a day;
    /// zero-padding makes lexicographic order equal clock order.
    pub time: String,
    pub recurrence: Recurrence,
    /// Meaningful only when `recurrence` is `Weekly`. An empty set matches
    /// no day at all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<Weekday>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Presence of a date key means the occurrence on that date was marked
    /// done. Keys serialize as canonical `YYYY-MM-DD` strings.
    #[serde(default)]
    pub completed_dates: BTreeMap<NaiveDate, bool>,
}

impl ScheduleItem {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        start_date: NaiveDate,
        time: impl Into<String>,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            detail: None,
            start_date,
            time: time.into(),
            recurrence,
            days_of_week: Vec::new(),
            end_date: None,
            completed_dates: BTreeMap::new(),
        }
    }
}
