use crate::item::ScheduleItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classification of a completion toggle. The caller decides what to do with
/// it; the canonical audit policy records `Completed` transitions only, since
/// un-completing is corrective rather than a care event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// incomplete -> completed
    Completed,
    /// completed -> incomplete
    Uncompleted,
}

impl Transition {
    /// Whether this transition warrants an audit entry.
    pub fn is_noteworthy(&self) -> bool {
        matches!(self, Transition::Completed)
    }
}

/// Flips the completion state of the occurrence on `date`, returning the
/// updated item and the transition that happened.
///
/// Copy-on-write: the input is never mutated; callers must replace their
/// stored item with the returned one. The date is not checked against the
/// recurrence rule; completion state stays valid even if the rule is later
/// narrowed.
pub fn toggle(item: &ScheduleItem, date: NaiveDate) -> (ScheduleItem, Transition) {
    let mut updated = item.clone();
    let transition = if updated.completed_dates.remove(&date).is_some() {
        Transition::Uncompleted
    } else {
        updated.completed_dates.insert(date, true);
        Transition::Completed
    };
    (updated, transition)
}

/// Whether the occurrence on `date` has been marked done.
pub fn is_completed(item: &ScheduleItem, date: NaiveDate) -> bool {
    item.completed_dates.contains_key(&date)
}
