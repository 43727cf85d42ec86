use crate::item::{Recurrence, ScheduleItem};
use chrono::{Datelike, Duration, NaiveDate};

/// One resolved due-date instance of a schedule item. Derived on demand and
/// never persisted; two occurrences are equal when item id and date match.
#[derive(Debug, Clone, Copy)]
pub struct Occurrence<'a> {
    pub item: &'a ScheduleItem,
    pub date: NaiveDate,
}

impl PartialEq for Occurrence<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.item.id == other.item.id && self.date == other.date
    }
}

impl Eq for Occurrence<'_> {}

/// Whether `item` produces an occurrence on `date`.
///
/// Total over all well-formed items: malformed stored data (weekly with no
/// days, end before start) yields `false` rather than an error.
pub fn is_due(item: &ScheduleItem, date: NaiveDate) -> bool {
    if date < item.start_date {
        return false;
    }
    if let Some(end) = item.end_date {
        if date > end {
            return false;
        }
    }

    match item.recurrence {
        Recurrence::Once => date == item.start_date,
        Recurrence::Daily => true,
        Recurrence::Weekly => item.days_of_week.contains(&date.weekday()),
        // Day-of-month equality: months shorter than the start day simply
        // never match, so short months are skipped rather than clamped.
        Recurrence::Monthly => date.day() == item.start_date.day(),
    }
}

/// Expands `items` over the inclusive range `[range_start, range_end]` into
/// the flat occurrence list, ordered by date ascending and within a date by
/// the lexicographic `time` string. Items with equal times keep their input
/// order.
///
/// O(items × days); callers use single-day or agenda-sized ranges.
pub fn expand<'a>(
    items: &'a [ScheduleItem],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<Occurrence<'a>> {
    let mut occurrences = Vec::new();
    let mut current = range_start;
    while current <= range_end {
        let day_start = occurrences.len();
        for item in items {
            if is_due(item, current) {
                occurrences.push(Occurrence {
                    item,
                    date: current,
                });
            }
        }
        // sort_by is stable, so ties on time preserve input order
        occurrences[day_start..].sort_by(|a, b| a.item.time.cmp(&b.item.time));
        current = current + Duration::days(1);
    }
    occurrences
}

/// Single-day specialization of [`expand`]; identical ordering behavior to
/// `expand(items, date, date)`.
pub fn occurrences_for_date<'a>(
    items: &'a [ScheduleItem],
    date: NaiveDate,
) -> Vec<Occurrence<'a>> {
    expand(items, date, date)
}
