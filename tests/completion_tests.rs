use care_schedule::{
    CareSchedule, Category, Recurrence, ScheduleItem, Transition, is_completed, toggle,
};
use chrono::NaiveDate;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn med(id: &str) -> ScheduleItem {
    ScheduleItem::new(
        id,
        Category::Medication,
        "Blood pressure pill",
        ymd(2025, 1, 1),
        "08:00",
        Recurrence::Daily,
    )
}

#[test]
fn toggle_marks_and_unmarks_without_mutating_input() {
    let item = med("m1");
    let date = ymd(2025, 1, 5);

    let (completed, transition) = toggle(&item, date);
    assert_eq!(transition, Transition::Completed);
    assert!(is_completed(&completed, date));
    // copy-on-write: the original is untouched
    assert!(!is_completed(&item, date));

    let (uncompleted, transition) = toggle(&completed, date);
    assert_eq!(transition, Transition::Uncompleted);
    assert!(!is_completed(&uncompleted, date));
}

#[test]
fn double_toggle_restores_original_ledger() {
    let mut item = med("m1");
    item.completed_dates.insert(ymd(2025, 1, 2), true);

    let (once, _) = toggle(&item, ymd(2025, 1, 5));
    let (twice, _) = toggle(&once, ymd(2025, 1, 5));
    assert_eq!(twice.completed_dates, item.completed_dates);
}

#[test]
fn toggle_accepts_dates_outside_the_recurrence_window() {
    // Completion is keyed independently of recurrence validity; narrowing
    // a rule later must not invalidate history.
    let mut item = med("m1");
    item.end_date = Some(ymd(2025, 1, 10));
    let past_end = ymd(2025, 2, 1);
    let (updated, transition) = toggle(&item, past_end);
    assert_eq!(transition, Transition::Completed);
    assert!(is_completed(&updated, past_end));
}

#[test]
fn only_completed_transitions_are_noteworthy() {
    assert!(Transition::Completed.is_noteworthy());
    assert!(!Transition::Uncompleted.is_noteworthy());
}

#[test]
fn schedule_records_history_only_when_completing() {
    let mut schedule = CareSchedule::new();
    schedule.upsert_item(med("m1")).unwrap();
    let date = ymd(2025, 1, 5);

    assert_eq!(
        schedule.toggle_completion("m1", date),
        Some(Transition::Completed)
    );
    assert_eq!(schedule.history().len(), 1);
    assert_eq!(schedule.history()[0].item_id, "m1");
    assert_eq!(schedule.history()[0].date, date);

    assert_eq!(
        schedule.toggle_completion("m1", date),
        Some(Transition::Uncompleted)
    );
    // un-completing appends nothing
    assert_eq!(schedule.history().len(), 1);

    assert_eq!(
        schedule.toggle_completion("m1", date),
        Some(Transition::Completed)
    );
    assert_eq!(schedule.history().len(), 2);
}

#[test]
fn toggle_on_unknown_item_returns_none() {
    let mut schedule = CareSchedule::new();
    assert_eq!(schedule.toggle_completion("ghost", ymd(2025, 1, 5)), None);
    assert!(schedule.history().is_empty());
}

#[test]
fn history_survives_item_deletion() {
    let mut schedule = CareSchedule::new();
    schedule.upsert_item(med("m1")).unwrap();
    schedule.toggle_completion("m1", ymd(2025, 1, 5));
    assert!(schedule.delete_item("m1"));
    assert_eq!(schedule.history().len(), 1);
    // the per-item ledger is gone with the item
    assert!(!schedule.is_completed("m1", ymd(2025, 1, 5)));
}
