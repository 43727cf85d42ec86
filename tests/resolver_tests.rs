use care_schedule::{Category, Recurrence, ScheduleItem, expand, is_due, occurrences_for_date};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn daily_item(id: &str, start: NaiveDate) -> ScheduleItem {
    ScheduleItem::new(id, Category::Medication, "Med", start, "08:00", Recurrence::Daily)
}

#[test]
fn never_due_before_start_date() {
    let start = ymd(2025, 3, 10);
    let item = daily_item("m1", start);
    for offset in 1..=10 {
        assert!(!is_due(&item, start - Duration::days(offset)));
    }
    assert!(is_due(&item, start));
}

#[test]
fn never_due_after_end_date() {
    let mut item = daily_item("m1", ymd(2025, 3, 1));
    item.end_date = Some(ymd(2025, 3, 15));
    assert!(is_due(&item, ymd(2025, 3, 15)));
    for offset in 1..=10 {
        assert!(!is_due(&item, ymd(2025, 3, 15) + Duration::days(offset)));
    }
}

#[test]
fn end_before_start_produces_no_occurrences() {
    // Malformed stored data degrades to never-due rather than erroring.
    let mut item = daily_item("m1", ymd(2025, 3, 10));
    item.end_date = Some(ymd(2025, 3, 1));
    let mut date = ymd(2025, 2, 20);
    while date <= ymd(2025, 4, 1) {
        assert!(!is_due(&item, date));
        date = date + Duration::days(1);
    }
}

#[test]
fn once_due_exactly_on_start_date() {
    let start = ymd(2025, 6, 15);
    let mut item = daily_item("a1", start);
    item.recurrence = Recurrence::Once;
    for offset in -10..=10 {
        let date = start + Duration::days(offset);
        assert_eq!(is_due(&item, date), offset == 0, "offset {offset}");
    }
}

#[test]
fn daily_due_every_day_across_leap_boundary() {
    // 400 days from 2023-12-01 covers 2024-02-29.
    let start = ymd(2023, 12, 1);
    let item = daily_item("m1", start);
    for offset in 0..400 {
        assert!(is_due(&item, start + Duration::days(offset)));
    }
    assert!(is_due(&item, ymd(2024, 2, 29)));
}

#[test]
fn weekly_matches_exactly_the_listed_days() {
    // 2025-03-05 is a Wednesday.
    let start = ymd(2025, 3, 5);
    assert_eq!(start.weekday(), Weekday::Wed);
    let mut item = daily_item("c1", start);
    item.recurrence = Recurrence::Weekly;
    item.days_of_week = vec![Weekday::Mon, Weekday::Fri];

    for offset in 0..14 {
        let date = start + Duration::days(offset);
        let expected = date.weekday() == Weekday::Mon || date.weekday() == Weekday::Fri;
        assert_eq!(is_due(&item, date), expected, "{date}");
    }
}

#[test]
fn weekly_with_no_days_is_never_due() {
    let start = ymd(2024, 1, 1);
    let mut item = daily_item("c1", start);
    item.recurrence = Recurrence::Weekly;
    item.days_of_week = Vec::new();
    for offset in 0..365 {
        assert!(!is_due(&item, start + Duration::days(offset)));
    }
}

#[test]
fn monthly_skips_months_without_the_start_day() {
    let mut item = daily_item("m31", ymd(2024, 1, 31));
    item.recurrence = Recurrence::Monthly;

    assert!(is_due(&item, ymd(2024, 1, 31)));
    assert!(is_due(&item, ymd(2024, 3, 31)));
    // February 2024 has 29 days; day 31 never matches anywhere in the month.
    let mut date = ymd(2024, 2, 1);
    while date <= ymd(2024, 2, 29) {
        assert!(!is_due(&item, date), "{date}");
        date = date + Duration::days(1);
    }
    assert!(!is_due(&item, ymd(2024, 4, 30)));
    assert!(is_due(&item, ymd(2024, 5, 31)));
}

#[test]
fn monthly_due_on_start_day_each_month() {
    let mut item = daily_item("m15", ymd(2025, 1, 15));
    item.recurrence = Recurrence::Monthly;
    for month in 1..=12 {
        assert!(is_due(&item, ymd(2025, month, 15)));
        assert!(!is_due(&item, ymd(2025, month, 14)));
        assert!(!is_due(&item, ymd(2025, month, 16)));
    }
}

#[test]
fn expand_orders_by_date_then_time_with_stable_ties() {
    let date = ymd(2025, 4, 7);
    let mut first = daily_item("first", date);
    first.time = "09:00".to_string();
    let mut second = daily_item("second", date);
    second.time = "09:00".to_string();
    let mut third = daily_item("third", date);
    third.time = "08:00".to_string();

    let items = vec![first, second, third];
    let occurrences = expand(&items, date, date);
    let ids: Vec<&str> = occurrences.iter().map(|o| o.item.id.as_str()).collect();
    // "08:00" sorts first; the two "09:00" items keep input order.
    assert_eq!(ids, vec!["third", "first", "second"]);
}

#[test]
fn expand_groups_dates_in_ascending_order() {
    let start = ymd(2025, 4, 7);
    let items = vec![daily_item("m1", start)];
    let occurrences = expand(&items, start, start + Duration::days(4));
    let dates: Vec<NaiveDate> = occurrences.iter().map(|o| o.date).collect();
    assert_eq!(
        dates,
        (0..5).map(|d| start + Duration::days(d)).collect::<Vec<_>>()
    );
}

#[test]
fn single_date_matches_one_day_expand() {
    let date = ymd(2025, 4, 7);
    let mut weekly = daily_item("w1", ymd(2025, 4, 1));
    weekly.recurrence = Recurrence::Weekly;
    weekly.days_of_week = vec![Weekday::Mon];
    weekly.time = "07:30".to_string();
    let items = vec![daily_item("m1", ymd(2025, 4, 1)), weekly];

    assert_eq!(occurrences_for_date(&items, date), expand(&items, date, date));
}

#[test]
fn expand_is_deterministic() {
    let start = ymd(2025, 4, 1);
    let items = vec![daily_item("m1", start), daily_item("m2", start)];
    let a = expand(&items, start, start + Duration::days(30));
    let b = expand(&items, start, start + Duration::days(30));
    assert_eq!(a, b);
}
