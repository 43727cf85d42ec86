use super::{PersistenceError, PersistenceResult};
use crate::history::CompletionRecord;
use crate::item::{Category, Recurrence, ScheduleItem};
use crate::metadata::CareMetadata;
use crate::schedule::CareSchedule;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct ScheduleSnapshot {
    metadata: CareMetadata,
    items: Vec<ScheduleItem>,
    #[serde(default)]
    history: Vec<CompletionRecord>,
}

impl ScheduleSnapshot {
    fn from_schedule(schedule: &CareSchedule) -> PersistenceResult<Self> {
        super::validate_schedule(schedule)?;
        Ok(Self {
            metadata: schedule.metadata().clone(),
            items: schedule.items().to_vec(),
            history: schedule.history().to_vec(),
        })
    }

    fn into_schedule(self) -> PersistenceResult<CareSchedule> {
        super::check_loaded_items(&self.items)?;
        Ok(CareSchedule::from_parts(
            self.metadata,
            self.items,
            self.history,
        ))
    }
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &CareSchedule,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ScheduleSnapshot::from_schedule(schedule)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<CareSchedule> {
    let file = File::open(path)?;
    let snapshot: ScheduleSnapshot = serde_json::from_reader(file)?;
    snapshot.into_schedule()
}

#[derive(Default, Serialize, Deserialize)]
struct ItemCsvRecord {
    id: String,
    category: String,
    title: String,
    detail: String,
    start_date: String,
    time: String,
    recurrence: String,
    days_of_week: String,
    end_date: String,
    completed_dates: String,
    #[serde(default)]
    metadata_json: String,
    #[serde(default)]
    history_json: String,
}

impl From<&ScheduleItem> for ItemCsvRecord {
    fn from(item: &ScheduleItem) -> Self {
        let mut record = ItemCsvRecord::default();
        record.id = item.id.clone();
        record.category = item.category.as_str().to_string();
        record.title = item.title.clone();
        record.detail = item.detail.clone().unwrap_or_default();
        record.start_date = item.start_date.format("%Y-%m-%d").to_string();
        record.time = item.time.clone();
        record.recurrence = item.recurrence.as_str().to_string();
        record.days_of_week = join_weekdays(&item.days_of_week);
        record.end_date = format_date(item.end_date);
        record.completed_dates =
            serde_json::to_string(&item.completed_dates).unwrap_or_else(|_| "{}".to_string());
        record
    }
}

impl ItemCsvRecord {
    fn metadata_row(schedule: &CareSchedule) -> PersistenceResult<Self> {
        let mut record = ItemCsvRecord::default();
        record.title = "__metadata__".to_string();
        record.metadata_json = serde_json::to_string(schedule.metadata())?;
        record.history_json = serde_json::to_string(schedule.history())?;
        Ok(record)
    }

    fn is_metadata_row(&self) -> bool {
        !self.metadata_json.trim().is_empty()
    }

    fn into_item(self) -> PersistenceResult<ScheduleItem> {
        if self.is_metadata_row() {
            return Err(PersistenceError::InvalidData(
                "metadata row cannot be converted to a schedule item".into(),
            ));
        }
        let category = Category::from_str(self.category.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid category '{}'", self.category))
        })?;
        let recurrence = Recurrence::from_str(self.recurrence.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid recurrence '{}'", self.recurrence))
        })?;
        let start_date = parse_date(&self.start_date)?.ok_or_else(|| {
            PersistenceError::InvalidData("schedule item row missing start_date".into())
        })?;

        let mut item = ScheduleItem::new(self.id, category, self.title, start_date, self.time, recurrence);
        item.detail = parse_string_option(self.detail);
        item.days_of_week = split_weekdays(&self.days_of_week)?;
        item.end_date = parse_date(&self.end_date)?;
        item.completed_dates = if self.completed_dates.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str::<BTreeMap<NaiveDate, bool>>(&self.completed_dates)
                .map_err(|err| {
                    PersistenceError::InvalidData(format!("invalid completed_dates: {err}"))
                })?
        };
        Ok(item)
    }
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(
    schedule: &CareSchedule,
    path: P,
) -> PersistenceResult<()> {
    super::validate_schedule(schedule)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(ItemCsvRecord::metadata_row(schedule)?)?;
    for item in schedule.items() {
        writer.serialize(ItemCsvRecord::from(item))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_schedule_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<CareSchedule> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut metadata = None;
    let mut history = Vec::new();
    let mut items = Vec::new();
    for record in reader.deserialize::<ItemCsvRecord>() {
        let record = record?;
        if record.is_metadata_row() {
            metadata = Some(serde_json::from_str::<CareMetadata>(&record.metadata_json)?);
            if !record.history_json.trim().is_empty() {
                history = serde_json::from_str::<Vec<CompletionRecord>>(&record.history_json)?;
            }
        } else {
            items.push(record.into_item()?);
        }
    }

    super::check_loaded_items(&items)?;
    Ok(CareSchedule::from_parts(
        metadata.unwrap_or_default(),
        items,
        history,
    ))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(value: &str) -> PersistenceResult<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|err| PersistenceError::InvalidData(format!("invalid date '{trimmed}': {err}")))
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn join_weekdays(days: &[Weekday]) -> String {
    days.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn split_weekdays(value: &str) -> PersistenceResult<Vec<Weekday>> {
    let mut days = Vec::new();
    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let day = part.parse::<Weekday>().map_err(|_| {
            PersistenceError::InvalidData(format!("invalid weekday '{part}'"))
        })?;
        days.push(day);
    }
    Ok(days)
}
