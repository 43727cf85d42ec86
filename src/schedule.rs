use crate::completion::{self, Transition};
use crate::history::CompletionRecord;
use crate::item::{Category, ScheduleItem};
use crate::item_validation::{self, ValidationError};
use crate::metadata::CareMetadata;
use crate::resolver;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One agenda row: an occurrence joined with its completion state, in a form
/// the presentation layer can render directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub date: NaiveDate,
    pub item_id: String,
    pub category: Category,
    pub title: String,
    pub time: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl DaySummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("date={}", self.date));
        parts.push(format!("total={}", self.total));
        if self.completed > 0 {
            parts.push(format!("done={}", self.completed));
        }
        if self.pending > 0 {
            parts.push(format!("pending={}", self.pending));
        }
        parts.join(", ")
    }
}

/// The owning container: the patient's schedule items, care metadata, and the
/// completion audit log. All occurrence math delegates to [`resolver`], all
/// completion flips to [`completion`], so there is exactly one copy of each
/// rule.
#[derive(Debug)]
pub struct CareSchedule {
    items: Vec<ScheduleItem>,
    metadata: CareMetadata,
    history: Vec<CompletionRecord>,
}

impl CareSchedule {
    pub fn new() -> Self {
        Self::new_with_metadata(CareMetadata::default())
    }

    pub fn new_with_metadata(metadata: CareMetadata) -> Self {
        Self {
            items: Vec::new(),
            metadata,
            history: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        metadata: CareMetadata,
        items: Vec<ScheduleItem>,
        history: Vec<CompletionRecord>,
    ) -> Self {
        Self {
            items,
            metadata,
            history,
        }
    }

    pub fn metadata(&self) -> &CareMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: CareMetadata) {
        self.metadata = metadata;
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn find_item(&self, item_id: &str) -> Option<&ScheduleItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn history(&self) -> &[CompletionRecord] {
        &self.history
    }

    /// Validates and stores an item, replacing any stored item with the same
    /// id. Edits go through here too; the completion ledger travels inside
    /// the item value and is never touched by the container.
    pub fn upsert_item(&mut self, item: ScheduleItem) -> Result<(), ValidationError> {
        item_validation::validate_item(&item)?;
        match self.items.iter_mut().find(|stored| stored.id == item.id) {
            Some(stored) => *stored = item,
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Removes an item and with it the per-item completion ledger. Past
    /// audit records in the history log are kept.
    pub fn delete_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        self.items.len() != before
    }

    /// Flips completion state for `(item_id, date)` and appends an audit
    /// record when the transition is `Completed`. Returns `None` when no
    /// item has that id.
    pub fn toggle_completion(&mut self, item_id: &str, date: NaiveDate) -> Option<Transition> {
        let item = self.items.iter_mut().find(|item| item.id == item_id)?;
        let (updated, transition) = completion::toggle(item, date);
        let title = updated.title.clone();
        *item = updated;
        if transition.is_noteworthy() {
            self.history.push(CompletionRecord {
                item_id: item_id.to_string(),
                title,
                date,
                recorded_at: Utc::now().naive_utc(),
            });
        }
        Some(transition)
    }

    pub fn is_completed(&self, item_id: &str, date: NaiveDate) -> bool {
        self.find_item(item_id)
            .is_some_and(|item| completion::is_completed(item, date))
    }

    /// Render-ready agenda over an inclusive date range, ordered like
    /// [`resolver::expand`].
    pub fn agenda(&self, range_start: NaiveDate, range_end: NaiveDate) -> Vec<AgendaEntry> {
        resolver::expand(&self.items, range_start, range_end)
            .into_iter()
            .map(|occurrence| AgendaEntry {
                date: occurrence.date,
                item_id: occurrence.item.id.clone(),
                category: occurrence.item.category,
                title: occurrence.item.title.clone(),
                time: occurrence.item.time.clone(),
                completed: completion::is_completed(occurrence.item, occurrence.date),
            })
            .collect()
    }

    pub fn agenda_for_date(&self, date: NaiveDate) -> Vec<AgendaEntry> {
        self.agenda(date, date)
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        let entries = self.agenda_for_date(date);
        let completed = entries.iter().filter(|entry| entry.completed).count();
        DaySummary {
            date,
            total: entries.len(),
            completed,
            pending: entries.len() - completed,
        }
    }
}

impl Default for CareSchedule {
    fn default() -> Self {
        Self::new()
    }
}
