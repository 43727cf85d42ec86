pub mod completion;
pub mod history;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod item;
pub mod item_validation;
pub mod metadata;
pub mod persistence;
pub mod resolver;
pub mod schedule;

pub use completion::{Transition, is_completed, toggle};
pub use history::CompletionRecord;
pub use item::{Category, Recurrence, ScheduleItem};
pub use item_validation::{ValidationError, validate_item, validate_item_collection};
pub use metadata::CareMetadata;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteScheduleStore;
pub use persistence::{
    PersistenceError, ScheduleStore, check_loaded_items, load_schedule_from_csv,
    load_schedule_from_json, save_schedule_to_csv, save_schedule_to_json, validate_items,
    validate_schedule,
};
pub use resolver::{Occurrence, expand, is_due, occurrences_for_date};
pub use schedule::{AgendaEntry, CareSchedule, DaySummary};
