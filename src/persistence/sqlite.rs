use super::{PersistenceResult, ScheduleStore};
use crate::history::CompletionRecord;
use crate::item::ScheduleItem;
use crate::metadata::CareMetadata;
use crate::schedule::CareSchedule;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

pub struct SqliteScheduleStore {
    connection: Mutex<Connection>,
}

impl SqliteScheduleStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS care_metadata (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                metadata_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS schedule_items (
                id TEXT PRIMARY KEY,
                item_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS completion_history (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                record_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_metadata(
        &self,
        tx: &rusqlite::Transaction,
        metadata: &CareMetadata,
    ) -> PersistenceResult<()> {
        let json = serde_json::to_string(metadata)?;
        tx.execute("DELETE FROM care_metadata", [])?;
        tx.execute(
            "INSERT INTO care_metadata (id, metadata_json) VALUES (1, ?1)",
            params![json],
        )?;
        Ok(())
    }

    fn save_items(
        &self,
        tx: &rusqlite::Transaction,
        schedule: &CareSchedule,
    ) -> PersistenceResult<()> {
        tx.execute("DELETE FROM schedule_items", [])?;
        let mut stmt = tx.prepare("INSERT INTO schedule_items (id, item_json) VALUES (?1, ?2)")?;
        for item in schedule.items() {
            let json = serde_json::to_string(item)?;
            stmt.execute(params![item.id, json])?;
        }
        Ok(())
    }

    fn save_history(
        &self,
        tx: &rusqlite::Transaction,
        schedule: &CareSchedule,
    ) -> PersistenceResult<()> {
        tx.execute("DELETE FROM completion_history", [])?;
        let mut stmt = tx.prepare("INSERT INTO completion_history (record_json) VALUES (?1)")?;
        for record in schedule.history() {
            let json = serde_json::to_string(record)?;
            stmt.execute(params![json])?;
        }
        Ok(())
    }
}

impl ScheduleStore for SqliteScheduleStore {
    fn save_schedule(&self, schedule: &CareSchedule) -> PersistenceResult<()> {
        super::validate_schedule(schedule)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        self.save_metadata(&tx, schedule.metadata())?;
        self.save_items(&tx, schedule)?;
        self.save_history(&tx, schedule)?;
        tx.commit()?;
        Ok(())
    }

    fn load_schedule(&self) -> PersistenceResult<Option<CareSchedule>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT metadata_json FROM care_metadata WHERE id = 1")?;
        let metadata_json_opt: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;

        let Some(metadata_json) = metadata_json_opt else {
            return Ok(None);
        };

        let metadata: CareMetadata = serde_json::from_str(&metadata_json)?;

        let mut stmt = conn.prepare("SELECT item_json FROM schedule_items ORDER BY rowid ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut items = Vec::new();
        for json in rows {
            let json = json?;
            let item: ScheduleItem = serde_json::from_str(&json)?;
            items.push(item);
        }

        super::check_loaded_items(&items)?;

        let mut stmt = conn.prepare("SELECT record_json FROM completion_history ORDER BY seq ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut history = Vec::new();
        for json in rows {
            let json = json?;
            let record: CompletionRecord = serde_json::from_str(&json)?;
            history.push(record);
        }

        Ok(Some(CareSchedule::from_parts(metadata, items, history)))
    }
}
