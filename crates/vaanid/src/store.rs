//! File-backed reminder store.
//!
//! A single JSON document holding the full reminder list, rewritten whole on
//! every mutation. Mutations serialize through one in-process mutex so a
//! reminder creation cannot race the minute-cadence due-scan.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, warn};
use vaani_common::{atomic_write, Reminder};

pub struct ReminderStore {
    path: PathBuf,
    mutations: Mutex<()>,
}

impl ReminderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mutations: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the mutation lock for a compound read-modify-write.
    ///
    /// Must not be held across a remote-brain call.
    pub async fn mutation_guard(&self) -> MutexGuard<'_, ()> {
        self.mutations.lock().await
    }

    /// Read the full collection. Missing file means an empty list; an
    /// unreadable or unparseable file is logged and treated the same.
    pub fn load(&self) -> Vec<Reminder> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(reminders) => reminders,
            Err(e) => {
                warn!("unparseable reminders file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrite the collection atomically. Returns false on failure, which
    /// is logged; the process continues either way.
    pub fn save(&self, reminders: &[Reminder]) -> bool {
        let json = match serde_json::to_string_pretty(reminders) {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize reminders: {}", e);
                return false;
            }
        };

        match atomic_write(&self.path, &json) {
            Ok(()) => true,
            Err(e) => {
                error!("failed to write {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Append a new undelivered reminder and return its id. No uniqueness
    /// check on title or datetime; duplicates are permitted.
    pub async fn add(&self, user_id: &str, title: &str, datetime: DateTime<Utc>) -> String {
        let _guard = self.mutation_guard().await;

        let mut all = self.load();
        let reminder = Reminder::new(user_id, title, datetime);
        let id = reminder.id.clone();
        all.push(reminder);
        self.save(&all);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ReminderStore {
        ReminderStore::new(dir.path().join("reminders.json"))
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json {{{").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();
        assert!(store.load().is_empty());
    }

    #[tokio::test]
    async fn add_then_load_yields_one_pending_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let when = "2030-01-01T07:00:00Z".parse().unwrap();
        let id = store.add("u1", "Take medicine", when).await;

        let all = store.load();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].user_id, "u1");
        assert_eq!(all[0].title, "Take medicine");
        assert_eq!(all[0].datetime, when);
        assert!(!all[0].delivered);
    }

    #[tokio::test]
    async fn duplicates_are_permitted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let when = Utc::now();

        store.add("u1", "same", when).await;
        store.add("u1", "same", when).await;

        assert_eq!(store.load().len(), 2);
    }

    #[tokio::test]
    async fn save_load_round_trip_is_stable() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add("u1", "one", Utc::now()).await;
        store.add("u2", "two", Utc::now()).await;

        let first = store.load();
        assert!(store.save(&first));
        assert_eq!(store.load(), first);
    }
}
