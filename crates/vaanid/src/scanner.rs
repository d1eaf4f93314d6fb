//! Due-reminder scanner.
//!
//! Promotes past-deadline, undelivered reminders to delivered. Runs on a
//! fixed one-minute cadence for the lifetime of the process and is also
//! invocable on demand via `run_once` (the `/check_due` trigger).

use crate::audit::DeliveredLog;
use crate::store::ReminderStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};
use vaani_common::Reminder;

/// Scan cadence. Fixed, not configurable.
pub const SCAN_PERIOD: Duration = Duration::from_secs(60);

pub struct DueScanner {
    store: Arc<ReminderStore>,
    log: DeliveredLog,
}

impl DueScanner {
    pub fn new(store: Arc<ReminderStore>, log: DeliveredLog) -> Self {
        Self { store, log }
    }

    /// Scan against the wall clock. Manual trigger and periodic tick both
    /// land here.
    pub async fn run_once(&self) -> Vec<Reminder> {
        self.run_at(Utc::now()).await
    }

    /// Scan against an explicit clock instant. Returns the became-due set;
    /// a delivered record is never re-reported.
    ///
    /// The whole load-flip-save is one critical section under the store's
    /// mutation guard. The store is persisted once, and only when a record
    /// actually changed. The guard is released before the audit append.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let due = {
            let _guard = self.store.mutation_guard().await;

            let mut all = self.store.load();
            let mut due = Vec::new();
            for reminder in all.iter_mut() {
                if !reminder.delivered && reminder.datetime <= now {
                    reminder.delivered = true;
                    reminder.delivered_at = Some(now);
                    due.push(reminder.clone());
                }
            }

            if !due.is_empty() {
                self.store.save(&all);
            }
            due
        };

        if due.is_empty() {
            debug!("due-scan: nothing due");
        } else {
            info!("due-scan: {} reminder(s) due now", due.len());
            if let Err(e) = self.log.record(&due).await {
                warn!("failed to record delivered reminders: {:#}", e);
            }
        }

        due
    }

    /// Start the periodic scan task. A failed cycle is logged inside
    /// `run_at` and never halts the loop; the next tick always happens.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let scanner = self;
        tokio::spawn(async move {
            let mut ticker = interval(SCAN_PERIOD);
            loop {
                ticker.tick().await;
                scanner.run_once().await;
            }
        })
    }
}
