//! Vaani daemon - Hindi-first voice-assistant backend.
//!
//! Accepts free-text or image-tagged requests, replies with canned or
//! LLM-generated text, and scans time-based reminders once per minute.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use vaani_common::VaaniConfig;
use vaanid::audit::DeliveredLog;
use vaanid::brain::FallbackBrain;
use vaanid::scanner::DueScanner;
use vaanid::server::{self, AppState};
use vaanid::store::ReminderStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Vaani daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = VaaniConfig::from_env();

    let store = Arc::new(ReminderStore::new(&config.reminders_path));
    let scanner = Arc::new(DueScanner::new(
        Arc::clone(&store),
        DeliveredLog::new(&config.delivered_log_path),
    ));
    let brain = Arc::new(FallbackBrain::from_config(&config));

    // Minute-cadence due-reminder scan, owned for the process lifetime
    Arc::clone(&scanner).spawn();

    server::run(AppState::new(store, scanner, brain, config)).await
}
