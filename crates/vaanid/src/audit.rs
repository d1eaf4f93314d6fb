//! Append-only audit log of reminders that became due.
//!
//! One line per non-empty due-scan: ISO timestamp, " - ", and the JSON
//! serialization of the batch that was just delivered.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use vaani_common::Reminder;

pub struct DeliveredLog {
    path: PathBuf,
}

impl DeliveredLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for a non-empty due set.
    pub async fn record(&self, due: &[Reminder]) -> Result<()> {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let payload = serde_json::to_string(due).context("failed to serialize due set")?;
        let line = format!("{} - {}\n", stamp, payload);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .context("failed to open delivered log")?;

        file.write_all(line.as_bytes())
            .await
            .context("failed to append to delivered log")?;

        Ok(())
    }

    /// Read all recorded lines (for debugging and tests).
    pub async fn read_lines(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .context("failed to read delivered log")?;

        Ok(content.lines().map(str::to_string).collect())
    }
}
