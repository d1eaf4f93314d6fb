//! Shared types for the Vaani voice assistant.

pub mod api;
pub mod config;
pub mod fsio;
pub mod reminder;

pub use api::{ActRequest, ActResponse, DueResponse, HealthResponse, RemindersResponse};
pub use config::VaaniConfig;
pub use fsio::atomic_write;
pub use reminder::{action_id, Reminder};
