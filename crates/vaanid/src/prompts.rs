//! Prompt construction for the remote brain.
//!
//! Keeps replies concise, Hindi-first, and grounded in up to three pending
//! reminders.

use chrono::SecondsFormat;
use vaani_common::Reminder;

/// Build the single user turn sent to the brain: persona preamble, optional
/// reminder context line, the raw utterance, and a trailing answer cue.
pub fn build_vaani_prompt(user_text: &str, recent_reminders: &[Reminder]) -> String {
    let summary: Vec<String> = recent_reminders
        .iter()
        .take(3)
        .map(|r| {
            format!(
                "{} at {}",
                r.title,
                r.datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
            )
        })
        .collect();

    let ctx = if summary.is_empty() {
        String::new()
    } else {
        format!("RecentReminders: {}.", summary.join("; "))
    };

    format!(
        "Aap Vaani AI ho — ek Hindi-first, voice-first assistant for everyday users. \
         Provide a short, accurate, step-by-step or direct answer in Hindi. \
         Keep it simple and action-focused. Context: {}\n\nUser: {}\n\nAnswer:",
        ctx, user_text
    )
}
