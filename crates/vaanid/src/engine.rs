//! Reply decision engine.
//!
//! Classifies an inbound utterance into a decision signal via ordered,
//! case-insensitive, first-match-wins phrase matching. Pure apart from the
//! transcript log line; all side effects live in the request handler.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Fixed observation returned whenever an image rides along with the request.
pub const IMAGE_OBSERVATION: &str = "Maine photo dekha — isme dukan ya sadak nazar aa rahi hai.";

/// Fixed greeting.
pub const GREETING: &str = "Namaste! Main Vaani hoon. Aapko kis cheez mein madad chahiye?";

/// Clarifying prompt for reminder intents, asking for a time.
pub const REMINDER_CLARIFY: &str = "Thik hai — kab set karun? (udaharan: 'kal subah 7 baje')";

/// Nudge for inputs too short to act on.
pub const SAY_MORE: &str = "Mujhe thoda aur bataiye ya seedha sawaal puchiye.";

/// Shown when a listing request finds nothing pending.
pub const NO_PENDING: &str = "Aapke koi pending reminders nahi hain.";

/// Title and owner of the demo reminder.
pub const DEMO_TITLE: &str = "Dawai yaad dilana";
pub const DEMO_USER: &str = "user_demo";

/// How a given input should be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionSignal {
    /// Delegate to the remote brain with a context-enriched prompt.
    UseRemoteBrain,
    /// Render the pending-reminder summary.
    ShowReminders,
    /// Return this fixed reply (subject to the post-decision rules).
    Canned(String),
    /// No rule matched. Distinct from a rule that chose an empty reply.
    Unmatched,
}

/// Classify an utterance. The image check precedes all text analysis; the
/// confidence score is logged but does not branch.
pub fn decide_reply(text: &str, has_image: bool, stt_confidence: Option<f64>) -> DecisionSignal {
    let raw = text.trim();
    let text = raw.to_lowercase();

    info!("STT transcript: {:?} confidence: {:?}", raw, stt_confidence);

    if has_image {
        return DecisionSignal::Canned(IMAGE_OBSERVATION.to_string());
    }

    // Broad capability questions go straight to the brain
    if text.contains("tum kya kar")
        || text.contains("kya kar sakti")
        || text.contains("kya kar sakta")
        || text.contains("what can you do")
        || text.contains("aap kya kar sakte")
        || (text.contains("kya kar") && text.chars().count() < 80)
    {
        return DecisionSignal::UseRemoteBrain;
    }

    if text.contains("namaste")
        || text.contains("hello")
        || text.contains("hi")
        || text.contains("pranam")
    {
        return DecisionSignal::Canned(GREETING.to_string());
    }

    // Listing phrases, checked before the broader reminder-intent rule
    // which would otherwise swallow any text containing "reminder"
    if text.contains("show reminders")
        || text.contains("list reminders")
        || text.contains("mere reminders")
        || text.contains("reminders dikhao")
        || text.contains("pending reminders")
    {
        return DecisionSignal::ShowReminders;
    }

    if text.contains("remind")
        || text.contains("reminder")
        || text.contains("रिमाइंडर")
        || text.contains("याद दिला")
        || text.contains("जगाना")
    {
        return DecisionSignal::Canned(REMINDER_CLARIFY.to_string());
    }

    if text.chars().count() < 3 {
        return DecisionSignal::Canned(SAY_MORE.to_string());
    }

    DecisionSignal::Unmatched
}

/// Post-decision rule: a canned reply carrying one of these markers triggers
/// the demo-reminder side effect in the handler. Note the clarifying prompt
/// itself embeds "kal subah 7 baje".
pub fn wants_demo_reminder(reply: &str) -> bool {
    let lower = reply.to_lowercase();
    lower.contains("demo reminder")
        || lower.contains("kal subah 7 baje")
        || lower.contains("reminder set")
}

/// Post-decision rule: a canned reply carrying one of these markers is routed
/// to the brain instead of being returned as-is.
pub fn defers_to_brain(reply: &str) -> bool {
    let lower = reply.to_lowercase();
    lower.contains("mujhe thoda") || lower.contains("samajh nahi aaya")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_wins_over_any_text() {
        assert_eq!(
            decide_reply("what can you do", true, None),
            DecisionSignal::Canned(IMAGE_OBSERVATION.to_string())
        );
        assert_eq!(
            decide_reply("", true, Some(0.2)),
            DecisionSignal::Canned(IMAGE_OBSERVATION.to_string())
        );
    }

    #[test]
    fn capability_questions_use_remote_brain() {
        assert_eq!(
            decide_reply("what can you do", false, None),
            DecisionSignal::UseRemoteBrain
        );
        assert_eq!(
            decide_reply("Tum kya kar sakti ho?", false, None),
            DecisionSignal::UseRemoteBrain
        );
        assert_eq!(
            decide_reply("aap kya kar sakte hain", false, None),
            DecisionSignal::UseRemoteBrain
        );
    }

    #[test]
    fn capability_check_precedes_greeting() {
        assert_eq!(
            decide_reply("namaste, tum kya kar sakti ho", false, None),
            DecisionSignal::UseRemoteBrain
        );
    }

    #[test]
    fn greetings_get_the_canned_greeting() {
        for text in ["namaste", "Hello there", "hi", "pranam"] {
            assert_eq!(
                decide_reply(text, false, None),
                DecisionSignal::Canned(GREETING.to_string()),
                "text: {text}"
            );
        }
    }

    #[test]
    fn listing_phrases_show_reminders() {
        for text in [
            "show reminders",
            "list reminders please",
            "mere reminders",
            "reminders dikhao",
            "pending reminders?",
        ] {
            assert_eq!(
                decide_reply(text, false, None),
                DecisionSignal::ShowReminders,
                "text: {text}"
            );
        }
    }

    #[test]
    fn reminder_intents_get_the_clarifying_prompt() {
        for text in ["remind me to call", "set a reminder", "रिमाइंडर लगाओ", "याद दिलाना"] {
            assert_eq!(
                decide_reply(text, false, None),
                DecisionSignal::Canned(REMINDER_CLARIFY.to_string()),
                "text: {text}"
            );
        }
    }

    #[test]
    fn short_texts_ask_for_more() {
        assert_eq!(
            decide_reply("ok", false, None),
            DecisionSignal::Canned(SAY_MORE.to_string())
        );
        assert_eq!(
            decide_reply("  a  ", false, Some(0.9)),
            DecisionSignal::Canned(SAY_MORE.to_string())
        );
    }

    #[test]
    fn everything_else_is_unmatched() {
        assert_eq!(
            decide_reply("aaj ka sabse accha khana kya banau", false, None),
            DecisionSignal::Unmatched
        );
    }

    #[test]
    fn clarifying_prompt_triggers_demo_reminder() {
        assert!(wants_demo_reminder(REMINDER_CLARIFY));
        assert!(wants_demo_reminder("ok, Reminder Set ho gaya"));
        assert!(wants_demo_reminder("make a Demo Reminder"));
        assert!(!wants_demo_reminder(GREETING));
    }

    #[test]
    fn say_more_defers_to_brain() {
        assert!(defers_to_brain(SAY_MORE));
        assert!(defers_to_brain("Samajh nahi aaya, phir se boliye"));
        assert!(!defers_to_brain(GREETING));
        assert!(!defers_to_brain(REMINDER_CLARIFY));
    }
}
