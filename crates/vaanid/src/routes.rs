//! API routes for vaanid.

use crate::brain::{BrainOptions, APOLOGY};
use crate::engine::{self, DecisionSignal};
use crate::prompts::build_vaani_prompt;
use crate::server::AppState;
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Days, Duration, Local, LocalResult, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use vaani_common::{
    action_id, ActRequest, ActResponse, DueResponse, HealthResponse, Reminder, RemindersResponse,
};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/_health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: Utc::now(),
    })
}

// ============================================================================
// Act Route
// ============================================================================

pub fn act_routes() -> Router<AppStateArc> {
    Router::new().route("/act", post(act))
}

/// Main action endpoint used by the UI. Failures never escape as protocol
/// errors: the envelope carries `success: false` with HTTP 200.
async fn act(State(state): State<AppStateArc>, Json(req): Json<ActRequest>) -> Json<ActResponse> {
    match handle_act(&state, req).await {
        Ok(resp) => Json(resp),
        Err(e) => {
            error!("POST /act failed: {:#}", e);
            Json(ActResponse::failure(e.to_string()))
        }
    }
}

async fn handle_act(state: &AppState, req: ActRequest) -> Result<ActResponse> {
    let text = req.text.unwrap_or_default();
    let signal = engine::decide_reply(&text, req.image.is_some(), req.stt_confidence);

    match signal {
        DecisionSignal::ShowReminders => Ok(show_reminders(state)),
        DecisionSignal::Canned(reply) if engine::wants_demo_reminder(&reply) => {
            Ok(create_demo_reminder(state).await)
        }
        DecisionSignal::Canned(reply) if engine::defers_to_brain(&reply) => {
            ask_brain(state, &text).await
        }
        DecisionSignal::Canned(reply) => Ok(ActResponse::ok(action_id(), reply)),
        DecisionSignal::UseRemoteBrain | DecisionSignal::Unmatched => ask_brain(state, &text).await,
    }
}

fn show_reminders(state: &AppState) -> ActResponse {
    let pending: Vec<Reminder> = state
        .store
        .load()
        .into_iter()
        .filter(Reminder::is_pending)
        .collect();

    let reply = match pending.iter().min_by_key(|r| r.datetime) {
        None => engine::NO_PENDING.to_string(),
        Some(first) => format!(
            "Aapke {} pending reminders hain. Sabse pehla: {}, scheduled {}.",
            pending.len(),
            first.title,
            format_local(first.datetime)
        ),
    };

    ActResponse::with_reminders(action_id(), reply, pending)
}

async fn create_demo_reminder(state: &AppState) -> ActResponse {
    let scheduled = tomorrow_at_seven();
    let id = state
        .store
        .add(engine::DEMO_USER, engine::DEMO_TITLE, scheduled)
        .await;

    info!("demo reminder {} scheduled for {}", id, scheduled);
    let reply = format!("Done. Main ne reminder set kar diya. ID: {}", id);
    ActResponse::ok(id, reply)
}

async fn ask_brain(state: &AppState, text: &str) -> Result<ActResponse> {
    let pending: Vec<Reminder> = state
        .store
        .load()
        .into_iter()
        .filter(Reminder::is_pending)
        .collect();

    // The three most recent pending reminders provide the context line
    let start = pending.len().saturating_sub(3);
    let prompt = build_vaani_prompt(text, &pending[start..]);
    info!("calling brain (prompt {} chars)", prompt.chars().count());

    let reply = match state.brain.complete(&prompt, &BrainOptions::default()).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => APOLOGY.to_string(),
        Err(e) => {
            warn!("brain call failed: {}", e);
            APOLOGY.to_string()
        }
    };

    Ok(ActResponse::ok(action_id(), reply))
}

/// Tomorrow 07:00 local time, as a UTC instant.
fn tomorrow_at_seven() -> DateTime<Utc> {
    let tomorrow = Local::now().date_naive() + Days::new(1);
    match tomorrow.and_hms_opt(7, 0, 0) {
        Some(naive) => match naive.and_local_timezone(Local) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            // A DST gap swallowed 07:00; fall back to the same instant next day
            LocalResult::None => Utc::now() + Duration::days(1),
        },
        None => Utc::now() + Duration::days(1),
    }
}

fn format_local(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format("%d/%m/%Y, %I:%M:%S %p")
        .to_string()
}

// ============================================================================
// Reminder Routes
// ============================================================================

pub fn reminder_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/reminders", get(list_reminders))
        .route("/check_due", get(check_due))
}

async fn list_reminders(State(state): State<AppStateArc>) -> Json<RemindersResponse> {
    Json(RemindersResponse {
        success: true,
        reminders: state.store.load(),
    })
}

/// Manual due-scan trigger.
async fn check_due(State(state): State<AppStateArc>) -> Json<DueResponse> {
    Json(DueResponse {
        success: true,
        due: state.scanner.run_once().await,
    })
}

// ============================================================================
// Static Routes
// ============================================================================

pub fn static_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(index))
        .route("/sample_image", get(sample_image))
}

async fn index(State(state): State<AppStateArc>) -> Response {
    let path = state.config.web_root.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!("landing page unavailable at {}: {}", path.display(), e);
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "landing page not found" })),
            )
                .into_response()
        }
    }
}

/// Serve the sample uploaded image (useful for debugging and the UI).
async fn sample_image(State(state): State<AppStateArc>) -> Response {
    let path = &state.config.sample_image_path;
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "sample image not found",
                "path": path.display().to_string(),
            })),
        )
            .into_response(),
    }
}
