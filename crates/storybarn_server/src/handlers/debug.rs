//! Debug and health endpoints.

use crate::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use serde_json::json;
use storybarn_models::JournalEntry;

/// Response of GET /api/debug/logs.
#[derive(Debug, Serialize)]
pub struct DebugLogs {
    /// Recent OpenAI events, oldest first
    pub openai: Vec<JournalEntry>,
    /// Recent MidJourney events, oldest first
    pub midjourney: Vec<JournalEntry>,
}

/// GET /api/debug/logs
pub async fn logs(State(state): State<AppState>) -> Json<DebugLogs> {
    Json(DebugLogs {
        openai: state.journal.snapshot_for("openai"),
        midjourney: state.journal.snapshot_for("midjourney"),
    })
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
