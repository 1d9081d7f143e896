//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ChatRequest, DayGroup, ErrorResponse, HistoryResponse, SubmitResponse, SuggestionsResponse,
};
use super::AppState;
use crate::knowledge::SUGGESTED_QUESTIONS;
use crate::message::Message;
use crate::runtime::{ResolutionBackend, SessionSnapshot};
use crate::state_machine::TransitionError;
use crate::transcript;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

/// Create the API router
pub fn create_router<B: ResolutionBackend + 'static>(state: AppState<B>) -> Router {
    Router::new()
        .route("/api/suggestions", get(list_suggestions))
        .route("/api/conversations/:id", get(get_conversation::<B>))
        .route(
            "/api/conversations/:id/messages",
            post(submit_message::<B>).delete(clear_messages::<B>),
        )
        .route("/api/conversations/:id/history", get(get_history_by_day::<B>))
        .route("/api/conversations/:id/export", get(export_transcript::<B>))
        .route("/api/conversations/:id/stream", get(stream_conversation::<B>))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn list_suggestions() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: SUGGESTED_QUESTIONS.to_vec(),
    })
}

// ============================================================
// Conversation
// ============================================================

// Read paths never create sessions: an unknown id reads as empty.

async fn history_of<B: ResolutionBackend + 'static>(state: &AppState<B>, id: &str) -> Vec<Message> {
    match state.registry.get(id).await {
        Some(store) => store.history(),
        None => Vec::new(),
    }
}

async fn get_conversation<B: ResolutionBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Json<SessionSnapshot> {
    let snapshot = match state.registry.get(&id).await {
        Some(store) => store.snapshot(),
        None => SessionSnapshot {
            messages: Vec::new(),
            busy: false,
        },
    };
    Json(snapshot)
}

async fn get_history_by_day<B: ResolutionBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Json<HistoryResponse> {
    let history = history_of(&state, &id).await;
    let days = transcript::group_by_day(&history)
        .into_iter()
        .map(|(date, messages)| DayGroup {
            date,
            messages: messages.into_iter().cloned().collect(),
        })
        .collect();
    Json(HistoryResponse { days })
}

async fn stream_conversation<B: ResolutionBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = state
        .registry
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Conversation not found: {id}")))?;
    let (snapshot, broadcast_rx) = store.snapshot_and_subscribe();
    Ok(sse_stream(snapshot, broadcast_rx))
}

async fn export_transcript<B: ResolutionBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let body = transcript::render(&history_of(&state, &id).await);
    let filename = transcript::export_filename(Utc::now().date_naive());

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

// ============================================================
// User Actions
// ============================================================

async fn submit_message<B: ResolutionBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let store = state.registry.get_or_create(&id).await;

    // The resolution keeps running after the response is sent
    let pending = store.begin(&req.text)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            message: pending.user_message.clone(),
        }),
    ))
}

async fn clear_messages<B: ResolutionBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> StatusCode {
    if let Some(store) = state.registry.get(&id).await {
        store.clear();
    }
    StatusCode::NO_CONTENT
}

async fn get_version() -> &'static str {
    concat!("financebot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<TransitionError> for AppError {
    fn from(error: TransitionError) -> Self {
        match error {
            TransitionError::EmptyQuery | TransitionError::QueryTooLong { .. } => {
                AppError::BadRequest(error.to_string())
            }
            TransitionError::Busy => AppError::Conflict(error.to_string()),
            TransitionError::InvalidTransition(_) => AppError::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
