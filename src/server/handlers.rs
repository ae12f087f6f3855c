//! HTTP request handlers
//!
//! Per-request orchestration for the chat endpoint and the supporting
//! descriptor, stats, and session endpoints. The chat flow is: resolve
//! mode, fetch or create the session, assemble the prompt, call the
//! generation provider, append the exchange, return the answer. There is
//! no transactional guarantee between the provider call and the history
//! append; a crash between the two loses the exchange, which is acceptable
//! for a non-persistent store.

use crate::error::{FolioError, Result};
use crate::prompts::build_prompt;
use crate::response_mode::ResponseMode;
use crate::server::types::{
    ApiError, AskRequest, AskResponse, HistoryEntry, ServiceInfo, SessionCreated,
    SessionHistoryResponse,
};
use crate::server::AppState;
use crate::stats::StatsSnapshot;

use axum::extract::{Path, State};
use axum::Json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// `POST /ask` — answer a question within a session
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> std::result::Result<Json<AskResponse>, ApiError> {
    let started = Instant::now();
    let result = handle_ask(&state, request).await;

    match result {
        Ok(mut response) => {
            let elapsed = started.elapsed();
            response.response_time = elapsed.as_secs_f64();
            state.stats.record_success(response.mode_used, elapsed);
            tracing::info!(
                session_id = %response.session_id,
                mode = %response.mode_used,
                elapsed_ms = elapsed.as_millis() as u64,
                "Answered question"
            );
            Ok(Json(response))
        }
        Err(error) => {
            let elapsed = started.elapsed();
            state.stats.record_error(elapsed);
            tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                "Failed to answer question: {}",
                error
            );
            Err(error.into())
        }
    }
}

/// Core of the ask flow, separated so the handler can record stats and
/// timing uniformly for both outcomes
async fn handle_ask(state: &AppState, request: AskRequest) -> Result<AskResponse> {
    if request.question.trim().is_empty() {
        return Err(FolioError::InvalidRequest("question must not be empty".to_string()).into());
    }

    let session_id = match request.session_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    };

    let requested_mode = request.mode.as_deref().unwrap_or(state.default_mode.as_str());
    let mode = ResponseMode::resolve(Some(requested_mode), &request.question);

    let history = state.store.get_or_create(&session_id);
    let window = history.recent(state.history_window);
    let prompt = build_prompt(mode, &state.context, &window, &request.question);

    tracing::debug!(
        session_id = %session_id,
        mode = %mode,
        prior_exchanges = history.len(),
        prompt_chars = prompt.len(),
        "Assembled prompt"
    );

    let answer = state.provider.generate(&prompt).await?;

    let conversation_length = state.store.append(
        &session_id,
        crate::session::Exchange::new(request.question, answer.clone(), mode),
    );

    Ok(AskResponse {
        answer,
        session_id,
        mode_used: mode,
        conversation_length,
        response_time: 0.0,
    })
}

/// `GET /` — service descriptor
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    let mut response_modes: BTreeMap<String, String> = ResponseMode::ALL
        .iter()
        .map(|mode| (mode.to_string(), mode.description().to_string()))
        .collect();
    response_modes.insert(
        crate::response_mode::AUTO_MODE.to_string(),
        "Automatically detect best mode".to_string(),
    );

    let endpoints: BTreeMap<String, String> = [
        ("ask", "/ask"),
        ("stats", "/stats"),
        ("new_session", "/session/new"),
        ("get_history", "/session/{session_id}"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect();

    Json(ServiceInfo {
        message: "FolioQA Portfolio Q&A API with Multi-Mode Responses".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.provider.model(),
        response_modes,
        endpoints,
    })
}

/// `GET /stats` — interaction statistics snapshot
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsJson> {
    let snapshot = state.stats.snapshot();
    Json(StatsJson {
        unique_sessions: state.store.session_count(),
        snapshot,
    })
}

/// Stats body: the recorder snapshot plus store-derived counters
#[derive(Debug, serde::Serialize)]
pub struct StatsJson {
    /// Sessions currently held in the store
    pub unique_sessions: usize,
    /// Interaction counters
    #[serde(flatten)]
    pub snapshot: StatsSnapshot,
}

/// `POST /session/new` — mint a fresh session
pub async fn new_session(State(state): State<Arc<AppState>>) -> Json<SessionCreated> {
    let session_id = Uuid::new_v4().to_string();
    state.store.get_or_create(&session_id);
    tracing::debug!(session_id = %session_id, "Created new session");
    Json(SessionCreated {
        session_id,
        message: "New conversation session created".to_string(),
    })
}

/// `GET /session/{session_id}` — role-tagged history for a session
pub async fn session_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> std::result::Result<Json<SessionHistoryResponse>, ApiError> {
    let history = state
        .store
        .get(&session_id)
        .ok_or_else(|| anyhow::Error::from(FolioError::SessionNotFound(session_id.clone())))?;

    let mut entries = Vec::with_capacity(history.len() * 2);
    for exchange in history.exchanges() {
        entries.push(HistoryEntry {
            role: "user".to_string(),
            content: exchange.question.clone(),
            mode: exchange.mode,
        });
        entries.push(HistoryEntry {
            role: "assistant".to_string(),
            content: exchange.answer.clone(),
            mode: exchange.mode,
        });
    }

    Ok(Json(SessionHistoryResponse {
        session_id,
        message_count: entries.len(),
        history: entries,
    }))
}
