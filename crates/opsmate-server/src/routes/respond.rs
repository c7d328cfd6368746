use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use opsmate_agent::Dispatcher;
use opsmate_core::{gate, OpsmateError};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /get-response — answer a question with the default backend.
pub async fn get_response(
    State(app): State<AppState>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let backends = app.backends.clone();
    respond(&app, &backends.default, body).await
}

/// POST /get-response/claude-sonnet — same contract, Sonnet backend.
pub async fn get_sonnet_response(
    State(app): State<AppState>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let backends = app.backends.clone();
    respond(&app, &backends.sonnet, body).await
}

/// POST /get-response/claude-haiku — same contract, Haiku backend.
pub async fn get_haiku_response(
    State(app): State<AppState>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let backends = app.backends.clone();
    respond(&app, &backends.haiku, body).await
}

/// Shared handler body: session gate first, then field validation, then
/// dispatch. The gate must pass before any command execution is reachable
/// for this caller.
async fn respond(
    app: &AppState,
    dispatcher: &Dispatcher,
    body: QueryRequest,
) -> Result<Json<serde_json::Value>, AppError> {
    gate::require_configured(&app.store, body.email.as_deref())?;

    // The gate rejected empty/missing identities already.
    let email = body.email.unwrap_or_default();
    let query = body
        .query
        .filter(|s| !s.is_empty())
        .ok_or(OpsmateError::MissingField("query"))?;

    let response = dispatcher.ask(&query, &email).await?;
    Ok(Json(serde_json::json!({ "response": response })))
}
