use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use opsmate_core::{CallerIdentity, OpsmateError};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfigureRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// POST /configure-cli — assume the caller's role and write their CLI
/// profile.
///
/// Returns `CLI_ALREADY_CONFIGURED` without touching STS when a valid
/// cached session exists. Missing fields and absent role bindings are 400s;
/// STS or profile-write failures are 500s.
pub async fn configure_cli(
    State(app): State<AppState>,
    Json(body): Json<ConfigureRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = body
        .email
        .filter(|s| !s.is_empty())
        .ok_or(OpsmateError::MissingField("email"))?;
    let owner = body
        .owner
        .filter(|s| !s.is_empty())
        .ok_or(OpsmateError::MissingField("owner"))?;

    let identity = CallerIdentity::parse(email);

    if app.store.has_valid(identity.as_str()) {
        return Ok(Json(serde_json::json!({ "status": "CLI_ALREADY_CONFIGURED" })));
    }

    let record = app.issuer.assume(&identity, &owner).await?;
    app.store.put(identity.as_str(), record.clone());
    app.profile_writer
        .write(identity.profile(), &record, &app.region)
        .await?;

    info!(identity = %identity, "CLI configured");

    Ok(Json(serde_json::json!({ "status": "CLI configured successfully" })))
}
