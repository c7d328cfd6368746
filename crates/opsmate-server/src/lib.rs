//! `opsmate-server` — HTTP surface for the conversational AWS assistant.
//!
//! JSON request/response bodies throughout. `/configure-cli` drives the
//! credential lifecycle (role assumption + profile write); the
//! `/get-response` family is guarded by the session gate and fans out to a
//! dispatcher per reasoning backend.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use opsmate_agent::{BedrockBackend, Dispatcher};
use opsmate_core::{
    AwsCliProfileWriter, Config, CredentialStore, DynamoRoleDirectory, StsIssuer,
};

use state::{AppState, Backends};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route("/configure-cli", post(routes::configure::configure_cli))
        .route("/get-response", post(routes::respond::get_response))
        .route(
            "/get-response/claude-sonnet",
            post(routes::respond::get_sonnet_response),
        )
        .route(
            "/get-response/claude-haiku",
            post(routes::respond::get_haiku_response),
        )
        .layer(cors)
        .with_state(app_state)
}

/// Wire the production AWS clients into an [`AppState`].
pub async fn build_state(config: &Config) -> AppState {
    let sdk = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let directory = Arc::new(DynamoRoleDirectory::new(
        aws_sdk_dynamodb::Client::new(&sdk),
        config.tables.clone(),
    ));
    let issuer = Arc::new(StsIssuer::new(
        directory,
        aws_sdk_sts::Client::new(&sdk),
        config.session_duration_secs as i32,
    ));

    let bedrock = aws_sdk_bedrockruntime::Client::new(&sdk);
    let backends = Backends {
        default: Dispatcher::new(Arc::new(BedrockBackend::new(
            bedrock.clone(),
            &config.default_model,
        ))),
        sonnet: Dispatcher::new(Arc::new(BedrockBackend::new(
            bedrock.clone(),
            &config.sonnet_model,
        ))),
        haiku: Dispatcher::new(Arc::new(BedrockBackend::new(bedrock, &config.haiku_model))),
    };

    AppState::new(
        Arc::new(CredentialStore::new(config.session_duration_secs)),
        issuer,
        Arc::new(AwsCliProfileWriter),
        Arc::new(backends),
        &config.region,
    )
}

/// Start the HTTP server.
pub async fn serve(config: Config, port: u16) -> anyhow::Result<()> {
    let state = build_state(&config).await;
    let app = build_router(state, &config.allowed_origins);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        port,
        session_ttl_secs = config.session_duration_secs,
        "opsmate server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
