use axum::Json;

/// GET / — liveness probe.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "running": "yes" }))
}

/// GET /health — container health check for orchestration services.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "healthy": true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_reports_running() {
        let body = root().await.0;
        assert_eq!(body["running"], "yes");
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let body = health().await.0;
        assert_eq!(body["healthy"], true);
    }
}
