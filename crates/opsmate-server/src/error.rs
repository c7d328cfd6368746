use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opsmate_core::OpsmateError;

/// Unified error type for HTTP responses.
///
/// Caller-correctable failures — missing fields, absent role bindings,
/// unconfigured or expired sessions — map to 400 with the domain error's
/// message as the body. Everything else (AWS SDK failures, spawn failures,
/// agent errors) is a 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<OpsmateError>() {
            match e {
                OpsmateError::MissingField(_)
                | OpsmateError::MissingEmail
                | OpsmateError::NoRoleBinding
                | OpsmateError::NotConfigured
                | OpsmateError::SessionExpired
                | OpsmateError::CommandRejected(_) => StatusCode::BAD_REQUEST,
                OpsmateError::Directory(_)
                | OpsmateError::AssumeRole(_)
                | OpsmateError::SpawnFailed { .. }
                | OpsmateError::ProfileWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_maps_to_400() {
        let err = AppError(OpsmateError::MissingField("email").into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_email_maps_to_400() {
        let err = AppError(OpsmateError::MissingEmail.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn no_role_binding_maps_to_400() {
        let err = AppError(OpsmateError::NoRoleBinding.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_configured_maps_to_400() {
        let err = AppError(OpsmateError::NotConfigured.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn session_expired_maps_to_400() {
        let err = AppError(OpsmateError::SessionExpired.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn assume_role_failure_maps_to_500() {
        let err = AppError(OpsmateError::AssumeRole("access denied".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn spawn_failure_maps_to_500() {
        let err = AppError(
            OpsmateError::SpawnFailed {
                command: "aws".into(),
                message: "ENOENT".into(),
            }
            .into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn agent_error_maps_to_500() {
        let err = AppError(opsmate_agent::AgentError::Model("throttled".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_is_json_with_error_field() {
        let err = AppError(OpsmateError::NotConfigured.into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
