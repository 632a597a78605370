use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to clients. Every handler converts its errors into one
/// of these at the boundary; nothing propagates past the router.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or empty request field.
    #[error("{0}")]
    BadRequest(String),
    /// Authentication failure with a fixed client-facing message.
    #[error("{0}")]
    Unauthorized(&'static str),
    /// Invalid or expired token. Kept distinct from 401 for client compat.
    #[error("{0}")]
    Forbidden(&'static str),
    /// Persistence or other internal failure.
    #[error("{message}")]
    Server {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn server(message: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        Self::Server {
            message,
            cause: cause.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::Server { message, cause } => {
                tracing::error!(error = %cause, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": message,
                        "error": cause.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn unauthorized_renders_success_false() {
        let resp = ApiError::Unauthorized("Credenciais inválidas").into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let v = body_json(resp).await;
        assert_eq!(v["success"], json!(false));
        assert_eq!(v["message"], "Credenciais inválidas");
    }

    #[tokio::test]
    async fn forbidden_renders_403() {
        let resp = ApiError::Forbidden("Token inválido ou expirado").into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let v = body_json(resp).await;
        assert_eq!(v["message"], "Token inválido ou expirado");
    }

    #[tokio::test]
    async fn server_error_attaches_raw_error() {
        let resp = ApiError::server("Erro no servidor", anyhow::anyhow!("pool timed out"))
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let v = body_json(resp).await;
        assert_eq!(v["message"], "Erro no servidor");
        assert_eq!(v["error"], "pool timed out");
    }
}
