use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::{error, warn};

use crate::auth::jwt::JwtKeys;
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the bearer token. Protected handlers
/// take this as an argument; rejection happens before the handler runs.
pub struct CurrentUser(pub User);

fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ")
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token =
            bearer_token(header).ok_or(ApiError::Unauthorized("Token não fornecido"))?;

        // Missing token is 401 but a bad token is 403; clients rely on the split.
        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::Forbidden("Token inválido ou expirado")
        })?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = %claims.sub, "user lookup failed");
                ApiError::Unauthorized("Erro na verificação do usuário")
            })?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token subject no longer exists");
                ApiError::Unauthorized("Usuário não encontrado")
            })?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, Request};
    use uuid::Uuid;

    #[test]
    fn bearer_token_parses_scheme() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(Some("Basic abc")), None);
        assert_eq!(bearer_token(Some("Bearer")), None);
        assert_eq!(bearer_token(None), None);
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/protected");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("rejection");
        assert!(matches!(err, ApiError::Unauthorized("Token não fornecido")));
    }

    #[tokio::test]
    async fn tampered_token_is_403() {
        let state = AppState::fake();
        let mut token = JwtKeys::from_ref(&state)
            .sign(Uuid::new_v4())
            .expect("sign");
        // Corrupt the signature segment.
        token.truncate(token.len() - 2);
        let header = format!("Bearer {}", token);
        let mut parts = parts_with_auth(Some(&header));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("rejection");
        assert!(matches!(
            err,
            ApiError::Forbidden("Token inválido ou expirado")
        ));
    }
}
