use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthRequest, AuthResponse, ProtectedResponse, RegisterRequest, RegisterResponse,
            ValidateTokenResponse,
        },
        extractors::CurrentUser,
        jwt::JwtKeys,
        password,
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/authenticate", post(authenticate))
        .route("/validateToken", post(validate_token))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();

    if payload.username.is_empty() {
        return Err(ApiError::BadRequest("username é obrigatório".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::BadRequest("password é obrigatório".into()));
    }

    // Check-then-insert; the UNIQUE constraint on username is the backstop
    // for a concurrent insert.
    if let Ok(Some(_)) = User::find_by_username(&state.db, &payload.username).await {
        warn!(username = %payload.username, "username already taken");
        return Err(ApiError::Unauthorized("Usuário já existe"));
    }

    let hash = password::hash_password(&payload.password)
        .map_err(|e| ApiError::server("Erro no servidor", e))?;

    let user = User::create(&state.db, &payload.username, &hash)
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            ApiError::server("Erro no servidor", e)
        })?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Usuário registrado com sucesso",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn authenticate(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = match User::find_by_username(&state.db, &payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(username = %payload.username, "unknown username");
            return Err(ApiError::Unauthorized("Credenciais inválidas"));
        }
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err(ApiError::server("Erro no servidor", e));
        }
    };

    let ok = password::verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::server("Erro no servidor", e))?;

    if !ok {
        warn!(user_id = %user.id, "invalid password");
        return Err(ApiError::Unauthorized("Credenciais inválidas"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(user.id)
        .map_err(|e| ApiError::server("Erro no servidor", e))?;

    info!(user_id = %user.id, "user authenticated");
    Ok(Json(AuthResponse {
        success: true,
        token,
        username: user.username,
    }))
}

#[instrument(skip_all)]
pub async fn validate_token(CurrentUser(user): CurrentUser) -> Json<ValidateTokenResponse> {
    Json(ValidateTokenResponse {
        success: true,
        user,
    })
}

#[instrument(skip_all)]
pub async fn protected(CurrentUser(user): CurrentUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Acesso autorizado",
        user: user.username,
    })
}
