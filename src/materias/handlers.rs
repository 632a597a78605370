use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::extractors::CurrentUser, error::ApiError, materias::repo_types::Materia,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/materias", get(listar_materias))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/materias", post(criar_materia))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /api/materias (multipart)
/// Fields: `titulo`, `conteudo`, optional single file `imagem`.
#[instrument(skip_all)]
pub async fn criar_materia(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<Materia>), ApiError> {
    let mut titulo: Option<String> = None;
    let mut conteudo: Option<String> = None;
    let mut imagem: Option<String> = None;

    while let Ok(Some(field)) = mp.next_field().await {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("titulo") => {
                titulo = Some(field.text().await.map_err(bad_multipart)?);
            }
            Some("conteudo") => {
                conteudo = Some(field.text().await.map_err(bad_multipart)?);
            }
            Some("imagem") => {
                let original = field.file_name().unwrap_or("arquivo").to_string();
                let data = field.bytes().await.map_err(bad_multipart)?;
                let stored = state
                    .storage
                    .save(&original, data)
                    .await
                    .map_err(|e| ApiError::server("Erro ao criar matéria", e))?;
                imagem = Some(stored);
            }
            _ => {}
        }
    }

    let titulo = titulo
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("titulo é obrigatório".into()))?;
    let conteudo = conteudo
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("conteudo é obrigatório".into()))?;

    let materia = Materia::create(&state.db, &titulo, &conteudo, imagem.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "create materia failed");
            ApiError::server("Erro ao criar matéria", e)
        })?;

    info!(id = %materia.id, "materia created");
    Ok((StatusCode::CREATED, Json(materia)))
}

/// GET /api/materias: the whole corpus, newest first.
#[instrument(skip_all)]
pub async fn listar_materias(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<Materia>>, ApiError> {
    let materias = Materia::list_all(&state.db).await.map_err(|e| {
        error!(error = %e, "list materias failed");
        ApiError::server("Erro ao buscar matérias", e)
    })?;
    Ok(Json(materias))
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(e.to_string())
}
