use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Matéria record in the database. `imagem` holds the stored filename of the
/// uploaded image, retrievable under `/uploads/<imagem>`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Materia {
    pub id: Uuid,
    pub titulo: String,
    pub conteudo: String,
    pub imagem: Option<String>,
    #[serde(rename = "criadoEm", with = "time::serde::rfc3339")]
    pub criado_em: OffsetDateTime,
}
