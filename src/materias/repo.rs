use sqlx::PgPool;

use crate::materias::repo_types::Materia;

impl Materia {
    /// Insert a new matéria and return the stored row with its assigned id.
    pub async fn create(
        db: &PgPool,
        titulo: &str,
        conteudo: &str,
        imagem: Option<&str>,
    ) -> anyhow::Result<Materia> {
        let materia = sqlx::query_as::<_, Materia>(
            r#"
            INSERT INTO materias (titulo, conteudo, imagem)
            VALUES ($1, $2, $3)
            RETURNING id, titulo, conteudo, imagem, criado_em
            "#,
        )
        .bind(titulo)
        .bind(conteudo)
        .bind(imagem)
        .fetch_one(db)
        .await?;
        Ok(materia)
    }

    /// The full corpus, newest first. No pagination.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Materia>> {
        let rows = sqlx::query_as::<_, Materia>(
            r#"
            SELECT id, titulo, conteudo, imagem, criado_em
            FROM materias
            ORDER BY criado_em DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
