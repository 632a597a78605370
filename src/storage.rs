use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::debug;

/// Destination for uploaded article images.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist `body` under a collision-avoiding name derived from
    /// `original_name`, returning the stored filename.
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String>;
}

/// Writes uploads into a local directory, served back under `/uploads`.
pub struct DiskStorage {
    dir: PathBuf,
}

impl DiskStorage {
    pub async fn new(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create upload dir {}", dir.display()))?;
        Ok(Self { dir })
    }
}

/// Clients control the original filename; keep only its final component.
fn sanitize_name(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("arquivo");
    base.replace(['/', '\\'], "_")
}

#[async_trait]
impl UploadStore for DiskStorage {
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String> {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let stored = format!("{}-{}", millis, sanitize_name(original_name));
        let path = self.dir.join(&stored);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        debug!(file = %stored, bytes = body.len(), "upload stored");
        Ok(stored)
    }
}
