use crate::error::{Error, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const ALLOWED_EXTENSIONS: [&str; 9] = [
    "pdf", "doc", "docx", "txt", "rtf", "jpg", "jpeg", "png", "webp",
];

/// Writes uploaded binaries below the configured uploads root and hands back
/// the URL they are served under.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Stores a résumé under a per-candidate path and returns its URL.
    pub async fn store_resume(
        &self,
        candidate_id: &str,
        filename: &str,
        data: &Bytes,
    ) -> Result<String> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!(
                "File type .{} is not allowed",
                ext
            )));
        }

        if ext == "pdf" && !data.starts_with(b"%PDF") {
            return Err(Error::BadRequest("Invalid PDF file content".into()));
        }
        if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
            return Err(Error::BadRequest("Invalid JPEG file content".into()));
        }
        if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Err(Error::BadRequest("Invalid PNG file content".into()));
        }

        let dir = self.root.join("resumes").join(candidate_id);
        fs::create_dir_all(&dir).await?;

        let safe_filename = format!("{}.{}", Uuid::new_v4(), ext);
        let file_path = dir.join(&safe_filename);

        fs::write(&file_path, data).await.map_err(|e| {
            tracing::error!("Failed to write resume file: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(format!("/uploads/resumes/{}/{}", candidate_id, safe_filename))
    }
}
