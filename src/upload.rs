//! Stores uploaded point images on disk under a collision-free name.

use crate::error::AppError;
use std::path::{Path, PathBuf};

/// Characters kept from the client's file name; everything else becomes `-`.
fn sanitize(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '-' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `<12 hex chars>-<sanitized original name>`
pub fn stored_name(original: &str) -> String {
    let prefix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", &prefix[..12], sanitize(original))
}

/// Writes uploads into one directory, created on first use.
#[derive(Clone, Debug)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        UploadDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `bytes` and return the stored file name (relative to the root).
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let name = stored_name(original_name);
        tokio::fs::write(self.root.join(&name), bytes).await?;
        tracing::info!(file = %name, size = bytes.len(), "stored upload");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("market.jpg", "market.jpg")]
    #[case("../../etc/passwd", "passwd")]
    #[case("foto do mercado.png", "foto-do-mercado.png")]
    #[case(".hidden", "hidden")]
    #[case("", "image")]
    fn sanitizes_client_file_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize(raw), expected);
    }

    #[test]
    fn stored_names_are_prefixed_and_unique() {
        let a = stored_name("market.jpg");
        let b = stored_name("market.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("-market.jpg"));
        assert_eq!(a.len(), 12 + 1 + "market.jpg".len());
    }

    #[tokio::test]
    async fn save_writes_file_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadDir::new(dir.path().join("uploads"));
        let name = uploads.save("logo.svg", b"<svg/>").await.unwrap();
        let written = tokio::fs::read(uploads.root().join(&name)).await.unwrap();
        assert_eq!(written, b"<svg/>");
    }
}
