//! Storage for uploaded posters and information sheets.
//!
//! Files land in a flat directory under generated names; the stored name
//! is what the event record keeps and what `/uploads` serves.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::AppResult;

/// Filesystem store for uploaded files
#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub async fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Persist one uploaded file, returning the generated filename.
    ///
    /// The original filename only contributes its extension; the stored
    /// name is a fresh UUID so uploads can never collide or traverse paths.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> AppResult<String> {
        let filename = Self::generate_name(original_name);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!("Stored upload {} ({} bytes)", filename, bytes.len());
        Ok(filename)
    }

    fn generate_name(original_name: Option<&str>) -> String {
        let extension = original_name
            .map(Path::new)
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()));

        match extension {
            Some(ext) => format!("{}.{}", Uuid::new_v4().simple(), ext),
            None => Uuid::new_v4().simple().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_keep_safe_extensions() {
        let name = UploadStore::generate_name(Some("poster.png"));
        assert!(name.ends_with(".png"));

        let name = UploadStore::generate_name(Some("weird.p/ng"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn generated_names_without_extension() {
        let name = UploadStore::generate_name(None);
        assert!(!name.contains('.'));
        assert_eq!(name.len(), 32);
    }

    #[test]
    fn generated_names_are_unique() {
        let a = UploadStore::generate_name(Some("a.pdf"));
        let b = UploadStore::generate_name(Some("a.pdf"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn save_writes_file_to_store_dir() {
        let dir = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));
        let store = UploadStore::new(&dir).await.unwrap();

        let name = store.save(Some("fiche.pdf"), b"content").await.unwrap();
        let stored = tokio::fs::read(dir.join(&name)).await.unwrap();
        assert_eq!(stored, b"content");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
