use crate::core::Storage;
use crate::utils::error::{CoverageError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 以目前工作目錄為基準
    pub fn current_dir() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        fs::read(&full_path).map_err(|source| CoverageError::ReadError {
            path: full_path.display().to_string(),
            source,
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        let write_error = |source| CoverageError::WriteError {
            path: full_path.display().to_string(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        // fs::write 會截斷既有內容
        fs::write(&full_path, data).map_err(write_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_truncates_and_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        storage
            .write_file("reports/out.txt", b"a much longer first version\n")
            .await
            .unwrap();
        storage.write_file("reports/out.txt", b"short\n").await.unwrap();

        let data = storage.read_file("reports/out.txt").await.unwrap();
        assert_eq!(data, b"short\n");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let err = storage.read_file("missing.xml").await.unwrap_err();
        match err {
            CoverageError::ReadError { path, source } => {
                assert!(path.ends_with("missing.xml"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_write_into_unwritable_location() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("blocker"), b"regular file").unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let err = storage
            .write_file("blocker/out.txt", b"data\n")
            .await
            .unwrap_err();
        match err {
            CoverageError::WriteError { path, .. } => assert!(path.ends_with("out.txt")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
