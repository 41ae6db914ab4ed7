use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{Backend, Result, StoreError};

/// Backend that keeps the document in a single pretty-printed JSON file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend for `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl Backend for JsonFileBackend {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn persist(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        let backend = JsonFileBackend::new("/var/lib/pos/database.json");
        assert_eq!(
            backend.temp_path(),
            PathBuf::from("/var/lib/pos/database.json.tmp")
        );
    }
}
