use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Backend, Result, StoreError};

/// In-memory backend for tests and ephemeral servers.
///
/// Keeps the last persisted bytes so a second [`Store`](crate::Store) can be
/// loaded from the same backend, and can be switched into a failing mode to
/// exercise best-effort persistence paths.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    bytes: Arc<RwLock<Option<Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `persist` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent `persist` call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns a copy of the last persisted bytes.
    pub async fn contents(&self) -> Option<Vec<u8>> {
        self.bytes.read().await.clone()
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.read().await.clone())
    }

    async fn persist(&self, bytes: &[u8]) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory backend set to fail".into()));
        }
        *self.bytes.write().await = Some(bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_returns_none_before_first_write() {
        let backend = InMemoryBackend::new();
        assert!(backend.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn persist_then_load() {
        let backend = InMemoryBackend::new();
        backend.persist(b"{}").await.unwrap();
        assert_eq!(backend.load().await.unwrap().as_deref(), Some(&b"{}"[..]));
        assert_eq!(backend.write_count(), 1);
    }

    #[tokio::test]
    async fn failing_mode_rejects_writes() {
        let backend = InMemoryBackend::new();
        backend.set_failing(true);
        assert!(backend.persist(b"{}").await.is_err());
        assert_eq!(backend.write_count(), 0);

        backend.set_failing(false);
        backend.persist(b"{}").await.unwrap();
        assert_eq!(backend.write_count(), 1);
    }
}
