use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::{Backend, InMemoryBackend, Result};

/// Marker for types that can live in a [`Store`].
pub trait Document: Serialize + DeserializeOwned + Default + Send + Sync + 'static {}

impl<T> Document for T where T: Serialize + DeserializeOwned + Default + Send + Sync + 'static {}

/// Shared handle to a persisted document.
///
/// All mutations run under one write lock and are persisted before the lock
/// is released, so writes reach the backend in the order they were applied.
/// Cloning the handle is cheap and every clone sees the same document.
pub struct Store<D> {
    doc: Arc<RwLock<D>>,
    backend: Arc<dyn Backend>,
}

impl<D> Clone for Store<D> {
    fn clone(&self) -> Self {
        Self {
            doc: Arc::clone(&self.doc),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<D: Document> Store<D> {
    /// Loads the document from `backend`, seeding it with `D::default()` on
    /// first use.
    #[tracing::instrument(skip(backend), fields(location = %backend.describe()))]
    pub async fn open(backend: impl Backend + 'static) -> Result<Self> {
        let backend: Arc<dyn Backend> = Arc::new(backend);
        let doc = match backend.load().await? {
            Some(bytes) => {
                tracing::info!(bytes = bytes.len(), "document loaded");
                serde_json::from_slice(&bytes)?
            }
            None => {
                let doc = D::default();
                backend.persist(&serde_json::to_vec_pretty(&doc)?).await?;
                tracing::info!("new document initialized");
                doc
            }
        };

        Ok(Self {
            doc: Arc::new(RwLock::new(doc)),
            backend,
        })
    }

    /// Wraps an existing document without touching the backend.
    pub fn with_document(doc: D, backend: impl Backend + 'static) -> Self {
        Self {
            doc: Arc::new(RwLock::new(doc)),
            backend: Arc::new(backend),
        }
    }

    /// A store holding `D::default()` backed by memory only.
    pub fn in_memory() -> Self {
        Self::with_document(D::default(), InMemoryBackend::new())
    }

    /// Runs `f` against a shared view of the document.
    pub async fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&D) -> T + Send,
    {
        let doc = self.doc.read().await;
        f(&doc)
    }

    /// Mutates the document and persists it.
    pub async fn update<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut D) -> T + Send,
        T: Send,
    {
        let mut doc = self.doc.write().await;
        let out = f(&mut doc);
        self.persist_locked(&doc).await;
        out
    }

    /// Mutates the document, persisting only when `f` succeeds.
    ///
    /// `f` must validate before it mutates: an `Err` leaves whatever it
    /// changed in memory but unpersisted.
    pub async fn try_update<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut D) -> std::result::Result<T, E> + Send,
        T: Send,
        E: Send,
    {
        let mut doc = self.doc.write().await;
        let out = f(&mut doc)?;
        self.persist_locked(&doc).await;
        Ok(out)
    }

    /// Persists the current document, surfacing any failure.
    pub async fn flush(&self) -> Result<()> {
        let doc = self.doc.read().await;
        let bytes = serde_json::to_vec_pretty(&*doc)?;
        self.backend.persist(&bytes).await
    }

    /// Persistence inside a mutation is best effort: the in-memory document
    /// stays authoritative and the failure is only logged.
    async fn persist_locked(&self, doc: &D) {
        let result = match serde_json::to_vec_pretty(doc) {
            Ok(bytes) => self.backend.persist(&bytes).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            metrics::counter!("store_persist_failures_total").increment(1);
            tracing::error!(
                error = %e,
                backend = %self.backend.describe(),
                "failed to persist document"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[tokio::test]
    async fn open_seeds_default_document() {
        let backend = InMemoryBackend::new();
        let store: Store<Counter> = Store::open(backend.clone()).await.unwrap();

        assert_eq!(store.read(|c| c.value).await, 0);
        assert_eq!(backend.write_count(), 1);
    }

    #[tokio::test]
    async fn update_persists_each_mutation() {
        let backend = InMemoryBackend::new();
        let store: Store<Counter> = Store::with_document(Counter::default(), backend.clone());

        store.update(|c| c.value += 1).await;
        store.update(|c| c.value += 1).await;

        assert_eq!(backend.write_count(), 2);
        let reloaded: Store<Counter> = Store::open(backend).await.unwrap();
        assert_eq!(reloaded.read(|c| c.value).await, 2);
    }

    #[tokio::test]
    async fn try_update_skips_persist_on_error() {
        let backend = InMemoryBackend::new();
        let store: Store<Counter> = Store::with_document(Counter::default(), backend.clone());

        let result: std::result::Result<(), &str> = store.try_update(|_| Err("rejected")).await;

        assert_eq!(result, Err("rejected"));
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn persist_failure_does_not_fail_update() {
        let backend = InMemoryBackend::new();
        backend.set_failing(true);
        let store: Store<Counter> = Store::with_document(Counter::default(), backend.clone());

        let value = store
            .update(|c| {
                c.value = 7;
                c.value
            })
            .await;

        assert_eq!(value, 7);
        assert_eq!(store.read(|c| c.value).await, 7);
        assert!(store.flush().await.is_err());
    }

    #[tokio::test]
    async fn clones_share_the_document() {
        let store: Store<Counter> = Store::in_memory();
        let other = store.clone();

        store.update(|c| c.value = 3).await;

        assert_eq!(other.read(|c| c.value).await, 3);
    }
}
