use async_trait::async_trait;

use crate::Result;

/// Durable home for a serialized document.
///
/// Backends deal in raw bytes so the trait stays object safe; encoding is
/// the [`Store`](crate::Store)'s job.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the last persisted bytes, or `None` if nothing was ever written.
    async fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replaces the persisted bytes.
    async fn persist(&self, bytes: &[u8]) -> Result<()>;

    /// Human-readable location used in logs.
    fn describe(&self) -> String;
}
