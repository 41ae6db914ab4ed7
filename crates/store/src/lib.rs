//! Document store for the POS system.
//!
//! A [`Store`] owns one serializable document behind a single async lock and
//! writes it through a [`Backend`] after every successful mutation. The
//! document type is chosen by the caller, so this crate knows nothing about
//! orders or bills.

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use backend::Backend;
pub use error::{Result, StoreError};
pub use file::JsonFileBackend;
pub use memory::InMemoryBackend;
pub use store::{Document, Store};
