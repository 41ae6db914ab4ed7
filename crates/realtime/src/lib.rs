//! Realtime fan-out for the POS.
//!
//! A single [`RealtimeHub`] per process receives order events from the
//! domain (through [`domain::EventPublisher`]) and hands them to every
//! connected session as pre-encoded JSON [`Frame`]s. The transport that
//! carries frames to the browser lives in the API crate.

pub mod error;
pub mod frame;
pub mod hub;
pub mod topic;

pub use error::RealtimeError;
pub use frame::{ClientFrame, Frame};
pub use hub::{DEFAULT_CAPACITY, RealtimeHub, Subscription};
pub use topic::{Topic, TopicFilter};
