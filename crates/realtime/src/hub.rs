//! Process-wide event hub.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use domain::{EventPublisher, OrderEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

use crate::error::Result;
use crate::frame::Frame;
use crate::topic::TopicFilter;

/// Frames buffered per session before it starts lagging.
pub const DEFAULT_CAPACITY: usize = 256;

/// Fans order events out to every connected session.
///
/// Delivery is at most once per session with no replay: a session only sees
/// events published while it is subscribed. Cloning is cheap and every clone
/// shares the same channel.
#[derive(Clone)]
pub struct RealtimeHub {
    tx: broadcast::Sender<Arc<Frame>>,
    sessions: Arc<AtomicUsize>,
}

impl RealtimeHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Encodes `event` once and hands it to every session.
    ///
    /// Returns how many sessions it reached. No sessions is not an error.
    pub fn broadcast(&self, event: &OrderEvent) -> Result<usize> {
        let frame = Arc::new(Frame::encode(event)?);
        let topic = frame.topic();

        // send only fails when nobody is listening
        let delivered = self.tx.send(frame).unwrap_or(0);

        metrics::counter!("realtime_events_published_total", "topic" => topic.as_str())
            .increment(1);
        tracing::debug!(%topic, order_id = %event.order_id(), delivered, "event broadcast");
        Ok(delivered)
    }

    /// Opens a new session that receives events matching `filter`.
    pub fn subscribe(&self, filter: TopicFilter) -> Subscription {
        let rx = self.tx.subscribe();
        let guard = SessionGuard::open(Arc::clone(&self.sessions));
        tracing::info!(session_id = %guard.id, sessions = self.session_count(), "session opened");
        Subscription { rx, filter, guard }
    }

    /// Number of sessions currently open.
    pub fn session_count(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventPublisher for RealtimeHub {
    fn publish(&self, event: OrderEvent) {
        if let Err(e) = self.broadcast(&event) {
            tracing::error!(error = %e, event = event.name(), "failed to broadcast event");
        }
    }
}

/// One connected screen's view of the hub.
///
/// Dropping it closes the session.
pub struct Subscription {
    rx: broadcast::Receiver<Arc<Frame>>,
    filter: TopicFilter,
    guard: SessionGuard,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.guard.id
    }

    pub fn set_filter(&mut self, filter: TopicFilter) {
        tracing::debug!(session_id = %self.guard.id, ?filter, "session filter changed");
        self.filter = filter;
    }

    /// Waits for the next frame this session accepts.
    ///
    /// A session that falls more than the channel capacity behind loses the
    /// oldest events and resumes with the newest ones still buffered.
    /// Returns `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<Arc<Frame>> {
        loop {
            match self.rx.recv().await {
                Ok(frame) if self.filter.accepts(frame.topic()) => return Some(frame),
                Ok(_) => continue,
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(session_id = %self.guard.id, missed, "session lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

struct SessionGuard {
    id: Uuid,
    sessions: Arc<AtomicUsize>,
}

impl SessionGuard {
    fn open(sessions: Arc<AtomicUsize>) -> Self {
        let now = sessions.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::gauge!("realtime_sessions").set(now as f64);
        Self {
            id: Uuid::new_v4(),
            sessions,
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let now = self.sessions.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        metrics::gauge!("realtime_sessions").set(now as f64);
        tracing::info!(session_id = %self.id, sessions = now, "session closed");
    }
}
