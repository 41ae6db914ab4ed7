//! Outbound seam between the order lifecycle and whatever pushes events to
//! connected screens.

use std::sync::{Arc, Mutex};

use crate::order::OrderEvent;

/// Receives order events once the change behind them has been persisted.
///
/// Publishing is fire-and-forget: implementations must not block and must
/// swallow their own delivery failures.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: OrderEvent);
}

/// Publisher that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl EventPublisher for NullPublisher {
    fn publish(&self, _event: OrderEvent) {}
}

/// Publisher that keeps every event in memory, for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<OrderEvent>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything published so far.
    pub fn events(&self) -> Vec<OrderEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns the events with the given wire name.
    pub fn events_named(&self, name: &str) -> Vec<OrderEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.name() == name)
            .collect()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: OrderEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl<P: EventPublisher + ?Sized> EventPublisher for Arc<P> {
    fn publish(&self, event: OrderEvent) {
        (**self).publish(event);
    }
}
