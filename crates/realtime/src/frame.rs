//! Wire frames exchanged with connected screens.

use std::sync::Arc;

use common::OrderId;
use domain::OrderEvent;
use serde::{Deserialize, Serialize};

use crate::error::{RealtimeError, Result};
use crate::topic::Topic;

/// An order event encoded once for every session.
///
/// The text is `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    topic: Topic,
    order_id: OrderId,
    text: Arc<str>,
}

impl Frame {
    pub fn encode(event: &OrderEvent) -> Result<Self> {
        let text = serde_json::to_string(event).map_err(RealtimeError::Encode)?;
        Ok(Self {
            topic: Topic::of(event),
            order_id: event.order_id(),
            text: text.into(),
        })
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Decodes the frame back into the event it came from.
    pub fn decode(&self) -> Result<OrderEvent> {
        serde_json::from_str(&self.text).map_err(RealtimeError::Decode)
    }
}

/// Messages a screen may send over its realtime connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Ask every screen to print the ticket for an order again.
    ReprintKot {
        #[serde(rename = "orderId")]
        order_id: OrderId,
    },

    /// Narrow this session to the given topics. An empty list restores all.
    Subscribe {
        #[serde(default)]
        topics: Vec<Topic>,
    },
}

impl ClientFrame {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(RealtimeError::InvalidClientFrame)
    }
}
