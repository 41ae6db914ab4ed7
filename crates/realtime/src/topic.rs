//! Named topics, one per event type.

use std::collections::HashSet;
use std::fmt;

use domain::OrderEvent;
use serde::{Deserialize, Serialize};

/// A stream of one kind of order event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    NewOrder,
    OrderStatusUpdate,
    ItemCancelled,
    KotReprint,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::NewOrder,
        Topic::OrderStatusUpdate,
        Topic::ItemCancelled,
        Topic::KotReprint,
    ];

    /// The topic an event is published on.
    pub fn of(event: &OrderEvent) -> Self {
        match event {
            OrderEvent::NewOrder(_) => Topic::NewOrder,
            OrderEvent::OrderStatusUpdate(_) => Topic::OrderStatusUpdate,
            OrderEvent::ItemCancelled(_) => Topic::ItemCancelled,
            OrderEvent::KotReprint(_) => Topic::KotReprint,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::NewOrder => OrderEvent::NEW_ORDER,
            Topic::OrderStatusUpdate => OrderEvent::ORDER_STATUS_UPDATE,
            Topic::ItemCancelled => OrderEvent::ITEM_CANCELLED,
            Topic::KotReprint => OrderEvent::KOT_REPRINT,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which topics a session wants. Defaults to everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    // None = no filtering
    topics: Option<HashSet<Topic>>,
}

impl TopicFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to `topics`. An empty list means every topic.
    pub fn only(topics: impl IntoIterator<Item = Topic>) -> Self {
        let topics: HashSet<_> = topics.into_iter().collect();
        Self {
            topics: (!topics.is_empty()).then_some(topics),
        }
    }

    pub fn accepts(&self, topic: Topic) -> bool {
        self.topics.as_ref().is_none_or(|t| t.contains(&topic))
    }

    pub fn is_all(&self) -> bool {
        self.topics.is_none()
    }
}
