//! Order and item state machines.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The lifecycle status of an order.
///
/// State transitions:
/// ```text
/// pending ──► preparing ──► ready ──► completed
///   (kitchen)      (kitchen)     (billing only)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, waiting for the kitchen to pick it up.
    #[default]
    Pending,

    /// Kitchen is cooking.
    Preparing,

    /// Food is ready to serve; the order can be billed.
    Ready,

    /// Billed and closed (terminal state).
    Completed,
}

impl OrderStatus {
    /// The next status a kitchen action may move this order to.
    ///
    /// `Ready` has no kitchen successor: `Completed` is reached only by billing.
    pub fn next_kitchen_status(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready | OrderStatus::Completed => None,
        }
    }

    /// Returns true if a kitchen action may move the order to `target`.
    pub fn can_advance_to(&self, target: OrderStatus) -> bool {
        self.next_kitchen_status() == Some(target)
    }

    /// Returns true if the order can be billed in this status.
    pub fn can_bill(&self) -> bool {
        matches!(self, OrderStatus::Ready)
    }

    /// Returns true if items may still be cancelled.
    pub fn can_cancel_items(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Status of a single line item. Cancellation is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Cancelled,
}

impl ItemStatus {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ItemStatus::Cancelled)
    }
}

/// How strictly the lifecycle rules are enforced.
///
/// `Strict` applies the transition table above and refuses to bill an order
/// twice. `Permissive` accepts any status change and any billing request,
/// which is how the kitchen displays behaved before transitions were checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePolicy {
    #[default]
    Strict,
    Permissive,
}

impl LifecyclePolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, LifecyclePolicy::Strict)
    }
}

impl FromStr for LifecyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(LifecyclePolicy::Strict),
            "permissive" => Ok(LifecyclePolicy::Permissive),
            other => Err(format!("unknown lifecycle policy: {other}")),
        }
    }
}
