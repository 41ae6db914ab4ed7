//! Kitchen order ticket (KOT) log.
//!
//! One immutable entry per ticket-affecting action, with the latency the
//! action took. The log is telemetry: recording never fails the operation
//! that triggered it.

use chrono::{DateTime, SubsecRound, Utc};
use common::{KotLogId, OrderId};
use serde::{Deserialize, Serialize};
use store::Store;

use crate::database::PosDatabase;

/// Number of entries the log viewer shows by default.
pub const DEFAULT_RECENT_LIMIT: usize = 100;

/// What happened to the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KotEventType {
    NewOrder,
    ReprintKot,
}

impl KotEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KotEventType::NewOrder => "new_order",
            KotEventType::ReprintKot => "reprint_kot",
        }
    }
}

impl std::fmt::Display for KotEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KotLogEntry {
    pub id: KotLogId,
    pub order_id: OrderId,
    #[serde(rename = "type")]
    pub event_type: KotEventType,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    /// Milliseconds.
    pub latency: u64,
}

/// Aggregate figures over the whole log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KotStats {
    /// Mean latency in milliseconds, rounded.
    #[serde(rename = "avgLatency")]
    pub avg_latency: u64,
    #[serde(rename = "totalKOTs")]
    pub total_kots: usize,
    /// Percentage of successful entries, rounded. 100 for an empty log.
    #[serde(rename = "successRate")]
    pub success_rate: u64,
}

impl KotStats {
    pub fn from_entries(entries: &[KotLogEntry]) -> Self {
        if entries.is_empty() {
            return Self {
                avg_latency: 0,
                total_kots: 0,
                success_rate: 100,
            };
        }

        let total = entries.len() as f64;
        let latency_sum: u64 = entries.iter().map(|e| e.latency).sum();
        let successes = entries.iter().filter(|e| e.success).count() as f64;

        Self {
            avg_latency: (latency_sum as f64 / total).round() as u64,
            total_kots: entries.len(),
            success_rate: (successes / total * 100.0).round() as u64,
        }
    }
}

/// Appends to and reads from the KOT log.
#[derive(Clone)]
pub struct KotLogRecorder {
    store: Store<PosDatabase>,
}

impl KotLogRecorder {
    pub fn new(store: Store<PosDatabase>) -> Self {
        Self { store }
    }

    /// Appends an entry. Persistence problems are logged by the store and
    /// never reach the caller.
    #[tracing::instrument(skip(self))]
    pub async fn record(
        &self,
        order_id: OrderId,
        event_type: KotEventType,
        success: bool,
        latency_ms: u64,
    ) -> KotLogEntry {
        let entry = self
            .store
            .update(|db| {
                // count + 1: entries are never deleted
                let entry = KotLogEntry {
                    id: KotLogId::new(db.kot_logs.len() as u64 + 1),
                    order_id,
                    event_type,
                    timestamp: Utc::now().trunc_subsecs(3),
                    success,
                    latency: latency_ms,
                };
                db.kot_logs.push(entry.clone());
                entry
            })
            .await;

        metrics::histogram!("kot_latency_ms", "type" => event_type.as_str())
            .record(latency_ms as f64);
        tracing::debug!(kot_id = %entry.id, "kot entry recorded");
        entry
    }

    /// The last `limit` entries, oldest first.
    pub async fn recent(&self, limit: usize) -> Vec<KotLogEntry> {
        self.store
            .read(|db| {
                let start = db.kot_logs.len().saturating_sub(limit);
                db.kot_logs[start..].to_vec()
            })
            .await
    }

    /// Recomputed from the full log on every call.
    pub async fn stats(&self) -> KotStats {
        self.store
            .read(|db| KotStats::from_entries(&db.kot_logs))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> KotLogRecorder {
        KotLogRecorder::new(Store::in_memory())
    }

    #[tokio::test]
    async fn test_stats_over_three_entries() {
        let kot = recorder();
        for latency in [100, 200, 300] {
            kot.record(OrderId::new(1), KotEventType::NewOrder, true, latency)
                .await;
        }

        let stats = kot.stats().await;
        assert_eq!(
            stats,
            KotStats {
                avg_latency: 200,
                total_kots: 3,
                success_rate: 100
            }
        );
    }

    #[tokio::test]
    async fn test_empty_stats() {
        let stats = recorder().stats().await;
        assert_eq!(stats.avg_latency, 0);
        assert_eq!(stats.total_kots, 0);
        assert_eq!(stats.success_rate, 100);
    }

    #[test]
    fn test_success_rate_rounds() {
        let entry = |success| KotLogEntry {
            id: KotLogId::first(),
            order_id: OrderId::first(),
            event_type: KotEventType::ReprintKot,
            timestamp: Utc::now(),
            success,
            latency: 1,
        };
        let stats = KotStats::from_entries(&[entry(true), entry(true), entry(false)]);
        assert_eq!(stats.success_rate, 67);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let kot = recorder();
        let first = kot.record(OrderId::new(5), KotEventType::NewOrder, true, 3).await;
        let second = kot.record(OrderId::new(5), KotEventType::ReprintKot, true, 1).await;

        assert_eq!(first.id, KotLogId::new(1));
        assert_eq!(second.id, KotLogId::new(2));
    }

    #[tokio::test]
    async fn test_recent_returns_tail_in_order() {
        let kot = recorder();
        for order in 1..=5 {
            kot.record(OrderId::new(order), KotEventType::NewOrder, true, 0)
                .await;
        }

        let tail = kot.recent(2).await;
        let ids: Vec<_> = tail.iter().map(|e| e.order_id.get()).collect();
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(kot.recent(DEFAULT_RECENT_LIMIT).await.len(), 5);
    }

    #[test]
    fn test_wire_shape() {
        let stats = KotStats::from_entries(&[]);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "avgLatency": 0, "totalKOTs": 0, "successRate": 100 })
        );
    }
}
