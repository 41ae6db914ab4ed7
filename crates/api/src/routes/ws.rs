//! Realtime channel for kitchen and cashier screens.
//!
//! GET /ws
//!
//! Protocol:
//! - Server → screen: `{"event": "new_order" | "order_status_update" |
//!   "item_cancelled" | "kot_reprint", "data": ...}`
//! - Screen → server: `reprint_kot {orderId}`, `subscribe {topics}`
//!
//! A screen that connects late gets no replay; it reads current orders over
//! HTTP and then follows the stream.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use realtime::{ClientFrame, Subscription, TopicFilter};
use tokio::time::{Duration, MissedTickBehavior};

use crate::state::AppState;

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// GET /ws: upgrade to a realtime session.
pub async fn upgrade(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| session(socket, state))
}

async fn session(socket: WebSocket, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();
    let mut subscription = state.hub.subscribe(TopicFilter::all());
    let session_id = subscription.id();

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ping_interval.tick().await; // first tick fires immediately

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            frame = subscription.recv() => {
                let Some(frame) = frame else { break };
                if sink.send(Message::Text(frame.text().into())).await.is_err() {
                    break;
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_frame(&state, &mut subscription, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(%session_id, error = %e, "socket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    tracing::debug!(%session_id, "socket closed");
}

async fn handle_client_frame(state: &AppState, subscription: &mut Subscription, text: &str) {
    match ClientFrame::parse(text) {
        Ok(ClientFrame::ReprintKot { order_id }) => {
            state.orders.request_reprint(order_id).await;
        }
        Ok(ClientFrame::Subscribe { topics }) => {
            subscription.set_filter(TopicFilter::only(topics));
        }
        Err(e) => {
            tracing::debug!(session_id = %subscription.id(), error = %e, "ignoring client frame");
        }
    }
}
