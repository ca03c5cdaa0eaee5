//! WebSocket handler.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS
//! - Extract the recipient identity from the query string
//! - Register the session's outbound queue with the registry so the dispatcher
//!   can reach it (addressed or broadcast)
//! - Lifecycle: ping/pong + idle timeout, deregistration on exit
//!
//! Connections are not authenticated; the identity is taken as given.

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, Query, State},
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::Instrument;

use loadwire_core::error::{LoadwireError, Result};
use loadwire_core::protocol::frame;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::realtime::Connection;
use crate::transport::codec::{decode, Inbound};

// --------------------
// Query parsing
// --------------------
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub user: String,
}

// --------------------
// Server-originated frames
// --------------------
fn connected_frame(user: &str, session: &str) -> Result<String> {
    frame::encode("connected", &json!({ "user": user, "session": session }))
}

fn error_frame(code: &str, msg: &str) -> Result<String> {
    frame::encode("error", &json!({ "code": code, "msg": msg }))
}

// --------------------
// Entry
// --------------------
pub async fn ws_upgrade(
    State(app): State<AppState>,
    ws: WebSocketUpgrade,
    Query(q): Query<WsQuery>,
) -> Response {
    let user = q.user.trim().to_string();
    if user.is_empty() {
        return ApiError(LoadwireError::BadRequest("user must not be empty".into())).into_response();
    }

    ws.on_upgrade(move |socket| async move {
        let span = tracing::info_span!("ws_session", %user);
        if let Err(e) = run_session(app, user, socket).instrument(span).await {
            tracing::warn!(error = %e, "session ended with error");
        }
    })
}

// --------------------
// Core session loop
// --------------------
async fn run_session(app: AppState, user: String, socket: WebSocket) -> Result<()> {
    let gw = &app.cfg().gateway;
    let registry = app.sessions();

    // ---- outbound channel, registered so dispatch can reach this session
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(gw.outbound_queue);
    let session_key = registry.next_session_key(&user);
    registry.insert(
        user.clone(),
        session_key.clone(),
        Connection { tx: out_tx.clone() },
    );
    tracing::info!(session = %session_key, "session registered");

    let result = session_loop(&app, &user, &session_key, socket, out_tx, &mut out_rx).await;

    registry.remove_session(&user, &session_key);
    tracing::info!(session = %session_key, "session closed");
    result
}

async fn session_loop(
    app: &AppState,
    user: &str,
    session_key: &str,
    socket: WebSocket,
    out_tx: mpsc::Sender<Message>,
    out_rx: &mut mpsc::Receiver<Message>,
) -> Result<()> {
    let (mut ws_tx, mut ws_rx) = socket.split();

    out_tx
        .send(Message::Text(connected_frame(user, session_key)?))
        .await
        .map_err(|_| LoadwireError::Internal("outbound channel closed".into()))?;

    let gw = &app.cfg().gateway;
    let ping_every = Duration::from_millis(gw.ping_interval_ms);
    let idle_timeout = Duration::from_millis(gw.idle_timeout_ms);

    let mut ping_tick = tokio::time::interval(ping_every);
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut last_activity = Instant::now();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(m) => {
                        if ws_tx.send(m).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let Ok(msg) = incoming else { break; };

                last_activity = Instant::now();

                match decode(msg) {
                    Ok(Inbound::Event { frame, bytes_len }) => {
                        // Clients only receive events; inbound events are advisory.
                        tracing::debug!(event = %frame.event, bytes_len, "client event ignored");
                    }
                    Ok(Inbound::Binary { bytes_len }) => {
                        tracing::debug!(bytes_len, "binary frame ignored");
                    }
                    Ok(Inbound::Ping(payload)) => {
                        let _ = out_tx.try_send(Message::Pong(payload));
                    }
                    Ok(Inbound::Pong(_)) => {}
                    Ok(Inbound::Close) => break,
                    Err(e) => {
                        tracing::debug!(error = %e, "inbound decode failed");
                        if let Ok(s) = error_frame(e.client_code().as_str(), &e.to_string()) {
                            let _ = out_tx.try_send(Message::Text(s));
                        }
                    }
                }
            }

            // ping
            _ = ping_tick.tick() => {
                let _ = out_tx.try_send(Message::Ping(Vec::new()));
            }

            // idle timeout
            _ = tokio::time::sleep_until(last_activity + idle_timeout) => {
                if let Ok(s) = error_frame("TIMEOUT", "idle timeout") {
                    let _ = ws_tx.send(Message::Text(s)).await;
                }
                break;
            }
        }
    }

    Ok(())
}
