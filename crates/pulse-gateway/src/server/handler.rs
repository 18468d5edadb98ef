//! WebSocket handler
//!
//! Accepts upgrades on `/ws`, pins the connection's identity from the
//! `?userId=` query parameter, and runs the read/write task pair until
//! either side goes away. Teardown always unregisters and re-broadcasts
//! presence.

use crate::connection::Connection;
use crate::handlers::HandlerError;
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, Query, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use pulse_core::{ConnectionId, UserId};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handshake query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeParams {
    /// Identity to register under; absent connections are anonymous
    pub user_id: Option<String>,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    State(state): State<GatewayState>,
    Query(params): Query<HandshakeParams>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let user_id = params
        .user_id
        .filter(|id| !id.is_empty())
        .map(UserId::from);
    ws.on_upgrade(move |socket| handle_socket(state, socket, user_id))
}

/// Drive one upgraded WebSocket connection to completion
async fn handle_socket(
    state: GatewayState,
    socket: axum::extract::ws::WebSocket,
    user_id: Option<UserId>,
) {
    let connection_id = ConnectionId::generate();
    let (tx, mut rx) = mpsc::channel(state.config().gateway.message_buffer);
    let connection = Connection::new(connection_id, user_id, tx);

    tracing::info!(
        connection_id = %connection_id,
        user_id = ?connection.user_id(),
        "WebSocket connection established"
    );

    // Registration broadcasts the new online set to everyone, this
    // connection included.
    state.router().register_connection(connection.clone()).await;

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Write task: drains the outbound queue into the socket.
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to serialize outbound event");
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    // Read loop: every frame is handled in place; handler errors are
    // logged and never terminate the connection.
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Ignoring binary frame"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        connection_id = %connection_recv.id(),
                        "Client closed connection"
                    );
                    break;
                }
                Err(err) => {
                    tracing::warn!(
                        connection_id = %connection_recv.id(),
                        error = %err,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    // Either task ending means the connection is done.
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    // Teardown: unregister drops the presence and channel mappings and
    // re-broadcasts the shrunken online set.
    state.router().unregister_connection(connection_id).await;

    tracing::info!(connection_id = %connection_id, "Connection closed");
}

/// Handle one inbound text frame
async fn handle_text_frame(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    match state.dispatcher().dispatch(connection, text).await {
        Ok(()) => {}
        Err(HandlerError::MalformedFrame(err)) => {
            tracing::debug!(
                connection_id = %connection.id(),
                error = %err,
                "Ignoring malformed frame"
            );
        }
        Err(HandlerError::Unidentified) => {
            tracing::debug!(
                connection_id = %connection.id(),
                "Ignoring frame requiring an identified connection"
            );
        }
    }
}
