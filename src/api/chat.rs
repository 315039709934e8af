//! Intake chat over WebSocket.
//!
//! On connect the server sends the transcript so far; each client message
//! is run through the dialogue engine and answered with a `reply` frame.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::AppState;
use super::rest::session_id;
use crate::error::Error;
use crate::intake::IntakePhase;
use crate::service::SessionService;
use crate::session::ChatMessage;

/// Message from client → server.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "message")]
    Message {
        #[serde(default)]
        content: String,
    },
}

/// Message from server → client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "transcript")]
    Transcript { messages: Vec<ChatMessage> },
    #[serde(rename = "reply")]
    Reply {
        content: String,
        phase: IntakePhase,
        intake_complete: bool,
        intake_just_completed: bool,
        completion_percent: u8,
    },
    #[serde(rename = "warning")]
    Warning { message: String },
    #[serde(rename = "error")]
    Error { message: String },
}

impl From<&Error> for ServerMessage {
    fn from(err: &Error) -> Self {
        match err {
            Error::Gate(_) => ServerMessage::Warning {
                message: err.to_string(),
            },
            _ => ServerMessage::Error {
                message: err.to_string(),
            },
        }
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match session_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    // Gate before upgrading so a blocked client gets a plain warning response.
    let transcript = match state.service.open_intake(id).await {
        Ok(messages) => messages,
        Err(e) => return e.into_response(),
    };

    info!(session_id = %id, "Intake chat client connecting");
    ws.on_upgrade(move |socket| handle_socket(socket, state.service, id, transcript))
}

async fn handle_socket(
    mut socket: WebSocket,
    service: Arc<SessionService>,
    id: Uuid,
    transcript: Vec<ChatMessage>,
) {
    info!(session_id = %id, "Intake chat client connected");

    let sync = ServerMessage::Transcript {
        messages: transcript,
    };
    if send(&mut socket, &sync).await.is_err() {
        warn!(session_id = %id, "Failed to send transcript, client disconnected");
        return;
    }

    while let Some(result) = socket.recv().await {
        match result {
            Ok(Message::Text(text)) => {
                let outgoing = handle_client_message(&service, id, &text).await;
                if let Some(msg) = outgoing {
                    if send(&mut socket, &msg).await.is_err() {
                        debug!(session_id = %id, "Client disconnected during send");
                        break;
                    }
                }
            }
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!(session_id = %id, "Intake chat client disconnected");
                break;
            }
            Err(e) => {
                warn!(session_id = %id, error = %e, "Intake chat WebSocket error");
                break;
            }
            _ => {}
        }
    }

    info!(session_id = %id, "Intake chat connection closed");
}

async fn handle_client_message(
    service: &SessionService,
    id: Uuid,
    text: &str,
) -> Option<ServerMessage> {
    let content = match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Message { content }) => content,
        Err(e) => {
            debug!(error = %e, text, "Unrecognized WS message from client");
            return Some(ServerMessage::Error {
                message: "Unrecognized message".to_string(),
            });
        }
    };

    match service.send_intake_message(id, content).await {
        Ok(exchange) => Some(ServerMessage::Reply {
            content: exchange.reply.reply,
            phase: exchange.reply.phase,
            intake_complete: exchange.reply.phase.is_terminal(),
            intake_just_completed: exchange.reply.intake_just_completed,
            completion_percent: exchange.completion_percent,
        }),
        Err(e) => {
            warn!(session_id = %id, error = %e, "Intake message failed");
            Some(ServerMessage::from(&e))
        }
    }
}

async fn send(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            warn!(error = %e, "Failed to serialize server message");
            Ok(())
        }
    }
}
