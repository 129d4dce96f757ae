pub mod message;

use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use message::WsMessageOut;

use self::message::WsMessageIn;

pub async fn send_error(websocket: &mut WebSocket, error: &Error) {
    if let Err(send_error) = send_message(websocket, &error_to_ws_error(error)).await {
        log::error!("Could not send the error to the player. Error: '{error}', SendError: '{send_error}'.");
    }
}

pub async fn close(websocket: WebSocket) {
    if let Err(error) = websocket.close().await {
        log::debug!("Could not close WebSocket. Error: '{error}'.")
    }
}

pub fn parse_message(message: &str) -> Result<WsMessageIn, Error> {
    serde_json::from_str(message)
        .map_err(|error| Error::UnprocessableMessage(error.to_string(), message.to_string()))
}

pub async fn send_message<T>(websocket: &mut WebSocket, value: &T) -> Result<(), Error>
where
    T: ?Sized + Serialize,
{
    let message = serde_json::to_string(value).map_err(|error| {
        Error::log_and_create_internal(&format!(
            "Could not serialize the message. Error: '{error}'."
        ))
    })?;

    send_message_string(websocket, message).await
}

pub async fn send_message_string(websocket: &mut WebSocket, message: String) -> Result<(), Error> {
    websocket
        .send(Message::Text(message))
        .await
        .map_err(|error| Error::WebsocketClosed(error.to_string()))
}

fn error_to_ws_error(error: &Error) -> WsMessageOut {
    let (r#type, title) = match error {
        Error::Domain(DomainError::AlreadyStarted) => {
            ("ALREADY_STARTED", "The game has already been started")
        }
        Error::Domain(DomainError::InsufficientVocabulary { .. }) => (
            "INSUFFICIENT_VOCABULARY",
            "There are not enough words to play",
        ),
        Error::Domain(DomainError::NotStarted) => ("NOT_STARTED", "The game has not been started"),
        Error::Domain(DomainError::ReplayUnavailable) => {
            ("REPLAY_UNAVAILABLE", "The audio cannot be replayed now")
        }
        Error::Domain(DomainError::WordNotACandidate(_)) => (
            "WORD_NOT_A_CANDIDATE",
            "The word is not one of the current candidates",
        ),
        Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
        Error::UnprocessableMessage(_, _) => {
            ("UNPROCESSABLE_MESSAGE", "The message could not be processed")
        }
        Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The player websocket is closed"),
    };

    WsMessageOut::Error {
        r#type: r#type.to_string(),
        title: title.to_string(),
        detail: error.to_string(),
    }
}
