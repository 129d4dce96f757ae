use axum::extract::ws::{Message, WebSocket};
use tokio::select;

use crate::error::Error;
use crate::session::actor::{SessionActor, SessionEvent};
use crate::session::actor_client::{SessionClient, SessionEventReceiver};
use crate::startup::AppState;
use crate::websocket::message::{WsMessageIn, WsMessageOut};
use crate::websocket::{close, parse_message, send_error, send_message, send_message_string};
use crate::word::{AssetResolver, Word};

/// Bridges one websocket connection and its own session.
pub struct PlayerActor {
    session: SessionClient,
    session_events: SessionEventReceiver,
    websocket: WebSocket,
    assets: AssetResolver,
}

impl PlayerActor {
    pub async fn create(state: &AppState, websocket: WebSocket) {
        let (session, session_events) =
            SessionActor::spawn(&state.game_settings, state.vocabulary.clone());

        PlayerActor {
            session,
            session_events,
            websocket,
            assets: state.assets.clone(),
        }
        .start()
        .await
    }

    async fn start(mut self) {
        loop {
            let result = select! {
                session_event = self.session_events.next() => {
                    self.receive_session_event(session_event).await
                },
                websocket_message = self.websocket.recv() => {
                    self.receive_websocket_message(websocket_message).await
                },
            };

            if let Err(error) = result {
                if !matches!(error, Error::WebsocketClosed(_)) {
                    send_error(&mut self.websocket, &error).await;
                }
                if error.is_fatal() {
                    break;
                }
            }
        }

        close(self.websocket).await;
    }

    async fn receive_session_event(
        &mut self,
        session_event: Result<SessionEvent, Error>,
    ) -> Result<(), Error> {
        match session_event? {
            SessionEvent::State(snapshot) => {
                send_message(
                    &mut self.websocket,
                    &WsMessageOut::session_state(snapshot, &self.assets),
                )
                .await
            }
            SessionEvent::PlayAudio { word } => {
                send_message(
                    &mut self.websocket,
                    &WsMessageOut::play_audio(&word, &self.assets),
                )
                .await
            }
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Option<Result<Message, axum::Error>>,
    ) -> Result<(), Error> {
        match websocket_message {
            Some(Ok(Message::Text(txt))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong".to_string()).await,
                message => match parse_message(message)? {
                    WsMessageIn::StartGame => self.session.start().await,
                    WsMessageIn::SelectCandidate { word } => {
                        self.session.select_candidate(Word::from(word)).await
                    }
                    WsMessageIn::ReplayAudio => self.session.replay().await,
                    WsMessageIn::PlaybackFailed { word, reason } => {
                        self.session
                            .playback_failed(Word::from(word), &reason)
                            .await
                    }
                },
            },
            // browser said "close"
            Some(Ok(Message::Close(_))) => {
                PlayerActor::log_connection_lost("browser sent 'Close' websocket frame");
                Err(Error::WebsocketClosed(
                    "browser sent 'Close' websocket frame".to_string(),
                ))
            }
            // websocket was closed
            None => {
                PlayerActor::log_connection_lost("other end of websocket was closed abruptly");
                Err(Error::WebsocketClosed(
                    "other end of websocket was closed abruptly".to_string(),
                ))
            }
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => Ok(()),
            Some(Ok(Message::Binary(_))) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Binary".to_string(),
            )),
            Some(Err(error)) => Err(Error::UnprocessableMessage(
                "Message cannot be loaded".to_string(),
                error.to_string(),
            )),
        }
    }

    fn log_connection_lost(reason: &str) {
        log::info!("Connection with player lost due to: {reason}. Stopping player actor.");
    }
}
