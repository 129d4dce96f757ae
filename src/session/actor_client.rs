use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::session::actor::{SessionCommand, SessionEvent};
use crate::word::Word;

type Response = Result<(), Error>;

#[derive(Clone, Debug)]
pub struct SessionClient {
    pub(super) session_tx: Sender<SessionCommand>,
}

impl SessionClient {
    pub async fn start(&self) -> Result<(), Error> {
        let (tx, rx): (OneshotSender<Response>, OneshotReceiver<Response>) = oneshot::channel();
        self.send(SessionCommand::Start { response_tx: tx }, "Start")
            .await?;
        SessionClient::receive(rx, "Start").await
    }

    pub async fn select_candidate(&self, word: Word) -> Result<(), Error> {
        let (tx, rx): (OneshotSender<Response>, OneshotReceiver<Response>) = oneshot::channel();
        self.send(
            SessionCommand::SelectCandidate {
                word,
                response_tx: tx,
            },
            "SelectCandidate",
        )
        .await?;
        SessionClient::receive(rx, "SelectCandidate").await
    }

    pub async fn replay(&self) -> Result<(), Error> {
        let (tx, rx): (OneshotSender<Response>, OneshotReceiver<Response>) = oneshot::channel();
        self.send(SessionCommand::Replay { response_tx: tx }, "Replay")
            .await?;
        SessionClient::receive(rx, "Replay").await
    }

    pub async fn playback_failed(&self, word: Word, reason: &str) -> Result<(), Error> {
        self.send(
            SessionCommand::PlaybackFailed {
                word,
                reason: reason.to_string(),
            },
            "PlaybackFailed",
        )
        .await
    }

    async fn send(&self, command: SessionCommand, name: &str) -> Result<(), Error> {
        self.session_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send SessionCommand::{name} but SessionActor is not listening. Error: '{error}'."
            ))
        })
    }

    async fn receive(rx: OneshotReceiver<Response>, name: &str) -> Result<(), Error> {
        rx.await.unwrap_or_else(|error| {
            Err(Error::log_and_create_internal(&format!(
                "Sent a SessionCommand::{name} to the Session, but the response channel died. Error: '{error}'."
            )))
        })
    }
}

pub struct SessionEventReceiver {
    pub(super) event_rx: Receiver<SessionEvent>,
}

impl SessionEventReceiver {
    pub async fn next(&mut self) -> Result<SessionEvent, Error> {
        self.event_rx.recv().await.ok_or_else(|| {
            Error::log_and_create_internal("The event channel with the Session has been closed.")
        })
    }
}
