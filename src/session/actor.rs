use std::fmt::{Display, Formatter};

use tokio::sync::mpsc::{self, Receiver, Sender, WeakSender};
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::task::JoinHandle;
use tokio::time;

use crate::config::GameSettings;
use crate::engine::timer::ScheduledTimer;
use crate::engine::{RoundEngine, Selection, SessionSnapshot};
use crate::error::Error;
use crate::metrics::{ACTIVE_SESSIONS, CORRECT_ANSWERS, ROUNDS_PLAYED};
use crate::random::StdRandom;
use crate::session::actor_client::{SessionClient, SessionEventReceiver};
use crate::session::PendingAudio;
use crate::vocabulary::Vocabulary;
use crate::word::Word;

/// Owns one player's [`RoundEngine`] and turns its timer requests into tokio sleeps.
///
/// User commands and fired timers arrive through the same channel, so the engine
/// only ever sees one event at a time.
pub struct SessionActor {
    engine: RoundEngine<StdRandom, PendingAudio>,
    session_rx: Receiver<SessionCommand>,
    timer_tx: WeakSender<SessionCommand>,
    event_tx: Sender<SessionEvent>,
    timers: Vec<JoinHandle<()>>,
    last_snapshot: Option<SessionSnapshot>,
}

impl SessionActor {
    pub fn spawn(settings: &GameSettings, vocabulary: Vocabulary) -> (SessionClient, SessionEventReceiver) {
        let (session_tx, session_rx): (Sender<SessionCommand>, Receiver<SessionCommand>) =
            mpsc::channel(128);
        let (event_tx, event_rx): (Sender<SessionEvent>, Receiver<SessionEvent>) =
            mpsc::channel(128);

        let engine = RoundEngine::new(
            vocabulary,
            settings.engine_settings(),
            StdRandom::from_seed(settings.seed),
            PendingAudio::default(),
        );

        tokio::spawn(
            SessionActor {
                engine,
                session_rx,
                timer_tx: session_tx.downgrade(),
                event_tx,
                timers: Vec::default(),
                last_snapshot: None,
            }
            .start(),
        );

        (SessionClient { session_tx }, SessionEventReceiver { event_rx })
    }

    async fn start(mut self) {
        ACTIVE_SESSIONS.inc();
        log::info!("Session started.");

        while let Some(command) = self.session_rx.recv().await {
            let response = match command {
                SessionCommand::Start { response_tx } => {
                    let result = self.engine.start().map(|timer| {
                        if let Some(timer) = timer {
                            self.schedule(timer);
                        }
                    });
                    Some((result, response_tx))
                }
                SessionCommand::SelectCandidate { word, response_tx } => {
                    let result = self.engine.select_candidate(&word).map(|selection| {
                        if let Selection::Resolved { correct, advance } = selection {
                            ROUNDS_PLAYED.inc();
                            if correct {
                                CORRECT_ANSWERS.inc();
                            }
                            self.schedule(advance);
                        }
                    });
                    Some((result, response_tx))
                }
                SessionCommand::Replay { response_tx } => Some((self.engine.replay(), response_tx)),
                SessionCommand::PlaybackFailed { word, reason } => {
                    log::warn!("The player could not play the audio. Word: '{word}', Reason: '{reason}'.");
                    None
                }
                SessionCommand::TimerFired { timer } => {
                    if let Some(next) = self.engine.on_timer(timer) {
                        self.schedule(next);
                    }
                    None
                }
            };

            if let Some((result, response_tx)) = response {
                if let Err(error) = response_tx.send(result) {
                    log::error!("Sent a response to the player but the response channel is closed. Error: '{error:?}'.");
                }
            }
            if self.publish().await.is_err() {
                log::info!("The player event channel has been dropped. Stopping session actor.");
                break;
            }
        }

        self.stop();
        ACTIVE_SESSIONS.dec();
    }

    fn schedule(&mut self, timer: ScheduledTimer) {
        let timer_tx = self.timer_tx.clone();
        self.timers.retain(|handle| !handle.is_finished());
        self.timers.push(tokio::spawn(async move {
            time::sleep(timer.delay).await;
            // A pending timer must not keep the session alive
            let Some(timer_tx) = timer_tx.upgrade() else {
                log::debug!("Session is gone, dropping timer. Timer: '{timer}'.");
                return;
            };
            let _ = timer_tx.send(SessionCommand::TimerFired { timer }).await;
        }));
    }

    /// Sends the state first, then the audio requested by the same transition.
    async fn publish(&mut self) -> Result<(), Error> {
        self.publish_snapshot().await?;
        for word in self.engine.audio_mut().take() {
            self.event_tx
                .send(SessionEvent::PlayAudio { word })
                .await
                .map_err(|error| Error::WebsocketClosed(error.to_string()))?;
        }
        Ok(())
    }

    async fn publish_snapshot(&mut self) -> Result<(), Error> {
        let snapshot = self.engine.snapshot();
        if self.last_snapshot.as_ref() == Some(&snapshot) {
            return Ok(());
        }
        self.last_snapshot = Some(snapshot.clone());
        self.event_tx
            .send(SessionEvent::State(snapshot))
            .await
            .map_err(|error| Error::WebsocketClosed(error.to_string()))
    }

    fn stop(self) {
        for timer in &self.timers {
            timer.abort();
        }
        log::info!(
            "Session stopped. Score: '{}', Started: '{}'.",
            self.engine.score(),
            self.engine.is_started()
        );
    }
}

pub(crate) enum SessionCommand {
    Start {
        response_tx: OneshotSender<Result<(), Error>>,
    },
    SelectCandidate {
        word: Word,
        response_tx: OneshotSender<Result<(), Error>>,
    },
    Replay {
        response_tx: OneshotSender<Result<(), Error>>,
    },
    PlaybackFailed {
        word: Word,
        reason: String,
    },
    TimerFired {
        timer: ScheduledTimer,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    State(SessionSnapshot),
    PlayAudio { word: Word },
}

impl Display for SessionEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::State(snapshot) => write!(
                formatter,
                "SessionEvent::State(score: {}, started: {})",
                snapshot.score, snapshot.started
            ),
            SessionEvent::PlayAudio { word } => {
                write!(formatter, "SessionEvent::PlayAudio(word: {word})")
            }
        }
    }
}
