use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use once_cell::sync::Lazy;
use picture_match::config::Config;
use picture_match::metrics::register_metrics;
use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, TcpStream};
use tokio::time;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

static LOGGER: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        std_logger::Config::logfmt().init();
    }
});

// Every app in this binary shares the process wide registry
static METRICS: Lazy<()> = Lazy::new(register_metrics);

pub struct TestApp {
    pub base_address: String,
    pub advance_delay: Duration,
}

impl TestApp {
    pub async fn spawn() -> TestApp {
        Lazy::force(&LOGGER);
        Lazy::force(&METRICS);

        // Binding to port 0 triggers an OS scan for an available port, this way we can run tests in parallel where each runs its own application
        let random_port_address = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to bind random port.");
        let address = listener.local_addr().unwrap();
        std::env::set_var("ENVIRONMENT", "dev");
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            config.game.advance_delay_millis = 300;
            config.game.first_playback_delay_millis = 50;
            config.game.next_round_playback_delay_millis = 50;
            config
        };
        let advance_delay = Duration::from_millis(config.game.advance_delay_millis);

        let _ = tokio::spawn(picture_match::startup::create_web_server(config, listener));

        TestApp {
            base_address: format!("127.0.0.1:{}", address.port()),
            advance_delay,
        }
    }

    pub async fn connect_player(&self) -> TestPlayer {
        let (websocket, _) =
            tokio_tungstenite::connect_async(format!("ws://{}/session/ws", self.base_address))
                .await
                .expect("WebSocket could not be created.");
        let (tx, rx) = websocket.split();
        TestPlayer { tx, rx }
    }
}

pub struct TestPlayer {
    pub tx: SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>,
    pub rx: SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl TestPlayer {
    pub async fn send(&mut self, message: ClientMessage) {
        self.send_text(serde_json::to_string(&message).unwrap()).await;
    }

    pub async fn send_text(&mut self, text: String) {
        self.tx
            .send(Message::Text(text))
            .await
            .expect("Could not send the message.");
    }

    pub async fn receive(&mut self) -> ServerMessage {
        let message = time::timeout(Duration::from_secs(5), self.rx.next())
            .await
            .expect("Timed out waiting for a message.");
        match message {
            Some(Ok(message)) => serde_json::from_str(message.to_text().expect("Message was not a text"))
                .expect("Could not parse the message."),
            Some(Err(error)) => panic!("Websocket returned an error {error}"),
            None => panic!("Websocket closed before expected."),
        }
    }

    pub async fn receive_state(&mut self) -> SessionState {
        match self.receive().await {
            ServerMessage::SessionState {
                started,
                score,
                round,
                replay_available,
            } => SessionState {
                started,
                score,
                round,
                replay_available,
            },
            other => panic!("Expected a session state, got {other:?}"),
        }
    }

    pub async fn receive_audio(&mut self) -> (String, String) {
        match self.receive().await {
            ServerMessage::PlayAudio { word, url } => (word, url),
            other => panic!("Expected a play audio message, got {other:?}"),
        }
    }

    pub async fn receive_error(&mut self) -> String {
        match self.receive().await {
            ServerMessage::Error {
                r#type,
                title,
                detail,
            } => {
                assert!(!title.is_empty());
                assert!(!detail.is_empty());
                r#type
            }
            other => panic!("Expected an error, got {other:?}"),
        }
    }

    /// Starts the game and returns the first state and the word whose audio was played.
    pub async fn start_game(&mut self) -> (SessionState, String) {
        self.send(ClientMessage::StartGame).await;
        let state = self.receive_state().await;
        let (target, _) = self.receive_audio().await;
        (state, target)
    }
}

#[derive(Debug)]
pub struct SessionState {
    pub started: bool,
    pub score: u32,
    pub round: Option<Round>,
    pub replay_available: bool,
}

impl SessionState {
    pub fn round(&self) -> &Round {
        self.round.as_ref().expect("Expected a round")
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Error {
        r#type: String,
        title: String,
        detail: String,
    },
    #[serde(rename_all = "camelCase")]
    SessionState {
        started: bool,
        score: u32,
        round: Option<Round>,
        replay_available: bool,
    },
    PlayAudio {
        word: String,
        url: String,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: u64,
    pub candidates: Vec<Candidate>,
    pub resolved: bool,
    pub correct: Option<bool>,
    pub target: Option<String>,
}

impl Round {
    pub fn words(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|candidate| candidate.word.clone())
            .collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub word: String,
    pub image_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ClientMessage {
    StartGame,
    SelectCandidate { word: String },
    ReplayAudio,
    PlaybackFailed { word: String, reason: String },
}
