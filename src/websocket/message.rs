use serde::{Deserialize, Serialize};

use crate::engine::{RoundSnapshot, SessionSnapshot};
use crate::word::{AssetResolver, Word};

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageIn {
    StartGame,
    #[serde(rename_all = "camelCase")]
    SelectCandidate {
        word: String,
    },
    ReplayAudio,
    #[serde(rename_all = "camelCase")]
    PlaybackFailed {
        word: String,
        #[serde(default)]
        reason: String,
    },
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageOut {
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
        round: Option<RoundDto>,
        replay_available: bool,
    },
    #[serde(rename_all = "camelCase")]
    PlayAudio { word: String, url: String },
}

impl WsMessageOut {
    pub fn session_state(snapshot: SessionSnapshot, assets: &AssetResolver) -> Self {
        WsMessageOut::SessionState {
            started: snapshot.started,
            score: snapshot.score,
            round: snapshot.round.map(|round| RoundDto::new(round, assets)),
            replay_available: snapshot.replay_available,
        }
    }

    pub fn play_audio(word: &Word, assets: &AssetResolver) -> Self {
        WsMessageOut::PlayAudio {
            word: word.to_string(),
            url: assets.audio_path(word),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoundDto {
    id: u64,
    candidates: Vec<CandidateDto>,
    resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

impl RoundDto {
    fn new(round: RoundSnapshot, assets: &AssetResolver) -> Self {
        RoundDto {
            id: round.id.0,
            candidates: round
                .candidates
                .iter()
                .map(|word| CandidateDto {
                    word: word.to_string(),
                    image_url: assets.image_path(word),
                })
                .collect(),
            resolved: round.resolved,
            correct: round.correct,
            target: round.target.map(|word| word.to_string()),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
    word: String,
    image_url: String,
}
