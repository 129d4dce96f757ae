use std::path::PathBuf;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;

use crate::engine::{EngineSettings, ReplayPolicy};

#[derive(Clone, Deserialize)]
pub struct Config {
    pub application: ApplicationSettings,
    pub allow_cors: bool,
    pub game: GameSettings,
    pub vocabulary: VocabularySettings,
    #[serde(default)]
    pub assets: AssetSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GameSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub advance_delay_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub first_playback_delay_millis: u64,
    pub autoplay_next_round: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub next_round_playback_delay_millis: u64,
    #[serde(default)]
    pub replay_policy: ReplayPolicy,
    /// Fixed seed for reproducible word draws, entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameSettings {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            advance_delay: Duration::from_millis(self.advance_delay_millis),
            first_playback_delay: Duration::from_millis(self.first_playback_delay_millis),
            autoplay_next_round: self.autoplay_next_round,
            next_round_playback_delay: Duration::from_millis(self.next_round_playback_delay_millis),
            replay_policy: self.replay_policy,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct VocabularySettings {
    pub path: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AssetSettings {
    pub images_base_url: String,
    pub audio_base_url: String,
    pub image_extension: String,
    pub audio_extension: String,
    /// Serve `images/` and `audio/` from this directory when set.
    pub directory: Option<PathBuf>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            images_base_url: "/images".to_string(),
            audio_base_url: "/audio".to_string(),
            image_extension: "png".to_string(),
            audio_extension: "mp3".to_string(),
            directory: None,
        }
    }
}

impl Config {
    pub fn get() -> Result<Config, ConfigError> {
        let base_path = std::env::current_dir().map_err(|error| {
            ConfigError::Message(format!(
                "Failed to determine the current directory. Error: '{error}'."
            ))
        })?;
        let configuration_directory = base_path.join("config");

        let environment: Environment = std::env::var("ENVIRONMENT")
            .map_err(|_| ConfigError::Message("ENVIRONMENT variable is not set.".to_string()))?
            .try_into()
            .map_err(ConfigError::Message)?;

        let environment_filename = format!("{}.yaml", environment.as_str());

        let config = config::Config::builder()
            .add_source(config::File::from(
                configuration_directory.join("base.yaml"),
            ))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize::<Config>()
    }
}

enum Environment {
    Dev,
    Prod,
}

const DEV: &str = "dev";
const PROD: &str = "prod";

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV,
            Environment::Prod => PROD,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        match string.to_lowercase().as_str() {
            DEV => Ok(Self::Dev),
            PROD => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `{DEV}` or `{PROD}`.",
            )),
        }
    }
}
