use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{Config, GameSettings};
use crate::error::Error;
use crate::routes;
use crate::vocabulary::Vocabulary;
use crate::word::AssetResolver;

/// Read-only state shared by every connection.
pub struct AppState {
    pub game_settings: GameSettings,
    pub vocabulary: Vocabulary,
    pub assets: AssetResolver,
}

impl AppState {
    pub fn new(config: &Config) -> Result<AppState, Error> {
        let vocabulary = Vocabulary::from_file(&config.vocabulary.path)?;
        vocabulary.ensure_playable()?;
        log::info!(
            "Vocabulary loaded. Path: '{}', Words: '{}'.",
            config.vocabulary.path.display(),
            vocabulary.len()
        );

        Ok(AppState {
            game_settings: config.game.clone(),
            vocabulary,
            assets: AssetResolver::new(&config.assets),
        })
    }
}

pub async fn create_web_server(config: Config, listener: TcpListener) -> Result<(), Error> {
    let state = Arc::new(AppState::new(&config)?);
    let router = routes::create_router(&config).with_state(state);

    match listener.local_addr() {
        Ok(address) => log::info!("Listening on {address}"),
        Err(error) => log::warn!("Could not read the listening address. Error: '{error}'."),
    }

    axum::serve(listener, router).await.map_err(|error| {
        Error::log_and_create_internal(&format!("The web server stopped. Error: '{error}'."))
    })
}
