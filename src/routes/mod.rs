use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::startup::AppState;

mod health;
mod metrics;
mod session;

pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/session/ws", get(session::connect_player_to_websocket));

    let router = match &config.assets.directory {
        Some(directory) => {
            log::info!("Serving assets from '{}'", directory.display());
            router
                .nest_service("/images", ServeDir::new(directory.join("images")))
                .nest_service("/audio", ServeDir::new(directory.join("audio")))
        }
        None => router,
    };

    router.layer(if config.allow_cors {
        log::info!("CorsLayer Permissive");
        CorsLayer::permissive()
    } else {
        CorsLayer::default()
    })
}
