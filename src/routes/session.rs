use std::sync::Arc;

use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;

use crate::player::actor::PlayerActor;
use crate::startup::AppState;

pub async fn connect_player_to_websocket(
    State(state): State<Arc<AppState>>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade
        .on_upgrade(move |websocket| async move { PlayerActor::create(&state, websocket).await })
}
