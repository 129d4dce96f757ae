use std::collections::HashSet;

use crate::helpers::{ClientMessage, TestApp};

#[tokio::test]
async fn starting_the_game_shows_four_distinct_candidates_and_plays_the_target() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;

    player.send(ClientMessage::StartGame).await;
    let state = player.receive_state().await;
    let (word, url) = player.receive_audio().await;

    assert!(state.started);
    assert_eq!(state.score, 0);
    assert!(state.replay_available);
    let round = state.round();
    assert_eq!(round.id, 1);
    assert!(!round.resolved);
    assert!(round.target.is_none());
    assert!(round.correct.is_none());
    let distinct: HashSet<String> = round.words().into_iter().collect();
    assert_eq!(distinct.len(), 4);
    for candidate in &round.candidates {
        assert_eq!(candidate.image_url, format!("/images/{}.png", candidate.word));
    }
    assert!(round.words().contains(&word));
    assert_eq!(url, format!("/audio/{word}.mp3"));
}

#[tokio::test]
async fn correct_then_wrong_answer() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let (_, target) = player.start_game().await;

    player
        .send(ClientMessage::SelectCandidate {
            word: target.clone(),
        })
        .await;
    let state = player.receive_state().await;
    assert_eq!(state.score, 1);
    assert!(state.round().resolved);
    assert_eq!(state.round().correct, Some(true));
    assert_eq!(state.round().target, Some(target));
    assert!(!state.replay_available);

    let state = player.receive_state().await;
    assert_eq!(state.round().id, 2);
    assert!(!state.round().resolved);
    assert!(state.replay_available);
    let (next_target, _) = player.receive_audio().await;

    let wrong = state
        .round()
        .words()
        .into_iter()
        .find(|word| word != &next_target)
        .unwrap();
    player
        .send(ClientMessage::SelectCandidate { word: wrong })
        .await;
    let state = player.receive_state().await;
    assert_eq!(state.score, 1);
    assert_eq!(state.round().correct, Some(false));
    assert_eq!(state.round().target, Some(next_target));
}

#[tokio::test]
async fn repeated_selection_is_scored_once() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let (_, target) = player.start_game().await;

    for _ in 0..3 {
        player
            .send(ClientMessage::SelectCandidate {
                word: target.clone(),
            })
            .await;
    }

    let state = player.receive_state().await;
    assert_eq!(state.score, 1);
    // Nothing else is published until the round advances
    let state = player.receive_state().await;
    assert_eq!(state.round().id, 2);
    assert_eq!(state.score, 1);
}

#[tokio::test]
async fn round_advances_after_the_configured_delay() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let (_, target) = player.start_game().await;

    let selected_at = tokio::time::Instant::now();
    player.send(ClientMessage::SelectCandidate { word: target }).await;
    let _ = player.receive_state().await;
    let state = player.receive_state().await;

    assert!(selected_at.elapsed() >= app.advance_delay);
    assert_eq!(state.round().id, 2);
}

#[tokio::test]
async fn selecting_before_start_is_rejected() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;

    player
        .send(ClientMessage::SelectCandidate {
            word: "cat".to_string(),
        })
        .await;

    assert_eq!(player.receive_error().await, "NOT_STARTED");
}

#[tokio::test]
async fn selecting_a_word_outside_the_candidates_is_rejected() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let _ = player.start_game().await;

    player
        .send(ClientMessage::SelectCandidate {
            word: "not-a-word".to_string(),
        })
        .await;

    assert_eq!(player.receive_error().await, "WORD_NOT_A_CANDIDATE");
}

#[tokio::test]
async fn starting_twice_is_rejected() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let _ = player.start_game().await;

    player.send(ClientMessage::StartGame).await;

    assert_eq!(player.receive_error().await, "ALREADY_STARTED");
}

#[tokio::test]
async fn replay_is_available_once_per_round() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let (_, target) = player.start_game().await;

    player.send(ClientMessage::ReplayAudio).await;
    let state = player.receive_state().await;
    let (replayed, _) = player.receive_audio().await;
    player.send(ClientMessage::ReplayAudio).await;

    assert_eq!(replayed, target);
    assert!(!state.replay_available);
    assert_eq!(player.receive_error().await, "REPLAY_UNAVAILABLE");
}

#[tokio::test]
async fn malformed_message_keeps_the_connection_open() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;

    player.send_text("{\"kind\":\"danceParty\"}".to_string()).await;
    assert_eq!(player.receive_error().await, "UNPROCESSABLE_MESSAGE");

    let (state, _) = player.start_game().await;
    assert!(state.started);
}

#[tokio::test]
async fn playback_failure_reports_are_accepted() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let (_, target) = player.start_game().await;

    player
        .send(ClientMessage::PlaybackFailed {
            word: target.clone(),
            reason: "NotAllowedError".to_string(),
        })
        .await;
    player.send(ClientMessage::SelectCandidate { word: target }).await;

    let state = player.receive_state().await;
    assert_eq!(state.score, 1);
}

#[tokio::test]
async fn every_connection_plays_its_own_session() {
    let app = TestApp::spawn().await;
    let mut first = app.connect_player().await;
    let mut second = app.connect_player().await;
    let (_, first_target) = first.start_game().await;
    let (_, _) = second.start_game().await;

    first
        .send(ClientMessage::SelectCandidate { word: first_target })
        .await;
    let first_state = first.receive_state().await;
    second.send(ClientMessage::ReplayAudio).await;
    let second_state = second.receive_state().await;
    let _ = second.receive_audio().await;

    assert_eq!(first_state.score, 1);
    assert_eq!(second_state.score, 0);
    assert!(!second_state.round().resolved);
}
