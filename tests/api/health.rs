use crate::helpers::{ClientMessage, TestApp};

#[tokio::test]
async fn health_works() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/health", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "healthy");
}

#[tokio::test]
async fn metrics_count_answered_rounds() {
    let app = TestApp::spawn().await;
    let mut player = app.connect_player().await;
    let (_, target) = player.start_game().await;
    player.send(ClientMessage::SelectCandidate { word: target }).await;
    let state = player.receive_state().await;
    assert_eq!(state.round().correct, Some(true));

    let response = reqwest::Client::new()
        .get(format!("http://{}/metrics", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(metric_value(&body, "picture_match_rounds_played") >= 1.0);
    assert!(metric_value(&body, "picture_match_correct_answers") >= 1.0);
    assert!(metric_value(&body, "picture_match_active_sessions") >= 1.0);
}

fn metric_value(body: &str, name: &str) -> f64 {
    body.lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| line.strip_prefix(name)?.trim().parse().ok())
        .unwrap_or_else(|| panic!("Metric {name} is missing from:\n{body}"))
}
