use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("picture_match_active_sessions", "Sessions with a connected player")
            .expect("metric cannot be created");
    pub static ref ROUNDS_PLAYED: IntCounter =
        IntCounter::new("picture_match_rounds_played", "Rounds answered by players")
            .expect("metric cannot be created");
    pub static ref CORRECT_ANSWERS: IntCounter =
        IntCounter::new("picture_match_correct_answers", "Rounds answered correctly")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_SESSIONS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(ROUNDS_PLAYED.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(CORRECT_ANSWERS.clone()))
        .expect("collector cannot be registered");
}
