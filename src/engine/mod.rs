pub mod timer;

use std::time::Duration;

use rust_fsm::StateMachine;
use serde::Deserialize;

use crate::audio::AudioOutput;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::random::RandomSource;
use crate::round::round_fsm::{RoundFsm, RoundFsmInput, RoundFsmState};
use crate::round::{Resolution, Round, RoundId};
use crate::vocabulary::Vocabulary;
use crate::word::Word;

use self::timer::{ScheduledTimer, TimerKind};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPolicy {
    /// One replay per round, unavailable once the round is resolved.
    #[default]
    SingleUse,
    /// Replay whenever a round is shown, resolved or not.
    Always,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    pub advance_delay: Duration,
    /// Zero plays the first target as soon as the game starts.
    pub first_playback_delay: Duration,
    pub autoplay_next_round: bool,
    pub next_round_playback_delay: Duration,
    pub replay_policy: ReplayPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            advance_delay: Duration::from_millis(1500),
            first_playback_delay: Duration::from_millis(500),
            autoplay_next_round: true,
            next_round_playback_delay: Duration::from_millis(500),
            replay_policy: ReplayPolicy::SingleUse,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Resolved {
        correct: bool,
        advance: ScheduledTimer,
    },
    /// The round was already answered, nothing changed.
    Ignored,
}

/// Everything the host needs to render the session after a transition.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub started: bool,
    pub score: u32,
    pub round: Option<RoundSnapshot>,
    pub replay_available: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundSnapshot {
    pub id: RoundId,
    pub candidates: Vec<Word>,
    pub resolved: bool,
    /// `Some` only once resolved.
    pub correct: Option<bool>,
    /// `Some` only once resolved, for highlighting.
    pub target: Option<Word>,
}

/// Sole owner of the session: score, current round and the timers tied to it.
///
/// The engine never sleeps. Operations that need a delayed follow-up return a
/// [`ScheduledTimer`]; the host waits for `timer.delay` and hands the same value
/// back through [`RoundEngine::on_timer`]. Timers carry the [`RoundId`] they were
/// scheduled for, so a timer outliving its round is ignored.
pub struct RoundEngine<R: RandomSource, A: AudioOutput> {
    vocabulary: Vocabulary,
    settings: EngineSettings,
    random: R,
    audio: A,
    fsm: StateMachine<RoundFsm>,
    score: u32,
    round: Option<Round>,
    next_round_id: RoundId,
    replay_used: bool,
}

impl<R: RandomSource, A: AudioOutput> RoundEngine<R, A> {
    pub fn new(vocabulary: Vocabulary, settings: EngineSettings, random: R, audio: A) -> Self {
        Self {
            vocabulary,
            settings,
            random,
            audio,
            fsm: StateMachine::default(),
            score: 0,
            round: None,
            next_round_id: RoundId(1),
            replay_used: false,
        }
    }

    pub fn state(&self) -> &RoundFsmState {
        self.fsm.state()
    }

    /// The host drains audio requests through this after each transition.
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_started(&self) -> bool {
        self.fsm.state() != &RoundFsmState::Idle
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn replay_available(&self) -> bool {
        match (&self.round, self.settings.replay_policy) {
            (None, _) => false,
            (Some(_), ReplayPolicy::Always) => true,
            (Some(round), ReplayPolicy::SingleUse) => !round.is_resolved() && !self.replay_used,
        }
    }

    pub fn start(&mut self) -> Result<Option<ScheduledTimer>, Error> {
        if self.is_started() {
            return Err(DomainError::AlreadyStarted.into());
        }

        let round = self.draw_round()?;
        self.process_event(&RoundFsmInput::Start)?;
        log::info!(
            "Game started. RoundId: '{}', Vocabulary: '{}'.",
            round.id(),
            self.vocabulary.len()
        );
        self.round = Some(round);
        self.replay_used = false;

        Ok(self.schedule_playback(self.settings.first_playback_delay))
    }

    pub fn select_candidate(&mut self, word: &Word) -> Result<Selection, Error> {
        let Some(round) = self.round.as_mut() else {
            return Err(DomainError::NotStarted.into());
        };
        if !round.is_candidate(word) {
            return Err(DomainError::WordNotACandidate(word.clone()).into());
        }
        if round.is_resolved() {
            log::debug!(
                "Ignoring selection on an already resolved round. RoundId: '{}', Word: '{word}'.",
                round.id()
            );
            return Ok(Selection::Ignored);
        }

        let round_id = round.id();
        self.process_event(&RoundFsmInput::Select)?;

        let correct = match self.round.as_mut().map(|round| round.resolve(word)) {
            Some(Resolution::Resolved { correct }) => correct,
            _ => {
                return Err(Error::log_and_create_internal(&format!(
                    "Round '{round_id}' could not be resolved after the selection was accepted."
                )))
            }
        };
        if correct {
            self.score += 1;
        }

        Ok(Selection::Resolved {
            correct,
            advance: ScheduledTimer::new(round_id, TimerKind::Advance, self.settings.advance_delay),
        })
    }

    pub fn replay(&mut self) -> Result<(), Error> {
        if self.round.is_none() {
            return Err(DomainError::NotStarted.into());
        }
        if !self.replay_available() {
            return Err(DomainError::ReplayUnavailable.into());
        }
        if self.settings.replay_policy == ReplayPolicy::SingleUse {
            self.replay_used = true;
        }
        self.play_target();
        Ok(())
    }

    /// Acts on a timer previously returned by this engine, unless it is stale.
    pub fn on_timer(&mut self, timer: ScheduledTimer) -> Option<ScheduledTimer> {
        let Some(round) = self.round.as_ref() else {
            log::debug!("Ignoring timer fired before the game started. Timer: '{timer}'.");
            return None;
        };
        if round.id() != timer.round {
            log::debug!(
                "Ignoring stale timer. Timer: '{timer}', CurrentRoundId: '{}'.",
                round.id()
            );
            return None;
        }

        let state = self.fsm.state().clone();
        match (timer.kind, state) {
            (TimerKind::PlayTarget, RoundFsmState::Unresolved) => {
                self.play_target();
                None
            }
            (TimerKind::Advance, RoundFsmState::Resolved) => self.advance(),
            (_, state) => {
                log::debug!("Ignoring timer that does not apply in state '{state}'. Timer: '{timer}'.");
                None
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            started: self.is_started(),
            score: self.score,
            round: self.round.as_ref().map(|round| RoundSnapshot {
                id: round.id(),
                candidates: round.candidates().to_vec(),
                resolved: round.is_resolved(),
                correct: round.is_resolved().then(|| round.is_correct()),
                target: round.is_resolved().then(|| round.target().clone()),
            }),
            replay_available: self.replay_available(),
        }
    }

    fn advance(&mut self) -> Option<ScheduledTimer> {
        let round = match self.draw_round() {
            Ok(round) => round,
            Err(error) => {
                log::error!("Could not draw the next round. Error: '{error}'.");
                return None;
            }
        };
        if self.process_event(&RoundFsmInput::Advance).is_err() {
            return None;
        }
        log::debug!("Advanced to the next round. RoundId: '{}'.", round.id());
        self.round = Some(round);
        self.replay_used = false;

        if self.settings.autoplay_next_round {
            self.schedule_playback(self.settings.next_round_playback_delay)
        } else {
            None
        }
    }

    fn draw_round(&mut self) -> Result<Round, Error> {
        let id = self.next_round_id;
        let round = Round::draw(id, &self.vocabulary, &mut self.random)?;
        self.next_round_id = id.next();
        Ok(round)
    }

    fn schedule_playback(&mut self, delay: Duration) -> Option<ScheduledTimer> {
        let round_id = self.round.as_ref()?.id();
        if delay.is_zero() {
            self.play_target();
            None
        } else {
            Some(ScheduledTimer::new(round_id, TimerKind::PlayTarget, delay))
        }
    }

    fn play_target(&mut self) {
        if let Some(round) = &self.round {
            self.audio.play(round.target());
        }
    }

    fn process_event(&mut self, event: &RoundFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => Ok(()),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))),
        }
    }
}
