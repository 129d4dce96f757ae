pub mod round_fsm;

use std::fmt::Display;

use crate::error::domain_error::DomainError;
use crate::random::RandomSource;
use crate::vocabulary::Vocabulary;
use crate::word::Word;

pub const CANDIDATES_PER_ROUND: usize = 4;

/// Identifies one Round instance within a session. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundId(pub u64);

impl RoundId {
    pub fn next(self) -> RoundId {
        RoundId(self.0 + 1)
    }
}

impl Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Resolved { correct: bool },
    AlreadyResolved,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    id: RoundId,
    candidates: [Word; CANDIDATES_PER_ROUND],
    target: Word,
    resolved: bool,
    correct: bool,
}

impl Round {
    /// Shuffles the whole vocabulary, keeps the first four words as candidates
    /// and picks the target among them.
    pub fn draw(
        id: RoundId,
        vocabulary: &Vocabulary,
        random: &mut dyn RandomSource,
    ) -> Result<Round, DomainError> {
        vocabulary.ensure_playable()?;

        let mut shuffled = vocabulary.words().to_vec();
        random.shuffle(&mut shuffled);
        shuffled.truncate(CANDIDATES_PER_ROUND);

        let candidates: [Word; CANDIDATES_PER_ROUND] =
            shuffled
                .try_into()
                .map_err(|_| DomainError::InsufficientVocabulary {
                    actual: vocabulary.len(),
                    minimum: CANDIDATES_PER_ROUND,
                })?;
        let target = candidates[random.pick(CANDIDATES_PER_ROUND) % CANDIDATES_PER_ROUND].clone();

        Ok(Round {
            id,
            candidates,
            target,
            resolved: false,
            correct: false,
        })
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Only meaningful once the round is resolved.
    pub fn is_correct(&self) -> bool {
        self.resolved && self.correct
    }

    pub fn is_candidate(&self, word: &Word) -> bool {
        self.candidates.contains(word)
    }

    pub fn resolve(&mut self, word: &Word) -> Resolution {
        if self.resolved {
            return Resolution::AlreadyResolved;
        }
        self.resolved = true;
        self.correct = word == &self.target;
        Resolution::Resolved {
            correct: self.correct,
        }
    }
}
