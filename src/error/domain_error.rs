use thiserror::Error;

use crate::word::Word;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The game has already been started.")]
    AlreadyStarted,
    #[error("Not enough distinct words to play. ActualWords: '{actual}', MinimumWords: '{minimum}'.")]
    InsufficientVocabulary { actual: usize, minimum: usize },
    #[error("The game has not been started yet.")]
    NotStarted,
    #[error("Replaying the audio is not available for the current round.")]
    ReplayUnavailable,
    #[error("The selected word is not one of the current candidates. Word: '{0}'.")]
    WordNotACandidate(Word),
}
