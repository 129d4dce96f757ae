pub mod actor;
pub mod actor_client;

use crate::audio::AudioOutput;
use crate::word::Word;

/// Holds playback requests until the session has published the state they belong to.
#[derive(Debug, Default)]
pub struct PendingAudio {
    words: Vec<Word>,
}

impl PendingAudio {
    pub fn take(&mut self) -> Vec<Word> {
        std::mem::take(&mut self.words)
    }
}

impl AudioOutput for PendingAudio {
    fn play(&mut self, word: &Word) {
        self.words.push(word.clone());
    }
}
