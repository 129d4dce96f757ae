use crate::word::Word;

/// Fire-and-forget playback of a word's audio.
///
/// Implementations own their failure handling: the engine never waits for
/// playback and never learns whether it succeeded.
pub trait AudioOutput: Send {
    fn play(&mut self, word: &Word);
}
