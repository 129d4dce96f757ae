use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::word::Word;

/// Ordered, de-duplicated list of every playable word. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    words: Vec<Word>,
}

impl Vocabulary {
    pub const MINIMUM_WORDS: usize = 4;

    pub fn new<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                if word.is_empty() || !seen.insert(word.to_string()) {
                    None
                } else {
                    Some(Word::from(word))
                }
            })
            .collect();

        Self { words }
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Could not open the vocabulary file. Path: '{}', Error: '{error}'.",
                path.display()
            ))
        })?;

        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<String>, _>>()
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "Could not read the vocabulary file. Path: '{}', Error: '{error}'.",
                    path.display()
                ))
            })?;

        Ok(Vocabulary::new(lines))
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn ensure_playable(&self) -> Result<(), DomainError> {
        if self.len() < Vocabulary::MINIMUM_WORDS {
            Err(DomainError::InsufficientVocabulary {
                actual: self.len(),
                minimum: Vocabulary::MINIMUM_WORDS,
            })
        } else {
            Ok(())
        }
    }
}
