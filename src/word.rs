use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::config::AssetSettings;

/// Opaque identifier of one vocabulary item. Asset paths are derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word {
    value: Arc<str>,
}

impl Word {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.value)
    }
}

impl From<String> for Word {
    fn from(value: String) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Word> for String {
    fn eq(&self, other: &Word) -> bool {
        other.as_str().eq(self)
    }
}

/// Resolves a [`Word`] to the image and audio resources named after it.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    images_base_url: String,
    audio_base_url: String,
    image_extension: String,
    audio_extension: String,
}

impl AssetResolver {
    pub fn new(settings: &AssetSettings) -> Self {
        Self {
            images_base_url: settings.images_base_url.trim_end_matches('/').to_string(),
            audio_base_url: settings.audio_base_url.trim_end_matches('/').to_string(),
            image_extension: settings.image_extension.clone(),
            audio_extension: settings.audio_extension.clone(),
        }
    }

    pub fn image_path(&self, word: &Word) -> String {
        format!("{}/{word}.{}", self.images_base_url, self.image_extension)
    }

    pub fn audio_path(&self, word: &Word) -> String {
        format!("{}/{word}.{}", self.audio_base_url, self.audio_extension)
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        AssetResolver::new(&AssetSettings::default())
    }
}
