// Engine — shared resources for processing sessions.
//
// Holds the configuration, the known-word store registry and the language
// resources (English word list, Japanese segmenter). The resources are
// loaded on first use: an English-only user never needs a Japanese
// dictionary, and loading one takes a while.

use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::error::{Result, SubscoutError};
use crate::language::Language;
use crate::store::{KnownWordStore, StoreRegistry};
use crate::tokenize::{
    EnglishTokenizer, JapaneseTokenizer, Lexicon, Segmenter, Tokenizer, VibratoSegmenter, WordList,
};

pub struct Engine {
    config: Config,
    stores: StoreRegistry,
    lexicon: Mutex<Option<Arc<dyn Lexicon>>>,
    segmenter: Mutex<Option<Arc<dyn Segmenter>>>,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self {
            stores: StoreRegistry::new(config.clone()),
            config,
            lexicon: Mutex::new(None),
            segmenter: Mutex::new(None),
        }
    }

    /// Engine with preloaded language resources (tests, embedding callers).
    pub fn with_resources(
        config: Config,
        lexicon: Arc<dyn Lexicon>,
        segmenter: Option<Arc<dyn Segmenter>>,
    ) -> Self {
        let engine = Self::new(config);
        *engine.lexicon.lock().unwrap_or_else(|e| e.into_inner()) = Some(lexicon);
        *engine.segmenter.lock().unwrap_or_else(|e| e.into_inner()) = segmenter;
        engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self, language: Language) -> Result<Box<dyn KnownWordStore>> {
        self.stores.open(language)
    }

    /// The tokenizer for `language`, loading its resources if needed.
    pub fn tokenizer_for(&self, language: Language) -> Result<Tokenizer> {
        match language {
            Language::English => Ok(Tokenizer::English(EnglishTokenizer::new(self.lexicon()?))),
            Language::Japanese => Ok(Tokenizer::Japanese(JapaneseTokenizer::new(
                self.segmenter()?,
            ))),
        }
    }

    fn lexicon(&self) -> Result<Arc<dyn Lexicon>> {
        let mut slot = self.lexicon.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(lexicon) = slot.as_ref() {
            return Ok(lexicon.clone());
        }
        let lexicon: Arc<dyn Lexicon> = Arc::new(WordList::load(&self.config.english_dict)?);
        *slot = Some(lexicon.clone());
        Ok(lexicon)
    }

    fn segmenter(&self) -> Result<Arc<dyn Segmenter>> {
        let mut slot = self.segmenter.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(segmenter) = slot.as_ref() {
            return Ok(segmenter.clone());
        }
        let path = self
            .config
            .japanese_dict
            .as_ref()
            .ok_or_else(|| SubscoutError::ResourceUnavailable {
                resource: "Japanese dictionary",
                path: "SUBSCOUT_JP_DICT".into(),
                reason: "not configured".to_string(),
            })?;
        let segmenter: Arc<dyn Segmenter> = Arc::new(VibratoSegmenter::load(path)?);
        *slot = Some(segmenter.clone());
        Ok(segmenter)
    }
}
