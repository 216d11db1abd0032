// Japanese tokenization — surface-form segmentation plus a script filter.
//
// Japanese has no spaces between words, so a morphological analyser is needed
// to find word boundaries. Only the surface forms are kept; part-of-speech
// features are ignored. A segment counts as a word when enough of it is in
// the CJK span (the same test the language classifier uses).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::{Result, SubscoutError};
use crate::language::is_japanese;

/// Splits text into surface-form segments.
///
/// Swap-ready seam: the default implementation uses vibrato, tests use a
/// whitespace splitter.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Segmenter backed by a vibrato (MeCab-compatible) system dictionary.
pub struct VibratoSegmenter {
    tokenizer: vibrato::Tokenizer,
}

impl VibratoSegmenter {
    /// Load a compiled vibrato dictionary. Files ending in `.zst` are
    /// decompressed first, which is how the prebuilt dictionaries ship.
    pub fn load(path: &Path) -> Result<Self> {
        let unavailable = |reason: String| SubscoutError::ResourceUnavailable {
            resource: "Japanese dictionary",
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;

        let is_zstd = path.extension().is_some_and(|ext| ext == "zst");
        let dict = if is_zstd {
            let mut decoder = zstd::Decoder::new(file).map_err(|e| unavailable(e.to_string()))?;
            let mut data = Vec::new();
            decoder
                .read_to_end(&mut data)
                .map_err(|e| unavailable(e.to_string()))?;
            vibrato::Dictionary::read(&data[..])
        } else {
            vibrato::Dictionary::read(BufReader::new(file))
        }
        .map_err(|e| unavailable(e.to_string()))?;

        let tokenizer = vibrato::Tokenizer::new(dict)
            .ignore_space(true)
            .map_err(|e| unavailable(e.to_string()))?;

        info!(path = %path.display(), "Loaded Japanese dictionary");
        Ok(Self { tokenizer })
    }
}

impl Segmenter for VibratoSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut worker = self.tokenizer.new_worker();
        let mut segments = Vec::new();

        // Each subtitle line is analysed as its own sentence, so no word spans a cue break
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            worker.reset_sentence(line);
            worker.tokenize();
            segments.extend(worker.token_iter().map(|t| t.surface().to_string()));
        }
        segments
    }
}

#[derive(Clone)]
pub struct JapaneseTokenizer {
    segmenter: Arc<dyn Segmenter>,
}

impl JapaneseTokenizer {
    pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
        Self { segmenter }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }

    /// Japanese words keep their original form; there is no case to fold.
    pub fn accept(&self, raw: &str) -> Option<String> {
        is_japanese(raw).then(|| raw.to_string())
    }
}
