// Subtitle extraction — raw subtitle files to plain text lines.
//
// Two formats are supported:
// - SubRip (.srt): a single flat dialogue track. Every line is returned as-is,
//   index and timing lines included; the tokenizers discard non-words.
// - SubStation Alpha (.ass/.ssa): events tagged with named styles. The caller
//   picks a style and only events carrying it are returned.

pub mod ass;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SubscoutError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Structural kind of a subtitle file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SubtitleKind {
    /// One dialogue track (SubRip)
    Flat,
    /// Named style tracks (SubStation Alpha)
    Styled,
}

impl SubtitleKind {
    /// Classify a file name by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "srt" => Ok(SubtitleKind::Flat),
            "ass" | "ssa" => Ok(SubtitleKind::Styled),
            _ => Err(SubscoutError::UnsupportedFormat(format!(".{ext}"))),
        }
    }
}

/// Lines extracted from a subtitle plus the styles it declares.
/// `styles` is always empty for flat files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub lines: Vec<String>,
    pub styles: Vec<String>,
}

/// Decode subtitle bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode(bytes: &[u8], path: &Path) -> Result<String> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(body.to_vec()).map_err(|_| SubscoutError::Decode {
        path: path.to_path_buf(),
    })
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    decode(&bytes, path)
}

/// Extract text lines from a subtitle file.
///
/// For styled files, `style == None` returns no lines and the declared styles,
/// which tells the caller a style has to be chosen first.
pub fn parse(path: &Path, kind: SubtitleKind, style: Option<&str>) -> Result<Extracted> {
    let content = read_text(path)?;

    match kind {
        SubtitleKind::Flat => Ok(Extracted {
            lines: content.lines().map(str::to_string).collect(),
            styles: Vec::new(),
        }),
        SubtitleKind::Styled => {
            let doc = ass::parse(&content)?;
            let Some(style) = style else {
                return Ok(Extracted {
                    lines: Vec::new(),
                    styles: doc.styles,
                });
            };

            if !doc.styles.iter().any(|s| s == style) {
                return Err(SubscoutError::StyleNotFound {
                    style: style.to_string(),
                    available: doc.styles,
                });
            }

            let lines = doc.texts_for_style(style);
            debug!(style, lines = lines.len(), "Extracted styled events");
            Ok(Extracted {
                lines,
                styles: doc.styles,
            })
        }
    }
}

/// Parse a subtitle, deriving its kind from the file name.
pub fn parse_path(path: &Path, style: Option<&str>) -> Result<Extracted> {
    parse(path, SubtitleKind::from_path(path)?, style)
}

/// Best-effort list of declared styles. Never fails: flat files, unreadable
/// files and malformed documents all yield an empty list.
pub fn extract_styles(path: &Path) -> Vec<String> {
    if !matches!(SubtitleKind::from_path(path), Ok(SubtitleKind::Styled)) {
        return Vec::new();
    }

    match read_text(path).and_then(|content| ass::parse(&content)) {
        Ok(doc) => doc.styles,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Could not read styles");
            Vec::new()
        }
    }
}
