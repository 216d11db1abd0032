// Advanced SubStation Alpha (.ass / .ssa) document parser.
//
// Only what vocabulary extraction needs is kept: the declared style names
// and, for each event, its style and raw text. Override tags such as
// `{\an8}` stay in the text; the tokenizer discards them later.
//
// Layout of the sections we read:
//
//   [V4+ Styles]
//   Format: Name, Fontname, Fontsize, ...
//   Style: Default,Arial,20,...
//
//   [Events]
//   Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
//   Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Hello, world
//
// Field positions come from each section's `Format:` line. The last format
// field absorbs any remaining commas, which is how `Text` keeps its commas.

use crate::error::{Result, SubscoutError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssEvent {
    /// Event kind as written before the colon (`Dialogue`, `Comment`, ...)
    pub kind: String,
    pub style: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssDocument {
    /// Style names in declaration order
    pub styles: Vec<String>,
    pub events: Vec<AssEvent>,
}

impl AssDocument {
    /// Raw text of every event whose style matches `style` exactly.
    pub fn texts_for_style(&self, style: &str) -> Vec<String> {
        self.events
            .iter()
            .filter(|e| e.style == style)
            .map(|e| e.text.clone())
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Styles,
    Events,
    Other,
}

/// Column layout declared by a `Format:` line.
struct Format {
    fields: Vec<String>,
}

impl Format {
    fn parse(declared: &str) -> Self {
        Self {
            fields: declared
                .split(',')
                .map(|f| f.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Split a data line into exactly as many values as the format declares.
    fn split<'a>(&self, body: &'a str) -> Option<Vec<&'a str>> {
        let values: Vec<&str> = body.splitn(self.fields.len(), ',').collect();
        (values.len() == self.fields.len()).then_some(values)
    }
}

pub fn parse(content: &str) -> Result<AssDocument> {
    let mut doc = AssDocument::default();
    let mut section = Section::Other;
    let mut format: Option<Format> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = match line[1..line.len() - 1].trim().to_ascii_lowercase().as_str() {
                "v4+ styles" | "v4 styles" | "v4 styles+" => Section::Styles,
                "events" => Section::Events,
                _ => Section::Other,
            };
            format = None;
            continue;
        }

        if section == Section::Other {
            continue;
        }

        let Some((key, body)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();

        if key.eq_ignore_ascii_case("format") {
            format = Some(Format::parse(body));
            continue;
        }

        let Some(fmt) = format.as_ref() else {
            return Err(SubscoutError::MalformedSubtitle {
                line: line_no,
                reason: format!("'{key}' line appears before the section's Format line"),
            });
        };

        let values = fmt.split(body.trim_start()).ok_or_else(|| SubscoutError::MalformedSubtitle {
            line: line_no,
            reason: format!("expected {} fields", fmt.fields.len()),
        })?;

        match section {
            Section::Styles if key.eq_ignore_ascii_case("style") => {
                let name_idx = fmt.index_of("name").ok_or_else(|| SubscoutError::MalformedSubtitle {
                    line: line_no,
                    reason: "style Format has no Name field".to_string(),
                })?;
                doc.styles.push(values[name_idx].trim().to_string());
            }
            Section::Events => {
                let (Some(style_idx), Some(text_idx)) = (fmt.index_of("style"), fmt.index_of("text"))
                else {
                    return Err(SubscoutError::MalformedSubtitle {
                        line: line_no,
                        reason: "event Format needs Style and Text fields".to_string(),
                    });
                };
                doc.events.push(AssEvent {
                    kind: key.to_string(),
                    style: values[style_idx].trim().to_string(),
                    text: values[text_idx].to_string(),
                });
            }
            _ => {}
        }
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[Script Info]
Title: Sample
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour
Style: Default,Arial,20,&H00FFFFFF
Style: Signs,Arial,18,&H00FFFFFF

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Hello, world
Dialogue: 0,0:00:03.00,0:00:04.00,Signs,,0,0,0,,{\\an8}Station
Comment: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,note to self
";

    #[test]
    fn collects_styles_in_order() {
        let doc = parse(SAMPLE).unwrap();
        assert_eq!(doc.styles, vec!["Default", "Signs"]);
        assert_eq!(doc.events.len(), 3);
    }

    #[test]
    fn text_keeps_commas_and_tags() {
        let doc = parse(SAMPLE).unwrap();
        assert_eq!(doc.events[0].text, "Hello, world");
        assert_eq!(doc.texts_for_style("Signs"), vec!["{\\an8}Station"]);
    }

    #[test]
    fn style_match_is_case_sensitive() {
        let doc = parse(SAMPLE).unwrap();
        assert!(doc.texts_for_style("signs").is_empty());
    }

    #[test]
    fn event_before_format_is_malformed() {
        let err = parse("[Events]\nDialogue: 0,a,b,Default,,0,0,0,,hi\n").unwrap_err();
        assert!(matches!(err, SubscoutError::MalformedSubtitle { line: 2, .. }));
    }

    #[test]
    fn short_event_is_malformed() {
        let input = "[Events]\nFormat: Layer, Start, End, Style, Text\nDialogue: 0,a\n";
        assert!(matches!(
            parse(input),
            Err(SubscoutError::MalformedSubtitle { line: 3, .. })
        ));
    }
}
