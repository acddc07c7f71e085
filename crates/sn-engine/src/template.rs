//! Event message templates with participant placeholders.
//!
//! A template is parsed once, when its window is loaded, into literal text
//! and participant slots. `[CHAR]` is the primary participant and `[CHAR2]`
//! a second, different one where possible. Any other `[CHAR...]` token is a
//! load-time error; other bracketed text is kept verbatim.

use serde::{Deserialize, Serialize};

use crate::error::{SlasherError, SlasherResult};

const PRIMARY_TOKEN: &str = "CHAR";
const SECONDARY_TOKEN: &str = "CHAR2";

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Text(String),
    /// The primary participant slot.
    Primary,
    /// The secondary participant slot.
    Secondary,
}

/// A parsed event template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    raw: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a raw template string.
    pub fn parse(raw: &str) -> SlasherResult<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('[') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find(']') else {
                text.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let token = &after[..close];
            let slot = match token {
                PRIMARY_TOKEN => Some(Segment::Primary),
                SECONDARY_TOKEN => Some(Segment::Secondary),
                t if t.starts_with(PRIMARY_TOKEN) => {
                    return Err(SlasherError::UnknownToken {
                        token: t.to_string(),
                        template: raw.to_string(),
                    });
                }
                _ => None,
            };
            match slot {
                Some(slot) => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(slot);
                }
                None => text.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }
        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The template as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template names a primary participant.
    pub fn uses_primary(&self) -> bool {
        self.segments.contains(&Segment::Primary)
    }

    /// Whether the template names a secondary participant.
    pub fn uses_secondary(&self) -> bool {
        self.segments.contains(&Segment::Secondary)
    }

    /// Fill the participant slots. Every occurrence of a slot gets the same name.
    pub fn render(&self, primary: &str, secondary: &str) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Primary => out.push_str(primary),
                Segment::Secondary => out.push_str(secondary),
            }
        }
        out
    }
}

impl TryFrom<String> for Template {
    type Error = SlasherError;

    fn try_from(raw: String) -> SlasherResult<Self> {
        Self::parse(&raw)
    }
}

impl From<Template> for String {
    fn from(t: Template) -> Self {
        t.raw
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_slots() {
        let t = Template::parse("The lights flicker, then return to normal.").unwrap();
        assert_eq!(t.segments().len(), 1);
        assert!(!t.uses_primary());
        assert!(!t.uses_secondary());
        assert_eq!(t.render("A", "B"), t.raw());
    }

    #[test]
    fn parses_both_slots() {
        let t = Template::parse("[CHAR] glances around. 'Wait... where's [CHAR2]?'").unwrap();
        assert_eq!(
            t.segments(),
            [
                Segment::Primary,
                Segment::Text(" glances around. 'Wait... where's ".to_string()),
                Segment::Secondary,
                Segment::Text("?'".to_string()),
            ]
        );
        assert_eq!(
            t.render("Jess", "Mike"),
            "Jess glances around. 'Wait... where's Mike?'"
        );
    }

    #[test]
    fn repeated_slot_gets_same_name() {
        let t = Template::parse("[CHAR]'s phone buzzes. [CHAR] ignores it.").unwrap();
        assert_eq!(t.render("Ana", "x"), "Ana's phone buzzes. Ana ignores it.");
    }

    #[test]
    fn unknown_char_token_rejected() {
        let err = Template::parse("[CHAR3] vanishes.").unwrap_err();
        assert!(matches!(err, SlasherError::UnknownToken { ref token, .. } if token == "CHAR3"));
    }

    #[test]
    fn other_brackets_kept_verbatim() {
        let t = Template::parse("[Radio] static... [CHAR] hears it. [unclosed").unwrap();
        assert_eq!(t.render("Bo", ""), "[Radio] static... Bo hears it. [unclosed");
    }

    #[test]
    fn serde_uses_raw_string() {
        let t: Template = serde_json::from_str("\"[CHAR] screams.\"").unwrap();
        assert!(t.uses_primary());
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"[CHAR] screams.\"");
        assert!(serde_json::from_str::<Template>("\"[CHARX]\"").is_err());
    }
}
