//! Narrative composition.
//!
//! Composition is a pure function of the certificate type, form state, officials and date:
//! the template is segmented, placeholders are resolved and styled, literals pass through.

use crate::constants::SELECT_TYPE_PROMPT;
use crate::form::FormState;
use crate::resolver::{resolve_placeholder, Placeholder, ResolveContext};
use crate::segmenter::{segment, Token};
use brgy_types::{CertificateType, Official};
use chrono::NaiveDate;
use serde::Serialize;

/// A contiguous run of narrative text with its boldness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    #[serde(rename = "isBold")]
    pub is_bold: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bold: true,
        }
    }
}

/// An ordered sequence of styled segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Narrative {
    segments: Vec<Segment>,
}

impl Narrative {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The single-segment narrative shown before a certificate can be composed.
    pub fn select_type_prompt() -> Self {
        Self::new(vec![Segment::plain(SELECT_TYPE_PROMPT)])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// The narrative text with styling discarded.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Markdown rendering with bold segments wrapped in `**`.
    ///
    /// Surrounding whitespace of a bold segment is kept outside the markers so the emphasis
    /// still parses.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            let trimmed = segment.text.trim();
            if !segment.is_bold || trimmed.is_empty() {
                out.push_str(&segment.text);
                continue;
            }
            let start = segment.text.len() - segment.text.trim_start().len();
            let end = start + trimmed.len();
            out.push_str(&segment.text[..start]);
            out.push_str("**");
            out.push_str(trimmed);
            out.push_str("**");
            out.push_str(&segment.text[end..]);
        }
        out
    }
}

/// Compose the narrative for a certificate.
///
/// Without a selected certificate type or without officials the result is the
/// "select a certificate type" prompt. Composition never fails: absent data shows up as the
/// placeholder's own bracketed text.
pub fn compose(
    certificate_type: Option<&CertificateType>,
    form: &FormState,
    officials: &[Official],
    today: NaiveDate,
) -> Narrative {
    let Some(certificate_type) = certificate_type else {
        return Narrative::select_type_prompt();
    };
    if officials.is_empty() {
        return Narrative::select_type_prompt();
    }

    let ctx = ResolveContext::new(form, officials, today);
    let segments = segment(&certificate_type.template)
        .into_iter()
        .map(|token| match token {
            Token::Literal(text) => Segment::plain(text),
            Token::Placeholder(text) => match Placeholder::from_token(text) {
                Some(placeholder) => Segment {
                    text: resolve_placeholder(placeholder, &ctx),
                    is_bold: placeholder.is_bold(),
                },
                None => Segment::plain(text),
            },
        })
        .collect();

    Narrative::new(segments)
}
