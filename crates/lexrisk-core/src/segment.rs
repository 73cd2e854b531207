//! Heading-based clause segmentation for contract text.
//!
//! Contracts are split at lexical heading markers found at the start of a
//! line. Three marker families are recognised, tried in this order:
//!
//! 1. `ARTICLE <roman>` e.g. "ARTICLE II", "Article iv"
//! 2. `SECTION <integer>` e.g. "SECTION 3", "Section 12"
//! 3. `<integer>.` with optional dotted continuation e.g. "1.", "1.1", "2.3.4."
//!
//! A marker must be followed by horizontal whitespace or the end of the line.
//! Matching is case-insensitive and the trimmed marker becomes the clause id.
//!
//! # Known ambiguity
//!
//! Nested numbering is not distinguished: "1.1" is a heading in its own
//! right, so sub-clauses become sibling clauses. No attempt is made to infer
//! a document grammar beyond these markers.

use regex::Regex;
use tracing::{debug, warn};

use crate::types::{ClauseUnit, PREAMBLE_ID};

const HEADING_PATTERN: &str = r"(?im)^[^\S\n]*(?:(?P<article>ARTICLE[^\S\n]+[IVXLC]+)|(?P<section>SECTION[^\S\n]+\d+)|(?P<numbered>\d+\.(?:\d+\.?)*))(?:[^\S\n]+|$)";

/// Marker family a heading matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Article,
    Section,
    Numbered,
}

/// A heading found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub kind: HeadingKind,
    /// Trimmed marker text, e.g. "SECTION 3".
    pub token: String,
    /// Byte offset where the heading line starts.
    pub start: usize,
    /// Byte offset just past the marker and its trailing whitespace.
    pub end: usize,
}

/// Splits raw contract text into ordered [`ClauseUnit`]s.
///
/// Construct once and reuse; the heading pattern is compiled on creation.
#[derive(Debug, Clone)]
pub struct ClauseSegmenter {
    pattern: Regex,
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseSegmenter {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(HEADING_PATTERN).expect("heading pattern is a valid regex"),
        }
    }

    /// Locate every heading marker in document order.
    pub fn headings(&self, text: &str) -> Vec<Heading> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let (kind, token) = if let Some(m) = caps.name("article") {
                    (HeadingKind::Article, m)
                } else if let Some(m) = caps.name("section") {
                    (HeadingKind::Section, m)
                } else {
                    (HeadingKind::Numbered, caps.name("numbered")?)
                };
                Some(Heading {
                    kind,
                    token: token.as_str().trim().to_string(),
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect()
    }

    /// Split `text` into clause units.
    ///
    /// Text before the first heading becomes the `"Preamble"` unit. Segments
    /// that are empty after trimming are dropped and take no `order` slot.
    pub fn segment(&self, text: &str) -> Vec<ClauseUnit> {
        let headings = self.headings(text);
        let mut units = Vec::with_capacity(headings.len() + 1);

        let preamble_end = headings.first().map_or(text.len(), |h| h.start);
        push_unit(&mut units, PREAMBLE_ID, &text[..preamble_end]);

        for (i, heading) in headings.iter().enumerate() {
            let body_end = headings.get(i + 1).map_or(text.len(), |next| next.start);
            push_unit(&mut units, &heading.token, &text[heading.end..body_end]);
        }

        if units.is_empty() {
            warn!(
                chars = text.chars().count(),
                "segmentation degenerate: no clauses detected"
            );
        } else {
            debug!(
                headings = headings.len(),
                clauses = units.len(),
                "segmented contract"
            );
        }
        units
    }
}

fn push_unit(units: &mut Vec<ClauseUnit>, id: &str, body: &str) {
    let body = body.trim();
    if body.is_empty() {
        return;
    }
    units.push(ClauseUnit {
        id: id.to_string(),
        text: body.to_string(),
        order: units.len(),
    });
}
