//! Named-entity extraction: parties, dates, money, locations.

use std::cmp::Reverse;

use lexrisk_core::{EntityBundle, EntitySet};
use regex::Regex;
use tracing::debug;

/// Pulls the four entity categories out of contract text.
///
/// Implementations are pure: the same text always yields the same bundle.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> EntityBundle;
}

const NAME: &str = r"[A-Z][\w&'-]*(?:[^\S\n]+[A-Z][\w&'-]*)*";

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

const CORPORATE_SUFFIX: &str = r"Inc|Corp|Corporation|LLC|LLP|Ltd|Limited|Company|Pvt\.?[^\S\n]+Ltd";

const BARE_SUFFIXES: &[&str] = &["Company", "Corporation", "Limited"];

/// Rule-based extractor built from a fixed set of patterns.
///
/// Patterns compile once in [`new`](Self::new); share the extractor behind an
/// `Arc` rather than rebuilding it per document. Where patterns overlap in a
/// category the earliest, longest match wins.
pub struct PatternEntityExtractor {
    parties: Vec<Regex>,
    dates: Vec<Regex>,
    money: Vec<Regex>,
    locations: Vec<Regex>,
}

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("entity pattern is valid"))
        .collect()
}

impl PatternEntityExtractor {
    pub fn new() -> Self {
        let parties = compile(&[
            format!(r"\b(?:[A-Z][\w&'-]*[^\S\n]+){{1,5}}(?:{CORPORATE_SUFFIX})\b"),
            format!(r"\b(?:Mr|Mrs|Ms|Dr|Shri|Smt)\.?[^\S\n]+{NAME}"),
            format!(r"\bbetween\s+(?P<a>{NAME})\s*,?\s+and\s+(?P<b>{NAME})"),
        ]);
        let dates = compile(&[
            r"\b\d{4}-\d{2}-\d{2}\b".to_string(),
            r"\b\d{1,2}/\d{1,2}/\d{4}\b".to_string(),
            format!(r"\b(?:{MONTHS})[^\S\n]+\d{{1,2}}(?:st|nd|rd|th)?,?[^\S\n]+\d{{4}}\b"),
            format!(r"\b\d{{1,2}}(?:st|nd|rd|th)?[^\S\n]+(?:of[^\S\n]+)?(?:{MONTHS}),?[^\S\n]+\d{{4}}\b"),
        ]);
        let money = compile(&[
            r"(?:[$€£₹]|\b(?:USD|EUR|GBP|INR|Rs\.?))[^\S\n]?\d[\d,]*(?:\.\d+)?(?:[^\S\n]?(?:million|billion|thousand|lakh|crore)\b)?".to_string(),
            r"(?i)\b\d[\d,]*(?:\.\d+)?[^\S\n]+(?:dollars|rupees|euros|pounds)\b".to_string(),
        ]);
        let locations = compile(&[
            format!(r"\blaws[^\S\n]+of[^\S\n]+(?:the[^\S\n]+)?(?:State[^\S\n]+of[^\S\n]+)?(?P<name>{NAME})"),
            format!(r"\b(?:State|City|Republic|Commonwealth)[^\S\n]+of[^\S\n]+(?P<name>{NAME})"),
            format!(r"\b(?:located|situated|based)[^\S\n]+in[^\S\n]+(?P<name>{NAME})"),
            format!(r"\bcourts?[^\S\n]+(?:of|at|in)[^\S\n]+(?P<name>{NAME})"),
        ]);
        Self {
            parties,
            dates,
            money,
            locations,
        }
    }
}

impl Default for PatternEntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches from every pattern, in document order, overlaps removed.
///
/// Patterns with `name`, `a` or `b` groups contribute those groups rather than
/// the whole match.
fn collect<'t>(patterns: &[Regex], text: &'t str) -> Vec<&'t str> {
    let mut hits: Vec<(usize, usize)> = Vec::new();
    for re in patterns {
        for caps in re.captures_iter(text) {
            let groups: Vec<_> = ["name", "a", "b"]
                .iter()
                .filter_map(|g| caps.name(g))
                .collect();
            if groups.is_empty() {
                if let Some(m) = caps.get(0) {
                    hits.push((m.start(), m.end()));
                }
            } else {
                hits.extend(groups.iter().map(|m| (m.start(), m.end())));
            }
        }
    }
    hits.sort_by_key(|&(start, end)| (start, Reverse(end)));

    let mut out = Vec::new();
    let mut covered = 0;
    for (start, end) in hits {
        if start < covered {
            continue;
        }
        covered = end;
        out.push(&text[start..end]);
    }
    out
}

fn clean(raw: &str) -> &str {
    raw.trim().trim_end_matches([',', ';', ':'])
}

fn into_set<'t>(values: impl IntoIterator<Item = &'t str>) -> EntitySet {
    let mut set = EntitySet::new();
    for v in values {
        let v = clean(v);
        if !v.is_empty() {
            set.insert(v);
        }
    }
    set
}

impl EntityExtractor for PatternEntityExtractor {
    fn extract(&self, text: &str) -> EntityBundle {
        let parties = collect(&self.parties, text)
            .into_iter()
            .map(|p| p.strip_prefix("The ").unwrap_or(p))
            // A bare suffix ("Company") is a defined term, not a party name.
            .filter(|p| !BARE_SUFFIXES.contains(p));

        let bundle = EntityBundle {
            parties: into_set(parties),
            dates: into_set(collect(&self.dates, text)),
            money: into_set(collect(&self.money, text)),
            locations: into_set(collect(&self.locations, text)),
        };
        debug!(
            parties = bundle.parties.len(),
            dates = bundle.dates.len(),
            money = bundle.money.len(),
            locations = bundle.locations.len(),
            "extracted entities"
        );
        bundle
    }
}
