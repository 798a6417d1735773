/*!
 * Text utilities shared by the dictionary and the replacement core.
 *
 * Offsets are counted in chars (Unicode scalar values), never bytes.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line breaks and space variants that collapse to a single ASCII space
static COLLAPSIBLE_WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("[\r\n\u{2028}\u{00A0}\u{202F} ]+").expect("Invalid whitespace regex")
});

/// Half-open char range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start after end");
        Self { start, end }
    }

    /// Range covering the first `len` chars
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Split at the integer midpoint
    pub fn halves(&self) -> (TextRange, TextRange) {
        let mid = self.start + self.len() / 2;
        (TextRange::new(self.start, mid), TextRange::new(mid, self.end))
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// Where a fragment occurs inside a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    NotFound,
    Unique(TextRange),
    Ambiguous,
}

/// Collapse line breaks, no-break spaces and space runs to one space.
///
/// Dictionary keys and node content must go through this same function,
/// otherwise lookups silently miss.
pub fn normalize_content(text: &str) -> String {
    COLLAPSIBLE_WHITESPACE.replace_all(text, " ").into_owned()
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Chars of `text` inside `range`
pub fn slice_chars(text: &str, range: TextRange) -> String {
    text.chars().skip(range.start).take(range.len()).collect()
}

/// Locate `needle` in `haystack` exactly and case-sensitively.
///
/// A second occurrence is searched one char after the first one starts,
/// so overlapping repeats are ambiguous too.
pub fn locate_unique(haystack: &str, needle: &str) -> Occurrence {
    if needle.is_empty() {
        return Occurrence::NotFound;
    }
    let Some(first) = haystack.find(needle) else {
        return Occurrence::NotFound;
    };
    let step = haystack[first..].chars().next().map_or(1, char::len_utf8);
    if haystack[first + step..].contains(needle) {
        return Occurrence::Ambiguous;
    }
    let start = char_len(&haystack[..first]);
    Occurrence::Unique(TextRange::new(start, start + char_len(needle)))
}

/// Shorten text for log output
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if char_len(text) <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
