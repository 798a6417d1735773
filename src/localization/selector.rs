/*!
 * Base style selection.
 *
 * Translation changes length and word order, so the original section
 * offsets are useless in the translated string. Instead one of the node's
 * styles is picked as the base style covering the whole translation, and
 * every other section is relocated by finding its own translation inside
 * the node's translation. A relocation is only accepted when the fragment
 * occurs exactly once.
 *
 * Candidates are tried in order of first appearance; the first candidate
 * for which every non-base section resolves wins.
 */

use log::debug;

use crate::localization::dictionary::Mapping;
use crate::localization::exceptions::ExceptionList;
use crate::localization::segmenter::Section;
use crate::style::Style;
use crate::text_utils::{Occurrence, locate_unique, normalize_content, slice_chars, truncate_text};

/// Ordered decision trace of one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionLog {
    entries: Vec<String>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line; it is also emitted at debug level
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{}", message);
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Successful base style resolution
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStyleChoice {
    pub base_style: Style,
    /// Non-base sections relocated into the translation's coordinates
    pub sections: Vec<Section>,
}

/// Picks a base style and relocates the remaining sections
pub struct BaseStyleSelector<'a> {
    mapping: &'a Mapping,
    exceptions: &'a ExceptionList,
}

impl<'a> BaseStyleSelector<'a> {
    pub fn new(mapping: &'a Mapping, exceptions: &'a ExceptionList) -> Self {
        Self { mapping, exceptions }
    }

    /// Try every distinct style as base; `None` when no candidate resolves
    pub fn select(
        &self,
        content: &str,
        sections: &[Section],
        translation: &str,
        log: &mut DecisionLog,
    ) -> Option<BaseStyleChoice> {
        let candidates = Style::distinct(sections.iter().map(|s| &s.style));
        log.record(format!(
            "{} section(s), {} candidate style(s), translation '{}'",
            sections.len(),
            candidates.len(),
            truncate_text(translation, 60)
        ));

        for (index, candidate) in candidates.iter().enumerate() {
            log.record(format!("Candidate #{}: {}", index + 1, candidate));
            if let Some(relocated) = self.relocate(candidate, content, sections, translation, log) {
                log.record(format!(
                    "Candidate #{} accepted as base style with {} relocated section(s)",
                    index + 1,
                    relocated.len()
                ));
                return Some(BaseStyleChoice {
                    base_style: candidate.clone(),
                    sections: relocated,
                });
            }
            log.record(format!("Candidate #{} rejected", index + 1));
        }

        log.record("No candidate style produced an unambiguous reconstruction");
        None
    }

    /// Relocate every section not styled with `base`, or give up
    fn relocate(
        &self,
        base: &Style,
        content: &str,
        sections: &[Section],
        translation: &str,
        log: &mut DecisionLog,
    ) -> Option<Vec<Section>> {
        let mut relocated = Vec::new();
        for section in sections {
            let original = slice_chars(content, section.range());
            if section.style == *base {
                log.record(format!(
                    "  {} '{}' uses the base style, skipped",
                    section.range(),
                    truncate_text(&original, 40)
                ));
                continue;
            }

            let normalized = normalize_content(&original);
            let fragment = match self.mapping.get(&normalized) {
                Some(translated) => {
                    log.record(format!(
                        "  {} '{}' translates to '{}'",
                        section.range(),
                        truncate_text(&normalized, 40),
                        truncate_text(translated, 40)
                    ));
                    translated.to_string()
                }
                None if self.exceptions.keep_as_is(&normalized) => {
                    log.record(format!(
                        "  {} '{}' matches an exception, kept as is",
                        section.range(),
                        truncate_text(&normalized, 40)
                    ));
                    normalized
                }
                None => {
                    log.record(format!(
                        "  {} '{}' has no translation and no exception",
                        section.range(),
                        truncate_text(&normalized, 40)
                    ));
                    return None;
                }
            };

            match locate_unique(translation, &fragment) {
                Occurrence::Unique(range) => {
                    log.record(format!(
                        "  '{}' found once at {}",
                        truncate_text(&fragment, 40),
                        range
                    ));
                    relocated.push(Section::new(range.start, range.end, section.style.clone()));
                }
                Occurrence::NotFound => {
                    log.record(format!(
                        "  '{}' not found in the translation",
                        truncate_text(&fragment, 40)
                    ));
                    return None;
                }
                Occurrence::Ambiguous => {
                    log.record(format!(
                        "  '{}' occurs more than once in the translation, position is ambiguous",
                        truncate_text(&fragment, 40)
                    ));
                    return None;
                }
            }
        }
        Some(relocated)
    }
}
