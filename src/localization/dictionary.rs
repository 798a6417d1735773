/*!
 * Tabular dictionary parsing.
 *
 * The first line holds the language codes, every following line holds one
 * phrase per language, aligned positionally to the header.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{ParseError, TranslationError};
use crate::text_utils::normalize_content;

/// Default field delimiter (spreadsheet copy/paste)
pub const DEFAULT_DELIMITER: char = '\t';

/// Parsed dictionary: header of language codes plus aligned rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dictionary {
    /// Parse tab-delimited dictionary text
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        Self::parse_with_delimiter(raw, DEFAULT_DELIMITER)
    }

    /// Parse dictionary text with a custom field delimiter.
    ///
    /// Splitting happens on char boundaries, so multi-byte text in a field
    /// is never cut apart. Blank lines are skipped.
    pub fn parse_with_delimiter(raw: &str, delimiter: char) -> Result<Self, ParseError> {
        let lines: Vec<(usize, Vec<String>)> = raw
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                let fields = line
                    .split(delimiter)
                    .map(|field| field.trim().to_string())
                    .collect();
                (index + 1, fields)
            })
            .collect();

        if lines.len() < 2 {
            return Err(ParseError::TooFewLines { found: lines.len() });
        }

        let mut lines = lines.into_iter();
        let (_, header) = lines.next().ok_or(ParseError::TooFewLines { found: 0 })?;

        let mut rows = Vec::new();
        for (line, row) in lines {
            if row.len() != header.len() {
                return Err(ParseError::ColumnCountMismatch {
                    line,
                    expected: header.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        debug!("Parsed dictionary with {} language(s) and {} row(s)", header.len(), rows.len());
        Ok(Self { header, rows })
    }

    /// Language codes in header order
    pub fn languages(&self) -> &[String] {
        &self.header
    }

    /// Header index of a language code (exact, case-sensitive)
    pub fn column_index(&self, code: &str) -> Option<usize> {
        self.header.iter().position(|cell| cell == code)
    }

    /// Build the source-to-target mapping for two header columns
    pub fn mapping(&self, source_code: &str, target_code: &str) -> Result<Mapping, TranslationError> {
        let source = self.column_index(source_code).ok_or_else(|| TranslationError::MissingColumn {
            code: source_code.to_string(),
        })?;
        let target = self.column_index(target_code).ok_or_else(|| TranslationError::MissingColumn {
            code: target_code.to_string(),
        })?;

        let mut mapping = Mapping::default();
        for row in &self.rows {
            let translation = row[target].trim();
            if translation.is_empty() {
                continue;
            }
            mapping.insert(&row[source], translation);
        }

        debug!(
            "Built {} -> {} mapping with {} entr(ies) from {} row(s)",
            source_code,
            target_code,
            mapping.len(),
            self.rows.len()
        );
        Ok(mapping)
    }
}

/// Lookup table from normalized source text to target text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: HashMap<String, String>,
}

impl Mapping {
    /// Insert a pair; the source is trimmed and normalized, later inserts win
    pub fn insert(&mut self, source: &str, target: &str) {
        self.entries
            .insert(normalize_content(source.trim()), target.to_string());
    }

    /// Look up already normalized content
    pub fn get(&self, normalized: &str) -> Option<&str> {
        self.entries.get(normalized).map(String::as_str)
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.entries.contains_key(normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<S: AsRef<str>, T: AsRef<str>> FromIterator<(S, T)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut mapping = Mapping::default();
        for (source, target) in iter {
            mapping.insert(source.as_ref(), target.as_ref());
        }
        mapping
    }
}

/// Parse tab-delimited dictionary text
pub fn parse_dictionary(raw: &str) -> Result<Dictionary, ParseError> {
    Dictionary::parse(raw)
}

/// Mapping between two language columns of a dictionary
pub fn get_mapping(
    dictionary: &Dictionary,
    source_code: &str,
    target_code: &str,
) -> Result<Mapping, TranslationError> {
    dictionary.mapping(source_code, target_code)
}
