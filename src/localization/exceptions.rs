/*!
 * Exception patterns: content matching any of them is kept as is.
 */

use regex::Regex;

use crate::errors::ParseError;

/// Compiled exception patterns, one per non-blank input line
#[derive(Debug, Clone, Default)]
pub struct ExceptionList {
    patterns: Vec<Regex>,
}

impl ExceptionList {
    /// Compile newline-separated patterns, skipping blank lines
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let mut patterns = Vec::new();
        for (index, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let pattern = Regex::new(line).map_err(|e| ParseError::InvalidPattern {
                line: index + 1,
                pattern: line.to_string(),
                message: e.to_string(),
            })?;
            patterns.push(pattern);
        }
        Ok(Self { patterns })
    }

    /// True iff any pattern matches somewhere in `content`
    pub fn keep_as_is(&self, content: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(content))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}

pub fn parse_exceptions(raw: &str) -> Result<ExceptionList, ParseError> {
    ExceptionList::parse(raw)
}

pub fn keep_as_is(content: &str, exceptions: &ExceptionList) -> bool {
    exceptions.keep_as_is(content)
}
