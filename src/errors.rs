/*!
 * Error types for the runloc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::localization::report::BatchFailure;
use crate::style::FontName;

/// Errors raised while parsing dictionary or exception text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The dictionary needs a header line and at least one row
    #[error("Dictionary must contain a header and at least one row (found {found} line(s))")]
    TooFewLines { found: usize },

    /// A row does not line up with the header
    #[error("Row on line {line} has {found} column(s), but the header has {expected}")]
    ColumnCountMismatch {
        /// 1-based line number of the offending row
        line: usize,
        /// Column count of the header
        expected: usize,
        /// Column count of the row
        found: usize,
    },

    /// An exception line is not a valid regular expression
    #[error("Invalid exception pattern on line {line} ('{pattern}'): {message}")]
    InvalidPattern {
        line: usize,
        pattern: String,
        message: String,
    },
}

/// Faults reported by the document host
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The node does not exist or is not a text node
    #[error("Text node not found: {0}")]
    NodeNotFound(String),

    /// A style query could not be answered
    #[error("Style query failed: {0}")]
    StyleQuery(String),

    /// The font cannot be loaded by the host
    #[error("Font '{0}' is not available")]
    FontUnavailable(FontName),

    /// A facet referencing the font was set before the font was loaded
    #[error("Font '{0}' must be loaded before it is applied")]
    FontNotLoaded(FontName),

    /// Any other write fault
    #[error("Mutation failed: {0}")]
    Mutation(String),
}

/// Why a single text node could not be translated
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Normalized content is neither in the mapping nor excepted
    #[error("no translation found")]
    NoTranslation,

    /// No candidate style produced an unambiguous reconstruction
    #[error("cannot determine base style")]
    CannotDetermineBaseStyle,
}

/// Errors that abort a translate operation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Malformed dictionary or exceptions text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Requested language code is not a header cell
    #[error("Language '{code}' is missing from the dictionary header")]
    MissingColumn { code: String },

    /// At least one selected node failed; nothing was mutated
    #[error("{}", .0.summary())]
    Batch(BatchFailure),

    /// A font could not be acquired during the apply phase
    #[error("Failed to load font '{font}': {message}")]
    FontLoadFailure { font: FontName, message: String },

    /// Error from the document host
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ParseError> for AppError {
    fn from(error: ParseError) -> Self {
        Self::Translation(TranslationError::Parse(error))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
