/*!
 * # runloc - style-preserving localization of rich text
 *
 * A Rust library that replaces the text of design document nodes with
 * dictionary translations while keeping the styling of every character run.
 *
 * ## Features
 *
 * - Tabular multi-language dictionaries (one column per language code)
 * - Exception patterns for content that must stay untranslated
 * - Bisection-based slicing of a node into style-uniform sections
 * - Base style selection with unambiguous relocation of styled runs
 * - All-or-nothing batches with a per-node decision log on failure
 * - Host-agnostic: the document is reached through capability traits
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `localization`: The replacement core:
 *   - `localization::dictionary`: Dictionary parsing and mappings
 *   - `localization::exceptions`: Exception patterns
 *   - `localization::segmenter`: Style segmentation
 *   - `localization::selector`: Base style selection
 *   - `localization::planner`: Per-node and batch planning
 *   - `localization::reapplier`: Applying replacements
 * - `host`: Capabilities consumed from the document host, plus an
 *   in-memory JSON document implementing them
 * - `style`: The character style value type
 * - `text_utils`: Normalization and char-offset helpers
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod host;
pub mod localization;
pub mod style;
pub mod text_utils;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslateSummary};
pub use errors::{AppError, FailureReason, HostError, ParseError, TranslationError};
pub use host::{Document, NodeId, SelectionSource, StyleSink, StyleSource, TextNode};
pub use localization::{Dictionary, Mapping, Replacement, ReplacementFailure, ReplacementPlanner};
pub use style::{FontName, Style};
pub use text_utils::{TextRange, normalize_content};
