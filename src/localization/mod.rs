/*!
 * Style-preserving localization of text nodes.
 *
 * This module contains the replacement core. It is split into several
 * submodules:
 *
 * - `dictionary`: Dictionary parsing and language mappings
 * - `exceptions`: Patterns for content kept as is
 * - `segmenter`: Slicing a node into style-uniform sections
 * - `selector`: Base style selection and section relocation
 * - `planner`: Per-node planning and all-or-nothing batches
 * - `reapplier`: Writing replacements back to the host
 * - `report`: Diagnostics for failed batches
 */

// Re-export main types for easier usage
pub use self::dictionary::{Dictionary, Mapping, get_mapping, parse_dictionary};
pub use self::exceptions::{ExceptionList, keep_as_is, parse_exceptions};
pub use self::planner::{BatchPlan, NodeOutcome, Replacement, ReplacementFailure, ReplacementPlanner};
pub use self::reapplier::StyleReapplier;
pub use self::report::BatchFailure;
pub use self::segmenter::{Section, slice_into_sections};
pub use self::selector::{BaseStyleChoice, BaseStyleSelector, DecisionLog};

// Submodules
pub mod dictionary;
pub mod exceptions;
pub mod planner;
pub mod reapplier;
pub mod report;
pub mod segmenter;
pub mod selector;
