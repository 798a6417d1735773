/*!
 * Human-readable diagnostics for a failed batch.
 */

use std::fmt::Write;

use crate::errors::FailureReason;
use crate::localization::planner::ReplacementFailure;
use crate::text_utils::truncate_text;

/// Every failing node of a batch, in selection order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub failures: Vec<ReplacementFailure>,
    pub total_nodes: usize,
}

impl BatchFailure {
    pub fn new(failures: Vec<ReplacementFailure>, total_nodes: usize) -> Self {
        Self { failures, total_nodes }
    }

    /// Short message for the user
    pub fn summary(&self) -> String {
        let missing = self.count(FailureReason::NoTranslation);
        let ambiguous = self.count(FailureReason::CannotDetermineBaseStyle);
        let mut summary = format!(
            "{} of {} text node(s) could not be translated, nothing was changed",
            self.failures.len(),
            self.total_nodes
        );
        if missing > 0 {
            let _ = write!(summary, "; {} without translation", missing);
        }
        if ambiguous > 0 {
            let _ = write!(summary, "; {} with undetermined base style", ambiguous);
        }
        summary
    }

    /// Detailed per-node report with full decision logs
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.summary());
        for failure in &self.failures {
            let _ = writeln!(out);
            let _ = writeln!(out, "== Node {} ({}) ==", failure.node, failure.node_name);
            let _ = writeln!(out, "Reason:  {}", failure.reason);
            let _ = writeln!(out, "Content: {}", truncate_text(&failure.content, 120));
            for line in &failure.log {
                let _ = writeln!(out, "  {}", line);
            }
        }
        out
    }

    fn count(&self, reason: FailureReason) -> usize {
        self.failures.iter().filter(|f| f.reason == reason).count()
    }
}
