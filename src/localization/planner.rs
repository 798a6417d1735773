/*!
 * Per-node replacement planning and batch aggregation.
 *
 * Planning never mutates the document. Every selected node is planned
 * independently (concurrently, bounded), and the batch only succeeds when
 * every node either has a replacement or is deliberately left unchanged.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::errors::{FailureReason, HostError, TranslationError};
use crate::host::{NodeId, StyleSource, TextNode};
use crate::localization::dictionary::{Dictionary, Mapping};
use crate::localization::exceptions::ExceptionList;
use crate::localization::report::BatchFailure;
use crate::localization::segmenter::{Section, slice_into_sections};
use crate::localization::selector::{BaseStyleSelector, DecisionLog};
use crate::style::Style;
use crate::text_utils::{TextRange, char_len, normalize_content, truncate_text};

/// Default bound on nodes planned at the same time
pub const DEFAULT_MAX_CONCURRENT_NODES: usize = 8;

/// Planned content and styling of one node
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub node: NodeId,
    pub translation: String,
    pub base_style: Style,
    /// Non-base sections, offsets inside `translation`
    pub sections: Vec<Section>,
}

/// Why one node could not be planned, with its decision trace
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacementFailure {
    pub node: NodeId,
    pub node_name: String,
    pub content: String,
    pub reason: FailureReason,
    pub log: Vec<String>,
}

/// Result of planning a single node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutcome {
    /// Content matches an exception and stays as it is
    Unchanged(NodeId),
    Replace(Replacement),
    Failed(ReplacementFailure),
}

/// Plan for a whole selection in which every node succeeded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPlan {
    pub replacements: Vec<Replacement>,
    pub unchanged: Vec<NodeId>,
}

/// Plans replacements from a mapping and exception list
#[derive(Debug, Clone)]
pub struct ReplacementPlanner {
    mapping: Mapping,
    exceptions: ExceptionList,
    max_concurrent_nodes: usize,
}

impl ReplacementPlanner {
    pub fn new(mapping: Mapping, exceptions: ExceptionList) -> Self {
        Self {
            mapping,
            exceptions,
            max_concurrent_nodes: DEFAULT_MAX_CONCURRENT_NODES,
        }
    }

    /// Build a planner from raw dictionary and exceptions text
    pub fn from_sources(
        dictionary_raw: &str,
        delimiter: char,
        exceptions_raw: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self, TranslationError> {
        let dictionary = Dictionary::parse_with_delimiter(dictionary_raw, delimiter)?;
        let exceptions = ExceptionList::parse(exceptions_raw)?;
        let mapping = dictionary.mapping(source_language, target_language)?;
        Ok(Self::new(mapping, exceptions))
    }

    pub fn with_max_concurrent_nodes(mut self, max: usize) -> Self {
        self.max_concurrent_nodes = max.max(1);
        self
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn exceptions(&self) -> &ExceptionList {
        &self.exceptions
    }

    /// Plan one node. Host faults are errors; translation problems are outcomes.
    pub async fn plan_node<S>(&self, source: &S, node: &TextNode) -> Result<NodeOutcome, HostError>
    where
        S: StyleSource + ?Sized,
    {
        let mut log = DecisionLog::new();
        let normalized = normalize_content(&node.characters);
        log.record(format!(
            "Node {} ({}): '{}'",
            node.id,
            node.name,
            truncate_text(&normalized, 60)
        ));

        if self.exceptions.keep_as_is(&normalized) {
            log.record("Content matches an exception, left unchanged");
            return Ok(NodeOutcome::Unchanged(node.id.clone()));
        }

        let Some(translation) = self.mapping.get(&normalized) else {
            log.record("Content is not in the dictionary");
            return Ok(NodeOutcome::Failed(self.failure(node, FailureReason::NoTranslation, log)));
        };

        let range = TextRange::full(char_len(&node.characters));
        let sections = slice_into_sections(source, &node.id, range).await?;
        log.record(format!("Sliced into {} section(s)", sections.len()));

        let selector = BaseStyleSelector::new(&self.mapping, &self.exceptions);
        match selector.select(&node.characters, &sections, translation, &mut log) {
            Some(choice) => Ok(NodeOutcome::Replace(Replacement {
                node: node.id.clone(),
                translation: translation.to_string(),
                base_style: choice.base_style,
                sections: choice.sections,
            })),
            None => Ok(NodeOutcome::Failed(self.failure(
                node,
                FailureReason::CannotDetermineBaseStyle,
                log,
            ))),
        }
    }

    /// Plan every node; any failure fails the whole batch
    pub async fn plan_batch<S>(&self, source: &S, nodes: &[TextNode]) -> Result<BatchPlan, TranslationError>
    where
        S: StyleSource + ?Sized,
    {
        info!("Planning {} text node(s)", nodes.len());
        let outcomes: Vec<Result<NodeOutcome, HostError>> = stream::iter(nodes)
            .map(|node| self.plan_node(source, node))
            .buffered(self.max_concurrent_nodes)
            .collect()
            .await;

        let mut plan = BatchPlan::default();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome? {
                NodeOutcome::Unchanged(id) => plan.unchanged.push(id),
                NodeOutcome::Replace(replacement) => plan.replacements.push(replacement),
                NodeOutcome::Failed(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            warn!("{} of {} text node(s) failed to plan", failures.len(), nodes.len());
            return Err(TranslationError::Batch(BatchFailure::new(failures, nodes.len())));
        }

        debug!(
            "Planned {} replacement(s), {} node(s) unchanged",
            plan.replacements.len(),
            plan.unchanged.len()
        );
        Ok(plan)
    }

    fn failure(&self, node: &TextNode, reason: FailureReason, log: DecisionLog) -> ReplacementFailure {
        ReplacementFailure {
            node: node.id.clone(),
            node_name: node.name.clone(),
            content: node.characters.clone(),
            reason,
            log: log.into_entries(),
        }
    }
}
