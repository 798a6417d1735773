/*!
 * Tests for per-node and batch planning
 */

use runloc::host::document::Run;
use runloc::localization::planner::{NodeOutcome, ReplacementPlanner};
use runloc::localization::segmenter::Section;
use runloc::{FailureReason, NodeId, SelectionSource, TranslationError};

use crate::common::{SAMPLE_DICTIONARY, SAMPLE_EXCEPTIONS, bold, document_with, init_logging, regular};

fn planner(source: &str, target: &str) -> ReplacementPlanner {
    ReplacementPlanner::from_sources(SAMPLE_DICTIONARY, '\t', SAMPLE_EXCEPTIONS, source, target).unwrap()
}

#[tokio::test]
async fn test_planNode_withUniformRussianNode_shouldReplaceWithoutSections() {
    let planner = ReplacementPlanner::from_sources("RU\tEN\nПривет!\tHello!", '\t', "", "RU", "EN").unwrap();
    let doc = document_with(vec![("n", vec![Run::new("Привет!", regular())])]);
    let node = &doc.selected_text_nodes()[0];

    match planner.plan_node(&doc, node).await.unwrap() {
        NodeOutcome::Replace(replacement) => {
            assert_eq!(replacement.node, NodeId::new("n"));
            assert_eq!(replacement.translation, "Hello!");
            assert_eq!(replacement.base_style, regular());
            assert!(replacement.sections.is_empty());
        }
        other => panic!("expected a replacement, got {:?}", other),
    }
}

#[tokio::test]
async fn test_planNode_withStyledRuns_shouldRelocateBoldRun() {
    let doc = document_with(vec![(
        "n",
        vec![Run::new("Hello ", regular()), Run::new("world", bold())],
    )]);
    let node = &doc.selected_text_nodes()[0];

    match planner("EN", "FR").plan_node(&doc, node).await.unwrap() {
        NodeOutcome::Replace(replacement) => {
            assert_eq!(replacement.translation, "Bonjour monde");
            assert_eq!(replacement.base_style, regular());
            assert_eq!(replacement.sections, vec![Section::new(8, 13, bold())]);
        }
        other => panic!("expected a replacement, got {:?}", other),
    }
}

#[tokio::test]
async fn test_planNode_withLineBreakInContent_shouldLookUpNormalizedText() {
    let doc = document_with(vec![("n", vec![Run::new("Hello\nworld", regular())])]);
    let node = &doc.selected_text_nodes()[0];

    match planner("EN", "RU").plan_node(&doc, node).await.unwrap() {
        NodeOutcome::Replace(replacement) => assert_eq!(replacement.translation, "Привет мир"),
        other => panic!("expected a replacement, got {:?}", other),
    }
}

#[tokio::test]
async fn test_planNode_withExceptedContent_shouldLeaveNodeUnchangedWithoutProbing() {
    let doc = document_with(vec![("n", vec![Run::new("2024", regular())])]);
    let node = &doc.selected_text_nodes()[0];

    let outcome = planner("EN", "FR").plan_node(&doc, node).await.unwrap();
    assert_eq!(outcome, NodeOutcome::Unchanged(NodeId::new("n")));
    assert_eq!(doc.probe_count(), 0);
}

#[tokio::test]
async fn test_planNode_withUnknownContent_shouldFailBeforeSegmentation() {
    init_logging();
    let doc = document_with(vec![("n", vec![Run::new("Goodbye", regular())])]);
    let node = &doc.selected_text_nodes()[0];

    match planner("EN", "FR").plan_node(&doc, node).await.unwrap() {
        NodeOutcome::Failed(failure) => {
            assert_eq!(failure.reason, FailureReason::NoTranslation);
            assert_eq!(failure.content, "Goodbye");
            assert!(!failure.log.is_empty());
        }
        other => panic!("expected a failure, got {:?}", other),
    }
    assert_eq!(doc.probe_count(), 0);
}

#[tokio::test]
async fn test_planNode_withEmptyTargetCell_shouldReportNoTranslation() {
    let doc = document_with(vec![("n", vec![Run::new("Save", regular())])]);
    let node = &doc.selected_text_nodes()[0];

    let outcome = planner("EN", "FR").plan_node(&doc, node).await.unwrap();
    assert!(matches!(
        outcome,
        NodeOutcome::Failed(ref f) if f.reason == FailureReason::NoTranslation
    ));
}

#[tokio::test]
async fn test_planBatch_withAllNodesResolvable_shouldKeepSelectionOrder() {
    let doc = document_with(vec![
        ("a", vec![Run::new("Hello!", regular())]),
        ("b", vec![Run::new("12", bold())]),
        ("c", vec![Run::new("Hello ", regular()), Run::new("world", bold())]),
    ]);
    let nodes = doc.selected_text_nodes();

    let plan = planner("EN", "FR")
        .with_max_concurrent_nodes(2)
        .plan_batch(&doc, &nodes)
        .await
        .unwrap();

    let replaced: Vec<&str> = plan.replacements.iter().map(|r| r.node.as_str()).collect();
    assert_eq!(replaced, vec!["a", "c"]);
    assert_eq!(plan.unchanged, vec![NodeId::new("b")]);
}

#[tokio::test]
async fn test_planBatch_withAnyFailure_shouldFailWholeBatchWithEveryDiagnostic() {
    let doc = document_with(vec![
        ("a", vec![Run::new("Hello!", regular())]),
        ("b", vec![Run::new("Goodbye", regular())]),
        ("c", vec![Run::new("Hello", bold()), Run::new(" world", regular())]),
    ]);
    let nodes = doc.selected_text_nodes();

    match planner("EN", "FR").plan_batch(&doc, &nodes).await {
        Err(TranslationError::Batch(batch)) => {
            assert_eq!(batch.total_nodes, 3);
            let reasons: Vec<(&str, FailureReason)> = batch
                .failures
                .iter()
                .map(|f| (f.node.as_str(), f.reason))
                .collect();
            assert_eq!(
                reasons,
                vec![
                    ("b", FailureReason::NoTranslation),
                    ("c", FailureReason::CannotDetermineBaseStyle),
                ]
            );
            assert!(batch.report().contains("== Node c (c) =="));
        }
        other => panic!("expected a batch failure, got {:?}", other),
    }
    // Planning never writes
    assert_eq!(doc.characters("a").as_deref(), Some("Hello!"));
}

#[test]
fn test_fromSources_withMissingLanguage_shouldFailWithMissingColumn() {
    let result = ReplacementPlanner::from_sources(SAMPLE_DICTIONARY, '\t', "", "EN", "DE");
    assert!(matches!(result, Err(TranslationError::MissingColumn { ref code }) if code == "DE"));
}

#[test]
fn test_fromSources_withInvalidException_shouldFailWithParseError() {
    let result = ReplacementPlanner::from_sources(SAMPLE_DICTIONARY, '\t', "[", "EN", "FR");
    assert!(matches!(result, Err(TranslationError::Parse(_))));
}
