/*!
 * Tests for style segmentation
 */

use runloc::host::document::Run;
use runloc::localization::segmenter::{Section, slice_into_sections};
use runloc::text_utils::TextRange;
use runloc::{NodeId, Style};

use crate::common::{bold, document_with, red_underline, regular};

/// One single-char run per style index
fn runs_for(pattern: &[usize], styles: &[Style]) -> Vec<Run> {
    pattern
        .iter()
        .enumerate()
        .map(|(i, s)| Run::new(&char::from(b'a' + i as u8).to_string(), styles[*s].clone()))
        .collect()
}

/// Run-length encoding of a style pattern, the expected maximal sections
fn expected_sections(pattern: &[usize], styles: &[Style]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for (i, s) in pattern.iter().enumerate() {
        match sections.last_mut() {
            Some(last) if last.style == styles[*s] => last.to = i + 1,
            _ => sections.push(Section::new(i, i + 1, styles[*s].clone())),
        }
    }
    sections
}

#[tokio::test]
async fn test_slice_withUniformNode_shouldReturnOneSectionAfterOneProbe() {
    let doc = document_with(vec![("n", vec![Run::new("Hello world", regular())])]);
    let sections = slice_into_sections(&doc, &NodeId::new("n"), TextRange::new(0, 11))
        .await
        .unwrap();
    assert_eq!(sections, vec![Section::new(0, 11, regular())]);
    assert_eq!(doc.probe_count(), 1);
}

#[tokio::test]
async fn test_slice_withTwoRuns_shouldFindRunBoundary() {
    let doc = document_with(vec![(
        "n",
        vec![Run::new("Hello ", regular()), Run::new("world", bold())],
    )]);
    let sections = slice_into_sections(&doc, &NodeId::new("n"), TextRange::new(0, 11))
        .await
        .unwrap();
    assert_eq!(
        sections,
        vec![Section::new(0, 6, regular()), Section::new(6, 11, bold())]
    );
}

#[tokio::test]
async fn test_slice_withSubRange_shouldStayInsideIt() {
    let doc = document_with(vec![(
        "n",
        vec![Run::new("Hello ", regular()), Run::new("world", bold())],
    )]);
    let sections = slice_into_sections(&doc, &NodeId::new("n"), TextRange::new(3, 8))
        .await
        .unwrap();
    assert_eq!(
        sections,
        vec![Section::new(3, 6, regular()), Section::new(6, 8, bold())]
    );
}

#[tokio::test]
async fn test_slice_withEveryPatternUpToFiveChars_shouldBeExactAndMaximal() {
    let styles = vec![regular(), bold(), red_underline()];
    for len in 1..=5usize {
        for code in 0..3usize.pow(len as u32) {
            let pattern: Vec<usize> = (0..len).map(|i| code / 3usize.pow(i as u32) % 3).collect();
            let doc = document_with(vec![("n", runs_for(&pattern, &styles))]);
            let sections = slice_into_sections(&doc, &NodeId::new("n"), TextRange::full(len))
                .await
                .unwrap();

            assert_eq!(sections, expected_sections(&pattern, &styles), "pattern {:?}", pattern);
            assert_eq!(sections.first().map(|s| s.from), Some(0));
            assert_eq!(sections.last().map(|s| s.to), Some(len));
            for pair in sections.windows(2) {
                assert_eq!(pair[0].to, pair[1].from, "gap or overlap in {:?}", pattern);
                assert_ne!(pair[0].style, pair[1].style, "not maximal in {:?}", pattern);
            }
        }
    }
}

#[tokio::test]
async fn test_slice_withEmptyRange_shouldReturnNoSections() {
    let doc = document_with(vec![("n", vec![Run::new("x", regular())])]);
    let sections = slice_into_sections(&doc, &NodeId::new("n"), TextRange::new(1, 1))
        .await
        .unwrap();
    assert!(sections.is_empty());
    assert_eq!(doc.probe_count(), 0);
}

#[tokio::test]
async fn test_slice_withUnknownNode_shouldReturnHostError() {
    let doc = document_with(vec![("n", vec![Run::new("x", regular())])]);
    let result = slice_into_sections(&doc, &NodeId::new("missing"), TextRange::new(0, 1)).await;
    assert!(result.is_err());
}
