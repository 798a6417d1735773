/*!
 * Style segmentation of a text node.
 *
 * The host only answers "is this range uniform?", so sections are found by
 * bisection: uniform ranges come back whole, mixed ranges are split at the
 * midpoint and the halves are stitched back together.
 */

use futures::future::{BoxFuture, FutureExt};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::errors::HostError;
use crate::host::{NodeId, StyleSource};
use crate::style::Style;
use crate::text_utils::TextRange;

/// Style-uniform half-open range `[from, to)` of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub from: usize,
    pub to: usize,
    pub style: Style,
}

impl Section {
    pub fn new(from: usize, to: usize, style: Style) -> Self {
        Self { from, to, style }
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.from, self.to)
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// Partition `range` into maximal style-uniform sections.
///
/// The result covers `range` exactly, without gaps or overlaps, and no two
/// adjacent sections share an equal style.
pub fn slice_into_sections<'a, S>(
    source: &'a S,
    node: &'a NodeId,
    range: TextRange,
) -> BoxFuture<'a, Result<Vec<Section>, HostError>>
where
    S: StyleSource + ?Sized,
{
    async move {
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let probe = source.probe(node, range).await?;
        if let Some(style) = probe.clone().into_uniform() {
            return Ok(vec![Section::new(range.start, range.end, style)]);
        }
        if range.len() == 1 {
            return Err(HostError::StyleQuery(format!(
                "single char {} of node {} reported mixed facets {:?}",
                range,
                node,
                probe.mixed_facets()
            )));
        }

        trace!("Range {} of node {} is mixed, bisecting", range, node);
        let (left_range, right_range) = range.halves();
        let mut left = slice_into_sections(source, node, left_range).await?;
        let right = slice_into_sections(source, node, right_range).await?;
        Ok(merge_sections(&mut left, right))
    }
    .boxed()
}

/// Concatenate two adjacent partitions, fusing the seam when styles match
fn merge_sections(left: &mut Vec<Section>, right: Vec<Section>) -> Vec<Section> {
    let mut right = right.into_iter();
    if let (Some(last), Some(first)) = (left.last_mut(), right.as_slice().first()) {
        if last.style == first.style {
            last.to = first.to;
            right.next();
        }
    }
    left.extend(right);
    std::mem::take(left)
}
