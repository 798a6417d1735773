/*!
 * Capabilities consumed from the document host.
 *
 * The replacement core never touches a document directly. It asks a
 * `StyleSource` about ranges, writes through a `StyleSink`, and learns which
 * nodes to work on from a `SelectionSource`:
 * - `document`: an in-memory JSON document implementing all three
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::HostError;
use crate::style::{FontName, Style, StyleProbe};
use crate::text_utils::TextRange;

pub mod document;

pub use self::document::Document;

/// Stable identifier of a document node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a selected text node
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub id: NodeId,
    pub name: String,
    pub characters: String,
}

/// Read side: style facets over a sub-range of a node
#[async_trait]
pub trait StyleSource: Send + Sync {
    /// Each facet is uniform over `range` or reported as mixed
    async fn probe(&self, node: &NodeId, range: TextRange) -> Result<StyleProbe, HostError>;
}

/// Write side: text content, range styles and font acquisition
#[async_trait]
pub trait StyleSink: Send + Sync {
    /// Must complete before any facet referencing `font` is set
    async fn load_font(&self, font: &FontName) -> Result<(), HostError>;

    /// Replace the whole text content of a node
    async fn set_characters(&self, node: &NodeId, characters: &str) -> Result<(), HostError>;

    /// Set all eight facets of `style` over `range`
    async fn set_range_style(
        &self,
        node: &NodeId,
        range: TextRange,
        style: &Style,
    ) -> Result<(), HostError>;
}

/// Enumerates text nodes in the current selection, descendants included
pub trait SelectionSource {
    fn selected_text_nodes(&self) -> Vec<TextNode>;
}
