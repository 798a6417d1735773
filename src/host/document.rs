/*!
 * In-memory document host.
 *
 * A JSON-serializable tree of frames and text nodes. Text nodes are authored
 * as styled runs and stored internally with one `Style` per char, which is
 * what range queries and range writes operate on.
 */

use async_trait::async_trait;
use log::{debug, trace};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::HostError;
use crate::host::{NodeId, SelectionSource, StyleSink, StyleSource, TextNode};
use crate::style::{FontName, Style, StyleProbe};
use crate::text_utils::TextRange;

/// A contiguous piece of text sharing one style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub style: Style,
}

impl Run {
    pub fn new(text: &str, style: Style) -> Self {
        Self {
            text: text.to_string(),
            style,
        }
    }
}

/// Document tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Frame {
        id: NodeId,
        #[serde(default)]
        name: String,
        #[serde(default)]
        children: Vec<Node>,
    },
    Text {
        id: NodeId,
        #[serde(default)]
        name: String,
        #[serde(default)]
        runs: Vec<Run>,
    },
}

impl Node {
    pub fn frame(id: &str, children: Vec<Node>) -> Self {
        Node::Frame {
            id: NodeId::new(id),
            name: id.to_string(),
            children,
        }
    }

    pub fn text(id: &str, runs: Vec<Run>) -> Self {
        Node::Text {
            id: NodeId::new(id),
            name: id.to_string(),
            runs,
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Node::Frame { id, .. } | Node::Text { id, .. } => id,
        }
    }
}

/// On-disk document format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub nodes: Vec<Node>,

    /// Selected node ids; empty selects the whole document
    #[serde(default)]
    pub selection: Vec<NodeId>,

    /// Fonts the host can load; `None` means every font is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_fonts: Option<Vec<FontName>>,
}

#[derive(Debug, Clone)]
struct TextBody {
    chars: Vec<char>,
    styles: Vec<Style>,
}

impl TextBody {
    fn from_runs(runs: &[Run]) -> Self {
        let mut chars = Vec::new();
        let mut styles = Vec::new();
        for run in runs {
            for c in run.text.chars() {
                chars.push(c);
                styles.push(run.style.clone());
            }
        }
        Self { chars, styles }
    }

    fn to_runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for (c, style) in self.chars.iter().zip(&self.styles) {
            match runs.last_mut() {
                Some(run) if run.style == *style => run.text.push(*c),
                _ => runs.push(Run {
                    text: c.to_string(),
                    style: style.clone(),
                }),
            }
        }
        runs
    }

    fn characters(&self) -> String {
        self.chars.iter().collect()
    }

    fn check_range(&self, range: TextRange) -> bool {
        range.start < range.end && range.end <= self.chars.len()
    }
}

/// In-memory host implementing every document capability
#[derive(Debug)]
pub struct Document {
    tree: Vec<Node>,
    selection: Vec<NodeId>,
    available_fonts: Option<HashSet<FontName>>,
    bodies: RwLock<HashMap<NodeId, TextBody>>,
    loaded_fonts: RwLock<HashSet<FontName>>,
    probe_count: AtomicUsize,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self::from_file(DocumentFile {
            nodes,
            selection: Vec::new(),
            available_fonts: None,
        })
    }

    pub fn from_file(file: DocumentFile) -> Self {
        let mut bodies = HashMap::new();
        collect_bodies(&file.nodes, &mut bodies);
        Self {
            tree: file.nodes,
            selection: file.selection,
            available_fonts: file.available_fonts.map(|fonts| fonts.into_iter().collect()),
            bodies: RwLock::new(bodies),
            loaded_fonts: RwLock::new(HashSet::new()),
            probe_count: AtomicUsize::new(0),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: DocumentFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    /// Select the given node ids
    pub fn with_selection(mut self, ids: &[&str]) -> Self {
        self.selection = ids.iter().map(|id| NodeId::new(id)).collect();
        self
    }

    /// Restrict which fonts `load_font` can provide
    pub fn with_available_fonts(mut self, fonts: Vec<FontName>) -> Self {
        self.available_fonts = Some(fonts.into_iter().collect());
        self
    }

    /// Current state with text nodes rebuilt from their char styles
    pub fn to_file(&self) -> DocumentFile {
        let bodies = self.bodies.read();
        let mut available_fonts: Option<Vec<FontName>> = self
            .available_fonts
            .as_ref()
            .map(|fonts| fonts.iter().cloned().collect());
        if let Some(fonts) = available_fonts.as_mut() {
            fonts.sort_by(|a, b| (&a.family, &a.style).cmp(&(&b.family, &b.style)));
        }
        DocumentFile {
            nodes: rebuild_nodes(&self.tree, &bodies),
            selection: self.selection.clone(),
            available_fonts,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_file())
    }

    /// Current text of a node
    pub fn characters(&self, id: &str) -> Option<String> {
        self.bodies.read().get(&NodeId::new(id)).map(TextBody::characters)
    }

    /// Current runs of a node, adjacent equal styles merged
    pub fn runs(&self, id: &str) -> Option<Vec<Run>> {
        self.bodies.read().get(&NodeId::new(id)).map(TextBody::to_runs)
    }

    /// Number of style queries answered so far
    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }

    pub fn is_font_loaded(&self, font: &FontName) -> bool {
        self.loaded_fonts.read().contains(font)
    }

    fn require_loaded(&self, font: &FontName) -> Result<(), HostError> {
        if self.is_font_loaded(font) {
            Ok(())
        } else {
            Err(HostError::FontNotLoaded(font.clone()))
        }
    }
}

#[async_trait]
impl StyleSource for Document {
    async fn probe(&self, node: &NodeId, range: TextRange) -> Result<StyleProbe, HostError> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        let bodies = self.bodies.read();
        let body = bodies
            .get(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        if !body.check_range(range) {
            return Err(HostError::StyleQuery(format!(
                "range {} is outside node {} ({} chars)",
                range,
                node,
                body.chars.len()
            )));
        }
        trace!("Probing {} on node {}", range, node);
        Ok(StyleProbe::over(&body.styles[range.start..range.end]))
    }
}

#[async_trait]
impl StyleSink for Document {
    async fn load_font(&self, font: &FontName) -> Result<(), HostError> {
        if let Some(available) = &self.available_fonts {
            if !available.contains(font) {
                return Err(HostError::FontUnavailable(font.clone()));
            }
        }
        debug!("Loaded font {}", font);
        self.loaded_fonts.write().insert(font.clone());
        Ok(())
    }

    async fn set_characters(&self, node: &NodeId, characters: &str) -> Result<(), HostError> {
        let mut bodies = self.bodies.write();
        let body = bodies
            .get_mut(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        // New text inherits the style of the former first char
        let style = body.styles.first().cloned().unwrap_or_default();
        self.require_loaded(&style.font_name)?;
        body.chars = characters.chars().collect();
        body.styles = vec![style; body.chars.len()];
        Ok(())
    }

    async fn set_range_style(
        &self,
        node: &NodeId,
        range: TextRange,
        style: &Style,
    ) -> Result<(), HostError> {
        self.require_loaded(&style.font_name)?;
        let mut bodies = self.bodies.write();
        let body = bodies
            .get_mut(node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        if !body.check_range(range) {
            return Err(HostError::Mutation(format!(
                "range {} is outside node {} ({} chars)",
                range,
                node,
                body.chars.len()
            )));
        }
        for slot in &mut body.styles[range.start..range.end] {
            *slot = style.clone();
        }
        Ok(())
    }
}

impl SelectionSource for Document {
    fn selected_text_nodes(&self) -> Vec<TextNode> {
        let bodies = self.bodies.read();
        let mut found: Vec<(NodeId, String)> = Vec::new();
        if self.selection.is_empty() {
            collect_text_nodes(&self.tree, &mut found);
        } else {
            for id in &self.selection {
                if let Some(node) = find_node(&self.tree, id) {
                    collect_text_nodes(std::slice::from_ref(node), &mut found);
                }
            }
        }

        let mut seen = HashSet::new();
        found
            .into_iter()
            .filter(|(id, _)| seen.insert(id.clone()))
            .filter_map(|(id, name)| {
                bodies.get(&id).map(|body| TextNode {
                    characters: body.characters(),
                    id,
                    name,
                })
            })
            .collect()
    }
}

fn collect_bodies(nodes: &[Node], bodies: &mut HashMap<NodeId, TextBody>) {
    for node in nodes {
        match node {
            Node::Frame { children, .. } => collect_bodies(children, bodies),
            Node::Text { id, runs, .. } => {
                bodies.insert(id.clone(), TextBody::from_runs(runs));
            }
        }
    }
}

fn collect_text_nodes(nodes: &[Node], found: &mut Vec<(NodeId, String)>) {
    for node in nodes {
        match node {
            Node::Frame { children, .. } => collect_text_nodes(children, found),
            Node::Text { id, name, .. } => found.push((id.clone(), name.clone())),
        }
    }
}

fn find_node<'a>(nodes: &'a [Node], id: &NodeId) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Frame { children, .. } = node {
            if let Some(found) = find_node(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn rebuild_nodes(nodes: &[Node], bodies: &HashMap<NodeId, TextBody>) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| match node {
            Node::Frame { id, name, children } => Node::Frame {
                id: id.clone(),
                name: name.clone(),
                children: rebuild_nodes(children, bodies),
            },
            Node::Text { id, name, runs } => Node::Text {
                id: id.clone(),
                name: name.clone(),
                runs: bodies.get(id).map(TextBody::to_runs).unwrap_or_else(|| runs.clone()),
            },
        })
        .collect()
}
