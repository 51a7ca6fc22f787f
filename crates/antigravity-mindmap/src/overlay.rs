//! User edits layered over a derived base graph.
//!
//! The overlay only ever grows: added nodes and edges are appended, renames
//! are recorded as label overrides, and content is kept per node id. The base
//! graph is never touched; [`merge`] combines the two without side effects.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::content::{
    ai_placeholder, initial_content, CommentItem, ContentPatch, LinkItem, NodeContent, VideoItem,
};
use crate::error::{MindMapError, MindMapResult};
use crate::graph::{MindEdge, MindGraph, MindNode};

/// Label given to children added without one.
pub const DEFAULT_CHILD_LABEL: &str = "New";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOverlay {
    nodes: Vec<MindNode>,
    edges: Vec<MindEdge>,
    label_overrides: HashMap<String, String>,
    content_by_node: HashMap<String, NodeContent>,
}

impl GraphOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[MindNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[MindEdge] {
        &self.edges
    }

    pub fn content(&self, node_id: &str) -> Option<&NodeContent> {
        self.content_by_node.get(node_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.edges.is_empty()
            && self.label_overrides.is_empty()
            && self.content_by_node.is_empty()
    }

    fn owns(&self, node_id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == node_id)
    }

    /// Appends a child under `parent_id`, which may be a base or overlay node,
    /// and seeds its content. A blank label becomes [`DEFAULT_CHILD_LABEL`].
    pub fn add_child(
        &mut self,
        base: &MindGraph,
        parent_id: &str,
        label: &str,
    ) -> MindMapResult<MindNode> {
        if !base.contains(parent_id) && !self.owns(parent_id) {
            return Err(MindMapError::UnknownNode(parent_id.to_string()));
        }

        let label = match label.trim() {
            "" => DEFAULT_CHILD_LABEL,
            trimmed => trimmed,
        };
        let node = MindNode {
            id: format!("user_{}", Uuid::new_v4().simple()),
            label: label.to_string(),
            parent_id: Some(parent_id.to_string()),
        };

        self.nodes.push(node.clone());
        self.edges.push(MindEdge {
            from: parent_id.to_string(),
            to: node.id.clone(),
        });
        self.content_by_node
            .insert(node.id.clone(), initial_content(label));

        debug!(node_id = %node.id, parent_id, "Added child node");
        Ok(node)
    }

    /// Relabels a node added through this overlay with the trimmed `label`
    /// and refreshes its AI placeholder. Base nodes cannot be renamed and a
    /// blank label leaves the node untouched.
    pub fn rename(&mut self, base: &MindGraph, node_id: &str, label: &str) -> MindMapResult<()> {
        if !self.owns(node_id) {
            return Err(if base.contains(node_id) {
                MindMapError::NotRenameable(node_id.to_string())
            } else {
                MindMapError::UnknownNode(node_id.to_string())
            });
        }

        let label = label.trim();
        if label.is_empty() {
            return Err(MindMapError::BlankLabel(node_id.to_string()));
        }

        self.label_overrides
            .insert(node_id.to_string(), label.to_string());
        if let Some(content) = self.content_by_node.get_mut(node_id) {
            content.ai = ai_placeholder(label);
        }
        Ok(())
    }

    /// Returns the node's content, seeding it from the node's label on first use.
    pub fn ensure_content(&mut self, node: &MindNode) -> &NodeContent {
        self.content_by_node
            .entry(node.id.clone())
            .or_insert_with(|| initial_content(&node.label))
    }

    fn content_mut(&mut self, node_id: &str) -> &mut NodeContent {
        self.content_by_node
            .entry(node_id.to_string())
            .or_default()
    }

    /// Merges `patch` into the node's content, starting from empty content
    /// when the node has none yet. Nothing is stored if any item is invalid.
    pub fn upsert_content(
        &mut self,
        node_id: &str,
        patch: ContentPatch,
    ) -> MindMapResult<&NodeContent> {
        patch.validate()?;
        let content = self.content_mut(node_id);
        patch.apply_to(content);
        Ok(content)
    }

    /// Appends a link after trimming it; the URL must be http(s).
    pub fn add_link(
        &mut self,
        node_id: &str,
        title: &str,
        url: &str,
    ) -> MindMapResult<&NodeContent> {
        let link = LinkItem::new(title, url)?;
        let content = self.content_mut(node_id);
        content.links.push(link);
        Ok(content)
    }

    pub fn add_comment(
        &mut self,
        node_id: &str,
        user: &str,
        text: &str,
    ) -> MindMapResult<&NodeContent> {
        let comment = CommentItem::new(user, text)?;
        let content = self.content_mut(node_id);
        content.comments.push(comment);
        Ok(content)
    }

    /// Appends a video after trimming it; the URL must be http(s).
    pub fn add_video(
        &mut self,
        node_id: &str,
        title: &str,
        url: &str,
    ) -> MindMapResult<&NodeContent> {
        let video = VideoItem::new(title, url)?;
        let content = self.content_mut(node_id);
        content.videos.push(video);
        Ok(content)
    }
}

/// Base nodes followed by overlay nodes, with label overrides applied, and
/// base edges followed by overlay edges.
pub fn merge(base: &MindGraph, overlay: &GraphOverlay) -> MindGraph {
    let nodes = base
        .nodes
        .iter()
        .chain(overlay.nodes.iter())
        .map(|n| match overlay.label_overrides.get(&n.id) {
            Some(label) => MindNode {
                label: label.clone(),
                ..n.clone()
            },
            None => n.clone(),
        })
        .collect();

    let edges = base
        .edges
        .iter()
        .chain(overlay.edges.iter())
        .cloned()
        .collect();

    MindGraph { nodes, edges }
}
