use tracing::debug;

use crate::content::{ContentPatch, NodeContent};
use crate::error::{MindMapError, MindMapResult};
use crate::graph::{build_graph_from_query, MindGraph, MindNode};
use crate::overlay::{merge, GraphOverlay};
use crate::taxonomy::Taxonomy;

/// Query shown when a session starts without one.
pub const DEFAULT_QUERY: &str = "dog food";

/// One browsing session: the current query, its derived base graph and the
/// user's overlay. Changing the query discards the overlay.
#[derive(Debug, Clone)]
pub struct MindMapSession {
    taxonomy: Taxonomy,
    query: String,
    base: MindGraph,
    overlay: GraphOverlay,
}

impl MindMapSession {
    pub fn new(taxonomy: Taxonomy, query: impl Into<String>) -> Self {
        let query = query.into();
        let base = build_graph_from_query(&query, &taxonomy);
        Self {
            taxonomy,
            query,
            base,
            overlay: GraphOverlay::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn base(&self) -> &MindGraph {
        &self.base
    }

    pub fn overlay(&self) -> &GraphOverlay {
        &self.overlay
    }

    /// Rebuilds the base graph and resets every user edit, side panel content
    /// included. Content is keyed by node id and ids are reused across
    /// queries, so kept content would surface on unrelated nodes.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.base = build_graph_from_query(&self.query, &self.taxonomy);
        self.overlay = GraphOverlay::new();
        debug!(query = %self.query, nodes = self.base.nodes.len(), "Rebuilt mind map");
    }

    /// The merged graph as currently displayed.
    pub fn graph(&self) -> MindGraph {
        merge(&self.base, &self.overlay)
    }

    pub fn children_of(&self, parent_id: &str) -> Vec<MindNode> {
        self.graph()
            .children_of(parent_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn add_child(&mut self, parent_id: &str, label: &str) -> MindMapResult<MindNode> {
        self.overlay.add_child(&self.base, parent_id, label)
    }

    pub fn rename(&mut self, node_id: &str, label: &str) -> MindMapResult<()> {
        self.overlay.rename(&self.base, node_id, label)
    }

    /// Opens a node for viewing, seeding its content on first open.
    pub fn open_node(&mut self, node_id: &str) -> MindMapResult<NodeContent> {
        let node = self.require_node(node_id)?;
        Ok(self.overlay.ensure_content(&node).clone())
    }

    fn require_node(&self, node_id: &str) -> MindMapResult<MindNode> {
        self.graph()
            .find_node(node_id)
            .cloned()
            .ok_or_else(|| MindMapError::UnknownNode(node_id.to_string()))
    }

    pub fn upsert_content(
        &mut self,
        node_id: &str,
        patch: ContentPatch,
    ) -> MindMapResult<NodeContent> {
        self.require_node(node_id)?;
        Ok(self.overlay.upsert_content(node_id, patch)?.clone())
    }

    /// Appends a link to the node's panel, seeding the panel first if the
    /// node was never opened.
    pub fn add_link(
        &mut self,
        node_id: &str,
        title: &str,
        url: &str,
    ) -> MindMapResult<NodeContent> {
        let node = self.require_node(node_id)?;
        self.overlay.ensure_content(&node);
        Ok(self.overlay.add_link(node_id, title, url)?.clone())
    }

    pub fn add_comment(
        &mut self,
        node_id: &str,
        user: &str,
        text: &str,
    ) -> MindMapResult<NodeContent> {
        let node = self.require_node(node_id)?;
        self.overlay.ensure_content(&node);
        Ok(self.overlay.add_comment(node_id, user, text)?.clone())
    }

    pub fn add_video(
        &mut self,
        node_id: &str,
        title: &str,
        url: &str,
    ) -> MindMapResult<NodeContent> {
        let node = self.require_node(node_id)?;
        self.overlay.ensure_content(&node);
        Ok(self.overlay.add_video(node_id, title, url)?.clone())
    }
}

impl Default for MindMapSession {
    fn default() -> Self {
        Self::new(Taxonomy::builtin(), DEFAULT_QUERY)
    }
}
