//! Entity types for the how-to knowledge graph

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::data::identifiers::{EdgeId, NodeId};
use crate::data::types::{Category, RelationType};

/// A topic or task entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub category: Category,
    pub ai_summary: String,
    /// Step-by-step instructions, in order
    pub steps: Vec<String>,
    pub tools: Vec<String>,
    pub materials: Vec<String>,
    pub common_mistakes: Vec<String>,
    /// Intended range 1-5; not enforced
    pub difficulty: Option<u8>,
    pub time_estimate: String,
    pub cost_estimate: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Materializes a stored record from caller-supplied fields.
    pub fn from_new(id: NodeId, fields: NewNode, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            category: fields.category,
            ai_summary: fields.ai_summary,
            steps: fields.steps,
            tools: fields.tools,
            materials: fields.materials,
            common_mistakes: fields.common_mistakes,
            difficulty: fields.difficulty,
            time_estimate: fields.time_estimate,
            cost_estimate: fields.cost_estimate,
            created_at: now,
            updated_at: now,
        }
    }

    /// Seed-match predicate: `needle_lower` is a substring of the lowercased
    /// title or AI summary. The caller lowercases the needle once.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.ai_summary.to_lowercase().contains(needle_lower)
    }
}

/// Caller-supplied fields of a Node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNode {
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub time_estimate: String,
    #[serde(default)]
    pub cost_estimate: String,
}

impl NewNode {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            category,
            ai_summary: String::new(),
            steps: Vec::new(),
            tools: Vec::new(),
            materials: Vec::new(),
            common_mistakes: Vec::new(),
            difficulty: None,
            time_estimate: String::new(),
            cost_estimate: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.ai_summary = summary.into();
        self
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_materials<I, S>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_common_mistakes<I, S>(mut self, mistakes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.common_mistakes = mistakes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_estimates(mut self, time: impl Into<String>, cost: impl Into<String>) -> Self {
        self.time_estimate = time.into();
        self.cost_estimate = cost.into();
        self
    }
}

/// A directed, typed relation between two Nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
    pub relation_type: RelationType,
}

impl Edge {
    pub fn touches(&self, id: &NodeId) -> bool {
        self.from_node_id == *id || self.to_node_id == *id
    }

    pub fn touches_any(&self, ids: &HashSet<NodeId>) -> bool {
        ids.contains(&self.from_node_id) || ids.contains(&self.to_node_id)
    }
}

/// Result of a search: matched and connected nodes, the edges between them,
/// and a placeholder path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Placeholder for future path finding: holds only the first seed's id.
    pub path: Vec<NodeId>,
}

impl GraphSnapshot {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.path.is_empty()
    }

    pub fn node_ids(&self) -> HashSet<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }
}

/// Node ids reachable from a seed set, plus the edges that reached them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub connected_node_ids: HashSet<NodeId>,
    pub edges: Vec<Edge>,
}

impl Neighborhood {
    pub fn is_empty(&self) -> bool {
        self.connected_node_ids.is_empty() && self.edges.is_empty()
    }
}
