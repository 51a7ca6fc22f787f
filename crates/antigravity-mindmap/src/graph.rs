//! Base mind map derived from a query.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{Taxonomy, DEFAULT_BRANCHES};

/// Id and label of the placeholder shown for an empty query.
pub const ROOT_ID: &str = "root";
pub const ROOT_LABEL: &str = "Try searching…";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindNode {
    pub id: String,
    pub label: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MindEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindGraph {
    pub nodes: Vec<MindNode>,
    pub edges: Vec<MindEdge>,
}

impl MindGraph {
    pub fn find_node(&self, id: &str) -> Option<&MindNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Targets of the edges leaving `parent_id`, in edge order.
    pub fn children_of(&self, parent_id: &str) -> Vec<&MindNode> {
        children_of(self, parent_id)
    }
}

/// Targets of the edges leaving `parent_id`, in edge order. Edges pointing at
/// unknown nodes are skipped.
pub fn children_of<'a>(graph: &'a MindGraph, parent_id: &str) -> Vec<&'a MindNode> {
    graph
        .edges
        .iter()
        .filter(|e| e.from == parent_id)
        .filter_map(|e| graph.find_node(&e.to))
        .collect()
}

/// Upper-cases the first character of every word; the rest is left as is.
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_word = false;
    for c in s.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// Derives the base graph for `query`.
///
/// A blank query yields the single placeholder node. Otherwise the matching
/// taxonomy path becomes a chain `path_{i}_{label}` and every branch
/// `br_{i}_{label}` hangs off the last path node. Unmatched queries use the
/// capitalized query as the only path label and [`DEFAULT_BRANCHES`].
pub fn build_graph_from_query(query: &str, taxonomy: &Taxonomy) -> MindGraph {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return MindGraph {
            nodes: vec![MindNode {
                id: ROOT_ID.to_string(),
                label: ROOT_LABEL.to_string(),
                parent_id: None,
            }],
            edges: Vec::new(),
        };
    }

    let (path, branches) = match taxonomy.lookup(&q) {
        Some(entry) => (entry.path.clone(), entry.branches.clone()),
        None => (
            vec![capitalize_words(&q)],
            DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect(),
        ),
    };

    let mut graph = MindGraph::default();
    let mut parent_id: Option<String> = None;

    for (i, label) in path.into_iter().enumerate() {
        let id = format!("path_{}_{}", i, label);
        if let Some(parent) = &parent_id {
            graph.edges.push(MindEdge {
                from: parent.clone(),
                to: id.clone(),
            });
        }
        graph.nodes.push(MindNode {
            id: id.clone(),
            label,
            parent_id: parent_id.take(),
        });
        parent_id = Some(id);
    }

    // Taxonomy entries always carry a path, so the chain has a last node
    if let Some(last) = parent_id {
        for (i, label) in branches.into_iter().enumerate() {
            let id = format!("br_{}_{}", i, label);
            graph.edges.push(MindEdge {
                from: last.clone(),
                to: id.clone(),
            });
            graph.nodes.push(MindNode {
                id,
                label,
                parent_id: Some(last.clone()),
            });
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(graph: &MindGraph) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_blank_query_yields_placeholder() {
        let graph = build_graph_from_query("   ", &Taxonomy::builtin());
        assert_eq!(ids(&graph), vec![ROOT_ID]);
        assert_eq!(graph.nodes[0].label, ROOT_LABEL);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_known_query_builds_path_and_branches() {
        let graph = build_graph_from_query("Cat Litter", &Taxonomy::builtin());

        assert_eq!(
            ids(&graph),
            vec![
                "path_0_Pets",
                "path_1_Cats",
                "path_2_Litter",
                "br_0_Clumping",
                "br_1_Silica",
                "br_2_Corn-based",
            ]
        );
        assert_eq!(graph.nodes[0].parent_id, None);
        assert_eq!(graph.nodes[1].parent_id.as_deref(), Some("path_0_Pets"));
        assert_eq!(graph.edges.len(), 5);

        let leaves: Vec<_> = graph
            .children_of("path_2_Litter")
            .into_iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(leaves, vec!["Clumping", "Silica", "Corn-based"]);
    }

    #[test]
    fn test_unknown_query_uses_defaults() {
        let graph = build_graph_from_query("garden hose", &Taxonomy::builtin());

        assert_eq!(graph.nodes[0].id, "path_0_Garden Hose");
        assert_eq!(graph.nodes[0].label, "Garden Hose");
        let branches: Vec<_> = graph.nodes[1..].iter().map(|n| n.label.as_str()).collect();
        assert_eq!(branches, vec!["Overview", "Links", "Pros & Cons"]);
        assert!(graph.edges.iter().all(|e| e.from == "path_0_Garden Hose"));
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("best budget laptop"), "Best Budget Laptop");
        assert_eq!(capitalize_words("grain-free food"), "Grain-Free Food");
        assert_eq!(capitalize_words("4k monitor"), "4k Monitor");
    }

    #[test]
    fn test_children_of_skips_missing_targets() {
        let graph = MindGraph {
            nodes: vec![MindNode {
                id: "a".into(),
                label: "A".into(),
                parent_id: None,
            }],
            edges: vec![MindEdge {
                from: "a".into(),
                to: "ghost".into(),
            }],
        };
        assert!(children_of(&graph, "a").is_empty());
    }
}
