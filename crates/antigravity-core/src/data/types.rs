//! Enumerated types for the how-to knowledge graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topic category of a Node. Serialized in SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Plumbing,
    Electrical,
    Garden,
    Carpentry,
    Construction,
    General,
    ToolsSafety,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Plumbing,
        Category::Electrical,
        Category::Garden,
        Category::Carpentry,
        Category::Construction,
        Category::General,
        Category::ToolsSafety,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Plumbing => "PLUMBING",
            Category::Electrical => "ELECTRICAL",
            Category::Garden => "GARDEN",
            Category::Carpentry => "CARPENTRY",
            Category::Construction => "CONSTRUCTION",
            Category::General => "GENERAL",
            Category::ToolsSafety => "TOOLS_SAFETY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Kind of a directed relation between two Nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// `to` is a sub-topic of `from`
    Child,
    Related,
    /// `from` must be done before `to`
    Prerequisite,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Child => "CHILD",
            RelationType::Related => "RELATED",
            RelationType::Prerequisite => "PREREQUISITE",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHILD" => Ok(RelationType::Child),
            "RELATED" => Ok(RelationType::Related),
            "PREREQUISITE" => Ok(RelationType::Prerequisite),
            other => Err(UnknownVariant {
                kind: "relation type",
                value: other.to_string(),
            }),
        }
    }
}

/// Returned when a stored enum value cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
