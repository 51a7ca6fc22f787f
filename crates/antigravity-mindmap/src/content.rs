//! Per-node side panel content: links, comments, videos and an AI summary.

use serde::{Deserialize, Serialize};

use crate::error::{MindMapError, MindMapResult};

fn required(field: &str, value: &str) -> MindMapResult<String> {
    match value.trim() {
        "" => Err(MindMapError::InvalidContent(format!("{} is required", field))),
        trimmed => Ok(trimmed.to_string()),
    }
}

/// True for absolute `http://` or `https://` URLs, scheme matched case-insensitively.
pub fn is_http_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len())
}

fn http_url(field: &str, value: &str) -> MindMapResult<String> {
    let url = required(field, value)?;
    if !is_http_url(&url) {
        return Err(MindMapError::InvalidContent(format!(
            "{} must start with http:// or https://",
            field
        )));
    }
    Ok(url)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub title: String,
    pub url: String,
}

impl LinkItem {
    /// Trimmed link; both fields required and the URL must be http(s).
    pub fn new(title: &str, url: &str) -> MindMapResult<Self> {
        Ok(Self {
            title: required("Link title", title)?,
            url: http_url("Link URL", url)?,
        })
    }

    pub fn validate(&self) -> MindMapResult<()> {
        Self::new(&self.title, &self.url).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentItem {
    pub user: String,
    pub text: String,
}

impl CommentItem {
    pub fn new(user: &str, text: &str) -> MindMapResult<Self> {
        Ok(Self {
            user: required("Comment user", user)?,
            text: required("Comment text", text)?,
        })
    }

    pub fn validate(&self) -> MindMapResult<()> {
        Self::new(&self.user, &self.text).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    pub title: String,
    pub url: String,
}

impl VideoItem {
    pub fn new(title: &str, url: &str) -> MindMapResult<Self> {
        Ok(Self {
            title: required("Video title", title)?,
            url: http_url("Video URL", url)?,
        })
    }

    pub fn validate(&self) -> MindMapResult<()> {
        Self::new(&self.title, &self.url).map(|_| ())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeContent {
    pub links: Vec<LinkItem>,
    pub comments: Vec<CommentItem>,
    pub videos: Vec<VideoItem>,
    /// Placeholder summary text
    pub ai: String,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<VideoItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<String>,
}

impl ContentPatch {
    pub fn links(links: Vec<LinkItem>) -> Self {
        Self {
            links: Some(links),
            ..Self::default()
        }
    }

    pub fn comments(comments: Vec<CommentItem>) -> Self {
        Self {
            comments: Some(comments),
            ..Self::default()
        }
    }

    pub fn videos(videos: Vec<VideoItem>) -> Self {
        Self {
            videos: Some(videos),
            ..Self::default()
        }
    }

    pub fn ai(ai: impl Into<String>) -> Self {
        Self {
            ai: Some(ai.into()),
            ..Self::default()
        }
    }

    /// Checks every item the patch would store.
    pub fn validate(&self) -> MindMapResult<()> {
        for link in self.links.iter().flatten() {
            link.validate()?;
        }
        for comment in self.comments.iter().flatten() {
            comment.validate()?;
        }
        for video in self.videos.iter().flatten() {
            video.validate()?;
        }
        Ok(())
    }

    pub fn apply_to(self, content: &mut NodeContent) {
        if let Some(links) = self.links {
            content.links = links;
        }
        if let Some(comments) = self.comments {
            content.comments = comments;
        }
        if let Some(videos) = self.videos {
            content.videos = videos;
        }
        if let Some(ai) = self.ai {
            content.ai = ai;
        }
    }
}

pub fn ai_placeholder(label: &str) -> String {
    format!("AI summary for “{}”: Placeholder text here…", label)
}

/// Mock content a node starts with the first time it is opened.
pub fn initial_content(label: &str) -> NodeContent {
    NodeContent {
        links: vec![
            LinkItem {
                title: "Example Guide".to_string(),
                url: "https://example.com/guide".to_string(),
            },
            LinkItem {
                title: "Community Thread".to_string(),
                url: "https://example.com/forum".to_string(),
            },
        ],
        comments: vec![
            CommentItem {
                user: "Ava".to_string(),
                text: format!("I like the “{}” option.", label),
            },
            CommentItem {
                user: "Ben".to_string(),
                text: "Beware of marketing claims.".to_string(),
            },
        ],
        videos: vec![VideoItem {
            title: "YouTube: Deep Dive".to_string(),
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        }],
        ai: ai_placeholder(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_content_mentions_label() {
        let content = initial_content("Grain-free");
        assert_eq!(content.links.len(), 2);
        assert_eq!(content.comments[0].text, "I like the “Grain-free” option.");
        assert_eq!(content.ai, "AI summary for “Grain-free”: Placeholder text here…");
        assert_eq!(content.videos[0].url, "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut content = initial_content("Dry");
        ContentPatch::comments(vec![]).apply_to(&mut content);

        assert!(content.comments.is_empty());
        assert_eq!(content.links.len(), 2);
        assert_eq!(content.ai, ai_placeholder("Dry"));
    }

    #[test]
    fn test_link_is_trimmed() {
        let link = LinkItem::new("  Vet advice ", " HTTPS://example.com/vet ").unwrap();
        assert_eq!(link.title, "Vet advice");
        assert_eq!(link.url, "HTTPS://example.com/vet");
    }

    #[test]
    fn test_items_reject_blank_fields() {
        assert!(matches!(
            LinkItem::new("   ", "https://example.com"),
            Err(MindMapError::InvalidContent(_))
        ));
        assert!(matches!(
            CommentItem::new("Ava", "\t "),
            Err(MindMapError::InvalidContent(_))
        ));
        assert!(matches!(
            CommentItem::new("", "Nice"),
            Err(MindMapError::InvalidContent(_))
        ));
        assert!(matches!(
            VideoItem::new("Clip", ""),
            Err(MindMapError::InvalidContent(_))
        ));
    }

    #[test]
    fn test_urls_must_be_http() {
        for url in ["javascript:alert(1)", "ftp://example.com", "example.com", "https://"] {
            assert!(!is_http_url(url), "{}", url);
            assert!(LinkItem::new("Guide", url).is_err(), "{}", url);
            assert!(VideoItem::new("Clip", url).is_err(), "{}", url);
        }
        assert!(is_http_url("http://example.com"));
        assert!(is_http_url("Https://youtu.be/x"));
    }

    #[test]
    fn test_patch_validate_rejects_bad_items() {
        let patch = ContentPatch::links(vec![LinkItem {
            title: "  ".into(),
            url: "javascript:alert(1)".into(),
        }]);
        assert!(matches!(patch.validate(), Err(MindMapError::InvalidContent(_))));
        assert!(ContentPatch::ai("Anything").validate().is_ok());
        assert!(ContentPatch::comments(vec![]).validate().is_ok());
    }

    #[test]
    fn test_patch_deserializes_partial_json() {
        let patch: ContentPatch = serde_json::from_str(r#"{"ai": "Custom"}"#).unwrap();
        assert_eq!(patch, ContentPatch::ai("Custom"));
    }
}
