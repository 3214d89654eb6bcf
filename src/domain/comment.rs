// src/domain/comment.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::ADMIN_AUTHOR;

/// Server-assigned comment key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment as the server last reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub image: Option<String>,
    pub date: DateTime<Utc>,
}

impl Comment {
    /// Image URL, if the server holds a non-empty one.
    pub fn avatar(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub text: String,
    pub author: String,
    pub likes: u64,
    pub image: String,
}

impl NewComment {
    pub fn from_admin(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: ADMIN_AUTHOR.to_string(),
            likes: 0,
            image: String::new(),
        }
    }
}

/// Body of a partial update; only the text is ever sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentPatch {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_django_payload_when_deserializing_then_reads_all_fields() {
        let value = json!({
            "id": 7,
            "author": "Admin",
            "text": "hello",
            "date": "2024-05-01T10:30:00.123456Z",
            "likes": 3,
            "image": "https://example.com/a.png"
        });

        let comment: Comment = serde_json::from_value(value).expect("valid comment");

        assert_eq!(comment.id, CommentId(7));
        assert_eq!(comment.likes, 3);
        assert_eq!(comment.avatar(), Some("https://example.com/a.png"));
    }

    #[test]
    fn given_empty_or_null_image_when_reading_avatar_then_returns_none() {
        for image in [json!(""), json!(null)] {
            let comment: Comment = serde_json::from_value(json!({
                "id": 1,
                "author": "Admin",
                "text": "x",
                "date": "2024-05-01T10:30:00Z",
                "image": image
            }))
            .expect("valid comment");
            assert_eq!(comment.avatar(), None);
            assert_eq!(comment.likes, 0);
        }
    }

    #[test]
    fn given_text_when_building_admin_comment_then_uses_fixed_identity() {
        let body = serde_json::to_value(NewComment::from_admin("hi")).unwrap();
        assert_eq!(
            body,
            json!({"text": "hi", "author": "Admin", "likes": 0, "image": ""})
        );
    }

    #[test]
    fn given_patch_when_serializing_then_contains_only_text() {
        let body = serde_json::to_value(CommentPatch {
            text: "changed".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"text": "changed"}));
    }
}
