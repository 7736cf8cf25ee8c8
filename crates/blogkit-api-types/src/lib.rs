//! Request and response shapes exchanged with the posts endpoints.
//!
//! The backend owns the field set of a post. Fields the client knows about
//! are typed; anything else is kept in [`PostBody::extra`] so that a post read
//! from the server can be written back without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned to a post by the backend.
pub type PostId = String;

/// A stored post as returned by `GET posts` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(flatten)]
    pub body: PostBody,
}

/// Post fields without the identifier. Used as the create payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub published: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `POST posts`.
pub type PostDraft = PostBody;

impl Post {
    pub fn new(id: impl Into<PostId>, body: PostBody) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }
}

impl PostBody {
    /// Convenience constructor for the common title/description pair.
    pub fn titled(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_uses_camel_case_wire_names() {
        let post = Post::new(
            "p1",
            PostBody {
                featured_image: "https://img/1.png".into(),
                publish_date: "2024-01-02T10:00".into(),
                ..PostBody::titled("Hello", "First")
            },
        );
        let value = serde_json::to_value(&post).expect("serialize");
        assert_eq!(value["id"], "p1");
        assert_eq!(value["featuredImage"], "https://img/1.png");
        assert_eq!(value["publishDate"], "2024-01-02T10:00");
        assert_eq!(value["published"], false);
    }

    #[test]
    fn unknown_backend_fields_survive_a_round_trip() {
        let raw = json!({
            "id": "p9",
            "title": "T",
            "description": "D",
            "featuredImage": "",
            "publishDate": "",
            "published": true,
            "authorId": 42
        });
        let post: Post = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(post.body.extra.get("authorId"), Some(&json!(42)));
        assert_eq!(serde_json::to_value(&post).expect("serialize"), raw);
    }

    #[test]
    fn missing_optional_fields_default() {
        let post: Post = serde_json::from_value(json!({"id": "p2", "title": "only"}))
            .expect("deserialize");
        assert_eq!(post.body.title, "only");
        assert!(post.body.description.is_empty());
        assert!(!post.body.published);
        assert!(post.body.extra.is_empty());
    }
}
