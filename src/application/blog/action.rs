//! Actions understood by the blog reducer.
//!
//! Asynchronous operations go through a `pending` action followed by exactly
//! one `fulfilled` or `rejected` action sharing the same [`RequestMeta`].
//! Type names follow the `blog/<operation>/<phase>` convention so that
//! lifecycle phases can be recognised by suffix.

use std::fmt;

use blogkit_api_types::{Post, PostDraft, PostId};
use serde::Serialize;
use uuid::Uuid;

use crate::application::error::{BlogError, ValidationRejection};

pub const SLICE: &str = "blog";

/// Identifier of one asynchronous operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The asynchronous operation and the argument it was started with.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    GetPostList,
    AddPost { draft: PostDraft },
    UpdatePost { post_id: PostId, body: Post },
    DeletePost { post_id: PostId },
}

impl Request {
    pub fn type_prefix(&self) -> &'static str {
        match self {
            Self::GetPostList => "blog/getPostList",
            Self::AddPost { .. } => "blog/addPost",
            Self::UpdatePost { .. } => "blog/updatePost",
            Self::DeletePost { .. } => "blog/deletePost",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestMeta {
    pub request_id: RequestId,
    pub request: Request,
}

impl RequestMeta {
    pub fn new(request: Request) -> Self {
        Self {
            request_id: RequestId::new(),
            request,
        }
    }
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Fulfilled {
    PostListLoaded(Vec<Post>),
    PostAdded(Post),
    PostUpdated(Post),
    /// The deleted id is read from the request, not from the response.
    PostDeleted,
}

/// Why an operation settled as rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Validation(ValidationRejection),
    Aborted,
    Failed { messages: Vec<String> },
}

impl From<&BlogError> for Rejection {
    fn from(err: &BlogError) -> Self {
        match err {
            BlogError::Validation(rejection) => Self::Validation(rejection.clone()),
            BlogError::Aborted => Self::Aborted,
            BlogError::Api(_) => Self::Failed {
                messages: err.messages(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Pending(RequestMeta),
    Fulfilled(RequestMeta, Fulfilled),
    Rejected(RequestMeta, Rejection),
    StartEditingPost(PostId),
    CancelEditingPost,
}

impl Action {
    pub fn type_name(&self) -> String {
        match self {
            Self::Pending(meta) => format!("{}/pending", meta.request.type_prefix()),
            Self::Fulfilled(meta, _) => format!("{}/fulfilled", meta.request.type_prefix()),
            Self::Rejected(meta, _) => format!("{}/rejected", meta.request.type_prefix()),
            Self::StartEditingPost(_) => format!("{SLICE}/startEditingPost"),
            Self::CancelEditingPost => format!("{SLICE}/cancelEditingPost"),
        }
    }

    pub fn meta(&self) -> Option<&RequestMeta> {
        match self {
            Self::Pending(meta) | Self::Fulfilled(meta, _) | Self::Rejected(meta, _) => Some(meta),
            Self::StartEditingPost(_) | Self::CancelEditingPost => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_follow_slice_convention() {
        let meta = RequestMeta::new(Request::DeletePost {
            post_id: "p1".into(),
        });
        assert_eq!(
            Action::Pending(meta.clone()).type_name(),
            "blog/deletePost/pending"
        );
        assert_eq!(
            Action::Fulfilled(meta.clone(), Fulfilled::PostDeleted).type_name(),
            "blog/deletePost/fulfilled"
        );
        assert_eq!(
            Action::Rejected(meta, Rejection::Aborted).type_name(),
            "blog/deletePost/rejected"
        );
        assert_eq!(
            Action::StartEditingPost("p1".into()).type_name(),
            "blog/startEditingPost"
        );
        assert_eq!(Action::CancelEditingPost.type_name(), "blog/cancelEditingPost");
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }
}
