use blogkit_api_types::Post;
use serde::Serialize;

use crate::domain::posts::find_post;

use super::action::RequestId;

/// View state of the blog feature. Mutated only by [`super::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogState {
    pub(crate) post_list: Vec<Post>,
    pub(crate) editing_post: Option<Post>,
    pub(crate) loading: bool,
    pub(crate) current_request_id: Option<RequestId>,
}

impl BlogState {
    /// State seeded with an existing list, e.g. one restored by the host application.
    pub fn with_posts(post_list: Vec<Post>) -> Self {
        Self {
            post_list,
            ..Self::default()
        }
    }

    pub fn post_list(&self) -> &[Post] {
        &self.post_list
    }

    pub fn editing_post(&self) -> Option<&Post> {
        self.editing_post.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn current_request_id(&self) -> Option<RequestId> {
        self.current_request_id
    }

    pub fn find_post(&self, post_id: &str) -> Option<&Post> {
        find_post(&self.post_list, post_id)
    }
}

#[cfg(test)]
mod tests {
    use blogkit_api_types::PostBody;

    use super::*;

    #[test]
    fn find_post_returns_first_match_by_id() {
        let state = BlogState::with_posts(vec![
            Post::new("a", PostBody::titled("first", "")),
            Post::new("a", PostBody::titled("shadowed", "")),
            Post::new("b", PostBody::titled("second", "")),
        ]);
        assert_eq!(
            state.find_post("a").map(|p| p.body.title.as_str()),
            Some("first")
        );
        assert_eq!(state.find_post("b").map(|p| p.id.as_str()), Some("b"));
        assert!(state.find_post("missing").is_none());
        assert!(!state.loading());
        assert!(state.editing_post().is_none());
    }
}
