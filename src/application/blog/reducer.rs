use crate::domain::posts::{find_post, remove_post, replace_post};

use super::action::{Action, Fulfilled, Request, RequestMeta};
use super::state::BlogState;

/// Apply one action to the state.
///
/// Case handlers run first; the shared lifecycle handling (loading flag and
/// request id bookkeeping) runs after them for pending and settled actions.
pub fn reduce(state: &mut BlogState, action: &Action) {
    match action {
        Action::StartEditingPost(post_id) => {
            state.editing_post = find_post(&state.post_list, post_id).cloned();
        }
        Action::CancelEditingPost => state.editing_post = None,
        Action::Pending(meta) => {
            state.loading = true;
            state.current_request_id = Some(meta.request_id);
        }
        Action::Fulfilled(meta, fulfilled) => {
            apply_fulfilled(state, meta, fulfilled);
            settle(state, meta);
        }
        Action::Rejected(meta, _) => settle(state, meta),
    }
}

fn apply_fulfilled(state: &mut BlogState, meta: &RequestMeta, fulfilled: &Fulfilled) {
    match fulfilled {
        Fulfilled::PostListLoaded(posts) => state.post_list = posts.clone(),
        Fulfilled::PostAdded(post) => state.post_list.push(post.clone()),
        Fulfilled::PostUpdated(post) => {
            replace_post(&mut state.post_list, post.clone());
            state.editing_post = None;
        }
        Fulfilled::PostDeleted => {
            if let Request::DeletePost { post_id } = &meta.request {
                remove_post(&mut state.post_list, post_id);
            }
        }
    }
}

// A settlement only clears the flag it set itself; a newer pending request keeps it.
fn settle(state: &mut BlogState, meta: &RequestMeta) {
    if state.loading && state.current_request_id == Some(meta.request_id) {
        state.loading = false;
        state.current_request_id = None;
    }
}
