//! Store wiring the reducer to the posts API.
//!
//! Each asynchronous operation dispatches `pending`, awaits the HTTP call (or
//! its cancellation token) and then dispatches `fulfilled` or `rejected`.
//! The state lives in a single `watch` sender, so every reducer run is
//! serialized and subscribers observe each resulting state.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use blogkit_api_types::{Post, PostDraft, PostId};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::application::error::BlogError;
use crate::config::ApiSettings;
use crate::infra::http::{ApiError, HttpPostsApi, PostsApi};

use super::action::{Action, Fulfilled, Rejection, Request, RequestId, RequestMeta};
use super::reducer::reduce;
use super::state::BlogState;

const TARGET: &str = "blogkit::blog";

#[derive(Clone)]
pub struct BlogStore {
    api: Arc<dyn PostsApi>,
    state: Arc<watch::Sender<BlogState>>,
}

impl fmt::Debug for BlogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlogStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl BlogStore {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self::with_state(api, BlogState::default())
    }

    pub fn with_state(api: Arc<dyn PostsApi>, initial: BlogState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Store backed by [`HttpPostsApi`] for the configured endpoint.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        let api = HttpPostsApi::from_settings(settings)?;
        Ok(Self::new(Arc::new(api)))
    }

    pub fn snapshot(&self) -> BlogState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every dispatched action.
    pub fn subscribe(&self) -> watch::Receiver<BlogState> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, action: &Action) {
        trace!(
            target: TARGET,
            action = %action.type_name(),
            request_id = ?action.meta().map(|meta| meta.request_id),
            "dispatch"
        );
        self.state.send_modify(|state| reduce(state, action));
    }

    /// `blog/getPostList`: replace the list with the server's.
    pub async fn get_post_list(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Post>, BlogError> {
        self.run(
            Request::GetPostList,
            cancel,
            self.api.list_posts(),
            |posts| Fulfilled::PostListLoaded(posts.clone()),
            BlogError::Api,
        )
        .await
    }

    /// `blog/addPost`: create a post and append the stored version.
    pub async fn add_post(
        &self,
        draft: PostDraft,
        cancel: &CancellationToken,
    ) -> Result<Post, BlogError> {
        let request = Request::AddPost {
            draft: draft.clone(),
        };
        self.run(
            request,
            cancel,
            self.api.create_post(&draft),
            |post| Fulfilled::PostAdded(post.clone()),
            BlogError::from_mutation,
        )
        .await
    }

    /// `blog/updatePost`: replace a post and leave edit mode.
    pub async fn update_post(
        &self,
        post_id: impl Into<PostId>,
        body: Post,
        cancel: &CancellationToken,
    ) -> Result<Post, BlogError> {
        let post_id = post_id.into();
        let request = Request::UpdatePost {
            post_id: post_id.clone(),
            body: body.clone(),
        };
        self.run(
            request,
            cancel,
            self.api.update_post(&post_id, &body),
            |post| Fulfilled::PostUpdated(post.clone()),
            BlogError::from_mutation,
        )
        .await
    }

    /// `blog/deletePost`
    pub async fn delete_post(
        &self,
        post_id: impl Into<PostId>,
        cancel: &CancellationToken,
    ) -> Result<(), BlogError> {
        let post_id = post_id.into();
        let request = Request::DeletePost {
            post_id: post_id.clone(),
        };
        self.run(
            request,
            cancel,
            self.api.delete_post(&post_id),
            |_| Fulfilled::PostDeleted,
            BlogError::Api,
        )
        .await
    }

    /// `blog/startEditingPost`
    pub fn start_editing_post(&self, post_id: impl Into<PostId>) {
        self.dispatch(&Action::StartEditingPost(post_id.into()));
    }

    /// `blog/cancelEditingPost`
    pub fn cancel_editing_post(&self) {
        self.dispatch(&Action::CancelEditingPost);
    }

    async fn run<T, F>(
        &self,
        request: Request,
        cancel: &CancellationToken,
        call: F,
        fulfil: impl FnOnce(&T) -> Fulfilled,
        map_err: impl FnOnce(ApiError) -> BlogError,
    ) -> Result<T, BlogError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let in_flight = InFlight::start(self, request);

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(BlogError::Aborted),
            result = call => result.map_err(map_err),
        };

        match outcome {
            Ok(value) => {
                in_flight.fulfil(fulfil(&value));
                Ok(value)
            }
            Err(err) => {
                match &err {
                    BlogError::Api(api_err) => warn!(
                        target: TARGET,
                        request_id = %in_flight.request_id,
                        status = ?api_err.status_code(),
                        error = %api_err,
                        "request failed"
                    ),
                    BlogError::Validation(_) | BlogError::Aborted => debug!(
                        target: TARGET,
                        request_id = %in_flight.request_id,
                        error = %err,
                        "request rejected"
                    ),
                }
                in_flight.reject(&err);
                Err(err)
            }
        }
    }
}

/// An operation between its `pending` and settled actions. Dropping it
/// unsettled (the caller abandoned the future) settles it as aborted.
struct InFlight<'a> {
    store: &'a BlogStore,
    request_id: RequestId,
    meta: Option<RequestMeta>,
}

impl<'a> InFlight<'a> {
    fn start(store: &'a BlogStore, request: Request) -> Self {
        let meta = RequestMeta::new(request);
        store.dispatch(&Action::Pending(meta.clone()));
        Self {
            store,
            request_id: meta.request_id,
            meta: Some(meta),
        }
    }

    fn fulfil(mut self, fulfilled: Fulfilled) {
        if let Some(meta) = self.meta.take() {
            self.store.dispatch(&Action::Fulfilled(meta, fulfilled));
        }
    }

    fn reject(mut self, err: &BlogError) {
        if let Some(meta) = self.meta.take() {
            self.store.dispatch(&Action::Rejected(meta, Rejection::from(err)));
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(meta) = self.meta.take() {
            debug!(
                target: TARGET,
                request_id = %meta.request_id,
                "operation dropped before settling"
            );
            self.store.dispatch(&Action::Rejected(meta, Rejection::Aborted));
        }
    }
}
