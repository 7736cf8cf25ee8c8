//! HTTP collaborator for the posts endpoints.

mod client;
mod error;

pub use client::{HttpPostsApi, PostsApi};
pub use error::ApiError;
