//! Application layer: the blog state container and its error types.

pub mod blog;
pub mod error;
