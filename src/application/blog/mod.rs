//! Blog feature state: the post list, the post being edited and a loading flag.

pub mod action;
mod reducer;
mod state;
mod store;

pub use action::{Action, Fulfilled, Rejection, Request, RequestId, RequestMeta};
pub use reducer::reduce;
pub use state::BlogState;
pub use store::BlogStore;
