//! blogkit: client-side state for a blog feature.
//!
//! A [`BlogStore`] keeps the post list, the post being edited and a loading
//! flag in sync with a REST backend exposing `posts` endpoints.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;

use std::path::Path;

use tracing::info;

pub use application::blog::{BlogState, BlogStore};
pub use application::error::{BlogError, ValidationRejection};
pub use blogkit_api_types::{Post, PostBody, PostDraft, PostId};

use crate::config::{Settings, SettingsOverrides};
use crate::infra::{error::InfraError, telemetry};

/// Load settings, install the tracing subscriber and build an HTTP-backed store.
pub fn bootstrap(
    config_file: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<(Settings, BlogStore), InfraError> {
    let settings = crate::config::load(config_file, overrides)?;
    telemetry::init(&settings.logging)?;
    let store = BlogStore::from_settings(&settings.api)?;
    info!(
        target: "blogkit::bootstrap",
        base_url = %settings.api.base_url,
        timeout_secs = settings.api.timeout.as_secs(),
        "blog store ready"
    );
    Ok((settings, store))
}
