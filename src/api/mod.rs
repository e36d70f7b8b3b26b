//! Conduit REST API access
//!
//! The editor only depends on [`ArticleApi`]; [`ConduitClient`] is the
//! reqwest-backed implementation used by the binary.

pub mod client;
pub mod errors;

use async_trait::async_trait;

use crate::models::{CreateOutcome, Draft};

pub use client::{flatten_errors, ConduitClient};
pub use errors::ApiError;

/// Article creation as seen by the editor
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// Create an article from `draft` on behalf of the user owning `token`.
    ///
    /// Server-side validation failures come back as
    /// [`CreateOutcome::Rejected`]; only transport and decoding problems are
    /// reported as `Err`.
    async fn create_article(&self, draft: &Draft, token: &str) -> Result<CreateOutcome, ApiError>;
}
