//! Article editor core
//!
//! Holds the draft, the loading flag and the error list for the
//! "new article" form, independent of how the form is drawn.

pub mod form;
pub mod reducer;

use thiserror::Error;

pub use form::{ArticleEditor, Navigator, SubmitReport, SubmitRequest};
pub use reducer::{reduce, reduce_all, DraftAction};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Unhandled action: {0}")]
    UnhandledAction(String),

    #[error("Malformed action '{0}', expected KIND=VALUE")]
    MalformedAction(String),

    #[error("You need to sign in to publish an article")]
    NotSignedIn,

    #[error("An article is already being published")]
    SubmitInProgress,
}
