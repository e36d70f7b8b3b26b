//! Event handling for the editor TUI

use crate::api::ApiError;
use crate::models::CreateOutcome;

/// Events delivered to the app from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A create-article request finished
    SubmitFinished(Result<CreateOutcome, ApiError>),
}
