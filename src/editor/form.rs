use tracing::{debug, error, info, warn};

use crate::api::{ApiError, ArticleApi};
use crate::models::{Article, CreateOutcome, CurrentUser, Draft};

use super::{reduce, reduce_all, DraftAction, EditorError};

/// Where the editor sends the user after a successful publish
pub trait Navigator {
    /// Go to the application root
    fn navigate_home(&mut self);
}

/// Snapshot of everything needed to send one create-article request
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub draft: Draft,
    pub token: String,
}

impl SubmitRequest {
    pub async fn send(&self, api: &dyn ArticleApi) -> Result<CreateOutcome, ApiError> {
        api.create_article(&self.draft, &self.token).await
    }
}

/// How a finished submit ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitReport {
    Published(Article),
    /// The server returned validation messages
    Rejected,
    /// The request never produced a server answer
    Failed,
}

/// State of the "new article" form
#[derive(Debug, Clone, Default)]
pub struct ArticleEditor {
    draft: Draft,
    is_loading: bool,
    errors: Vec<String>,
    current_user: Option<CurrentUser>,
}

impl ArticleEditor {
    pub fn new(current_user: Option<CurrentUser>) -> Self {
        Self {
            current_user,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    pub fn dispatch(&mut self, action: DraftAction) {
        debug!("Dispatching {}", action.kind());
        let draft = std::mem::take(&mut self.draft);
        self.draft = reduce(draft, action);
    }

    /// Apply a batch of actions in order
    pub fn dispatch_all(&mut self, actions: Vec<DraftAction>) {
        debug!("Dispatching {} actions", actions.len());
        let draft = std::mem::take(&mut self.draft);
        self.draft = reduce_all(draft, actions);
    }

    /// Mark the form as loading and snapshot the draft for sending.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, EditorError> {
        if self.is_loading {
            debug!("Ignoring submit while a request is in flight");
            return Err(EditorError::SubmitInProgress);
        }

        let token = match &self.current_user {
            Some(user) => user.token.clone(),
            None => {
                let err = EditorError::NotSignedIn;
                warn!("Submit without a signed-in user");
                self.errors = vec![err.to_string()];
                return Err(err);
            }
        };

        self.is_loading = true;
        Ok(SubmitRequest {
            draft: self.draft.clone(),
            token,
        })
    }

    /// Apply the result of a request started by [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(
        &mut self,
        result: Result<CreateOutcome, ApiError>,
        navigator: &mut dyn Navigator,
    ) -> SubmitReport {
        self.is_loading = false;

        match result {
            Ok(CreateOutcome::Created(article)) => {
                info!("Published article '{}'", article.slug);
                self.errors.clear();
                navigator.navigate_home();
                SubmitReport::Published(article)
            }
            Ok(CreateOutcome::Rejected(messages)) => {
                self.errors = messages;
                SubmitReport::Rejected
            }
            Err(e) => {
                error!("Publishing failed: {}", e);
                self.errors = vec![format!("Unable to reach the server: {}", e)];
                SubmitReport::Failed
            }
        }
    }

    /// Send the draft and wait for the answer.
    pub async fn submit(
        &mut self,
        api: &dyn ArticleApi,
        navigator: &mut dyn Navigator,
    ) -> Result<SubmitReport, EditorError> {
        let request = self.begin_submit()?;
        let result = request.send(api).await;
        Ok(self.finish_submit(result, navigator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct TestArticleApi {
        outcome: Option<CreateOutcome>,
        calls: Arc<Mutex<Vec<(Draft, String)>>>,
    }

    impl TestArticleApi {
        fn returning(outcome: CreateOutcome) -> Self {
            Self {
                outcome: Some(outcome),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn unreachable() -> Self {
            Self {
                outcome: None,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl ArticleApi for TestArticleApi {
        async fn create_article(&self, draft: &Draft, token: &str) -> Result<CreateOutcome, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((draft.clone(), token.to_string()));
            self.outcome
                .clone()
                .ok_or_else(|| ApiError::Config("connection refused".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        home_visits: usize,
    }

    impl Navigator for RecordingNavigator {
        fn navigate_home(&mut self) {
            self.home_visits += 1;
        }
    }

    fn user() -> CurrentUser {
        CurrentUser {
            email: "jake@jake.jake".to_string(),
            username: "jake".to_string(),
            token: "jwt-token".to_string(),
            bio: None,
            image: None,
        }
    }

    fn article() -> Article {
        serde_json::from_value(serde_json::json!({
            "slug": "hello-world",
            "title": "Hello world",
            "description": "first post",
            "body": "hi",
            "tagList": ["intro"],
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z",
            "author": { "username": "jake" }
        }))
        .unwrap()
    }

    fn filled_editor() -> ArticleEditor {
        let mut editor = ArticleEditor::new(Some(user()));
        editor.dispatch(DraftAction::SetTitle("Hello world".to_string()));
        editor.dispatch(DraftAction::SetDescription("first post".to_string()));
        editor.dispatch(DraftAction::SetBody("hi".to_string()));
        editor.dispatch(DraftAction::AddTag("intro".to_string()));
        editor
    }

    #[test]
    fn test_new_editor_is_empty() {
        let editor = ArticleEditor::new(None);
        assert_eq!(editor.draft(), &Draft::default());
        assert!(!editor.is_loading());
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn test_dispatch_all_applies_in_order() {
        let mut editor = ArticleEditor::new(None);
        editor.dispatch_all(vec![
            DraftAction::SetTitle("first".to_string()),
            DraftAction::AddTag("rust".to_string()),
            DraftAction::AddTag("tui".to_string()),
            DraftAction::RemoveTag("rust".to_string()),
            DraftAction::SetTitle("second".to_string()),
        ]);
        assert_eq!(editor.draft().title, "second");
        assert_eq!(editor.draft().tag_list, vec!["tui"]);
    }

    #[tokio::test]
    async fn test_successful_submit_navigates_home() {
        let api = TestArticleApi::returning(CreateOutcome::Created(article()));
        let mut navigator = RecordingNavigator::default();
        let mut editor = filled_editor();

        let report = editor.submit(&api, &mut navigator).await.unwrap();

        assert_eq!(report, SubmitReport::Published(article()));
        assert_eq!(navigator.home_visits, 1);
        assert!(editor.errors().is_empty());
        assert!(!editor.is_loading());

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, *editor.draft());
        assert_eq!(calls[0].1, "jwt-token");
    }

    #[tokio::test]
    async fn test_rejected_submit_shows_errors_and_stays() {
        let api = TestArticleApi::returning(CreateOutcome::Rejected(vec![
            "title can't be blank".to_string(),
        ]));
        let mut navigator = RecordingNavigator::default();
        let mut editor = ArticleEditor::new(Some(user()));

        let report = editor.submit(&api, &mut navigator).await.unwrap();

        assert_eq!(report, SubmitReport::Rejected);
        assert_eq!(navigator.home_visits, 0);
        assert_eq!(editor.errors(), ["title can't be blank".to_string()]);
        assert!(!editor.is_loading());
    }

    #[tokio::test]
    async fn test_errors_are_replaced_on_each_attempt() {
        let mut navigator = RecordingNavigator::default();
        let mut editor = ArticleEditor::new(Some(user()));

        let first = TestArticleApi::returning(CreateOutcome::Rejected(vec![
            "title can't be blank".to_string(),
            "body can't be blank".to_string(),
        ]));
        editor.submit(&first, &mut navigator).await.unwrap();
        assert_eq!(editor.errors().len(), 2);

        editor.dispatch(DraftAction::SetTitle("Now with a title".to_string()));
        let second = TestArticleApi::returning(CreateOutcome::Rejected(vec![
            "body can't be blank".to_string(),
        ]));
        editor.submit(&second, &mut navigator).await.unwrap();
        assert_eq!(editor.errors(), ["body can't be blank".to_string()]);

        let third = TestArticleApi::returning(CreateOutcome::Created(article()));
        editor.submit(&third, &mut navigator).await.unwrap();
        assert!(editor.errors().is_empty());
        assert_eq!(navigator.home_visits, 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_recoverable() {
        let api = TestArticleApi::unreachable();
        let mut navigator = RecordingNavigator::default();
        let mut editor = filled_editor();

        let report = editor.submit(&api, &mut navigator).await.unwrap();

        assert_eq!(report, SubmitReport::Failed);
        assert!(!editor.is_loading());
        assert_eq!(editor.errors().len(), 1);
        assert!(editor.errors()[0].starts_with("Unable to reach the server"));
        assert_eq!(editor.draft().title, "Hello world");
    }

    #[tokio::test]
    async fn test_submit_without_user_does_not_call_api() {
        let api = TestArticleApi::returning(CreateOutcome::Created(article()));
        let mut navigator = RecordingNavigator::default();
        let mut editor = ArticleEditor::new(None);

        let err = editor.submit(&api, &mut navigator).await.unwrap_err();

        assert_eq!(err, EditorError::NotSignedIn);
        assert!(api.calls.lock().unwrap().is_empty());
        assert_eq!(
            editor.errors(),
            ["You need to sign in to publish an article".to_string()]
        );
        assert!(!editor.is_loading());
    }

    #[test]
    fn test_second_begin_submit_is_refused_while_loading() {
        let mut editor = filled_editor();

        let request = editor.begin_submit().unwrap();
        assert!(editor.is_loading());
        assert_eq!(request.draft.title, "Hello world");

        assert_eq!(
            editor.begin_submit().unwrap_err(),
            EditorError::SubmitInProgress
        );

        let mut navigator = RecordingNavigator::default();
        editor.finish_submit(Ok(CreateOutcome::Rejected(vec!["x".to_string()])), &mut navigator);
        assert!(!editor.is_loading());
        assert!(editor.begin_submit().is_ok());
    }

    #[test]
    fn test_draft_edits_during_flight_do_not_change_request() {
        let mut editor = filled_editor();
        let request = editor.begin_submit().unwrap();
        editor.dispatch(DraftAction::SetTitle("edited".to_string()));

        assert_eq!(request.draft.title, "Hello world");
        assert_eq!(editor.draft().title, "edited");
    }
}
