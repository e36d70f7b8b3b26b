use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use crate::api::ArticleApi;
use crate::editor::{ArticleEditor, DraftAction, EditorError, Navigator, SubmitReport};
use crate::models::CurrentUser;

#[derive(Parser)]
#[command(name = "conduit-editor")]
#[command(about = "Write and publish articles to a Conduit (RealWorld) API from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the API, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file holding the signed-in user
    #[arg(long, global = true)]
    pub user_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Publish an article without opening the editor
    Publish(PublishArgs),
}

#[derive(Args, Debug, Default)]
pub struct PublishArgs {
    /// Article title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// What the article is about
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Markdown body
    #[arg(short, long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the markdown body from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Tag to attach; may be repeated
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Extra draft action as KIND=VALUE (SET_TITLE, SET_DESCRIPTION,
    /// SET_BODY, ADD_TAG, REMOVE_TAG); applied after the other flags
    #[arg(long = "action")]
    pub actions: Vec<String>,
}

impl PublishArgs {
    /// Build the actions that turn an empty draft into the requested one.
    /// Fails without producing any actions if one of them cannot be parsed.
    pub fn draft_actions(&self) -> Result<Vec<DraftAction>> {
        let body = match (&self.body, &self.body_file) {
            (Some(body), _) => body.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read body file: {}", path.display()))?,
            (None, None) => String::new(),
        };

        let mut actions = vec![
            DraftAction::SetTitle(self.title.clone()),
            DraftAction::SetDescription(self.description.clone()),
            DraftAction::SetBody(body),
        ];
        actions.extend(self.tags.iter().cloned().map(DraftAction::AddTag));

        for raw in &self.actions {
            let action: DraftAction = raw
                .parse()
                .with_context(|| format!("Invalid --action '{}'", raw))?;
            actions.push(action);
        }

        Ok(actions)
    }
}

/// Records the navigation request; the CLI has nowhere to go but reports it
#[derive(Debug, Default)]
struct ExitNavigator {
    went_home: bool,
}

impl Navigator for ExitNavigator {
    fn navigate_home(&mut self) {
        self.went_home = true;
    }
}

/// Publish from command line arguments. Returns whether the article was created.
pub async fn publish(
    args: &PublishArgs,
    api: &dyn ArticleApi,
    current_user: Option<CurrentUser>,
) -> Result<bool> {
    let actions = args.draft_actions()?;

    let mut editor = ArticleEditor::new(current_user);
    editor.dispatch_all(actions);

    let mut navigator = ExitNavigator::default();
    let report = match editor.submit(api, &mut navigator).await {
        Ok(report) => report,
        Err(EditorError::NotSignedIn) => {
            error!("Publish refused: no signed-in user");
            eprintln!("{}", EditorError::NotSignedIn);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    match report {
        SubmitReport::Published(article) => {
            info!("Published {} (navigated home: {})", article.slug, navigator.went_home);
            println!("Published \"{}\"", article.title);
            println!("  slug: {}", article.slug);
            if !article.tag_list.is_empty() {
                println!("  tags: {}", article.tag_list.join(", "));
            }
            Ok(true)
        }
        SubmitReport::Rejected | SubmitReport::Failed => {
            eprintln!("Article was not published:");
            for message in editor.errors() {
                eprintln!("  - {}", message);
            }
            Ok(false)
        }
    }
}
