use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use conduit_editor::{
    api::ConduitClient,
    cli::{self, Cli, Commands},
    config::Config,
    session::UserStore,
    tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "conduit_editor=info");
    }

    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(user_file) = &cli.user_file {
        config = config.with_user_file(user_file);
    }
    config.validate()?;

    // The terminal UI owns stdout/stderr, so only the CLI logs to the console
    init_logging(&config.log_file, cli.command.is_some());

    let current_user = UserStore::new(&config.user_file)
        .load()
        .with_context(|| "Failed to load the signed-in user")?;
    let client = ConduitClient::new(&config)?;

    match &cli.command {
        Some(Commands::Publish(args)) => {
            info!("Publishing from the command line to {}", config.api_url);
            if !cli::publish(args, &client, current_user).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_tui(config, current_user, client).await,
    }
}

fn init_logging(log_file: &Path, with_console: bool) {
    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "conduit_editor.log".into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let console = with_console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(console)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

async fn run_tui(
    config: Config,
    current_user: Option<conduit_editor::models::CurrentUser>,
    client: ConduitClient,
) -> Result<()> {
    info!("Starting conduit editor TUI against {}", config.api_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, current_user, Arc::new(client));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("Conduit editor exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("Conduit editor encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
