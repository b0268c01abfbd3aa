//! schemaform - terminal form schema editor
//!
//! Edit a JSON form schema on the left and fill in the live form it
//! describes on the right. Valid submissions go to a JSON lines file.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use schemaform::{app::App, config::TuiConfig, schema, ui};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Route tracing output to the log file; the terminal belongs to the UI
fn init_logging() {
    let file = TuiConfig::log_path().and_then(|path| {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "schemaform=info".into());

    match file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let mut startup_errors = Vec::new();
    let config = TuiConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Failed to load config: {err:#}");
        startup_errors.push(format!("Config ignored: {err:#}"));
        TuiConfig::default()
    });
    let initial_text = config.initial_schema().unwrap_or_else(|err| {
        tracing::warn!("Failed to read initial schema: {err:#}");
        startup_errors.push(format!("{err:#}. Loaded the sample schema instead."));
        schema::SAMPLE_SCHEMA.to_string()
    });

    let mut app = App::new(&config, &initial_text, config.build_sink());
    for message in startup_errors {
        app.state.push_error(message);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("Exited with error: {err:#}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let height = terminal.size()?.height;
        app.state
            .editor
            .scroll_to_cursor(ui::editor_text_height(height));

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key).await?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
