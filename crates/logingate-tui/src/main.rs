//! logingate - a terminal login form with attempt lockout.
//!
//! The form accepts one configured credential. Every mismatch costs an
//! attempt and the account locks when they run out, until the form is reset.

mod app;
mod prompt;
mod ui;
mod utils;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logingate_core::config::APP_NAME;
use logingate_core::{GateConfig, LoginGate, LoginOutcome};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 250;

/// Log file name inside the cache directory
const LOG_FILE: &str = "logingate.log";

const USAGE: &str = "\
Usage: logingate [OPTIONS]

Options:
  --prompt    Log in with line prompts instead of the full-screen form
  -h, --help  Print this help

Environment:
  LOGINGATE_USERNAME      Accepted username (default: admin)
  LOGINGATE_PASSWORD      Accepted password (default: 1234)
  LOGINGATE_MAX_ATTEMPTS  Failed attempts before lockout (default: 5)
  RUST_LOG                Log filter (default: warn)";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr, for line mode
fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a file, so log lines do not draw over the full-screen form.
/// The returned guard must be held until exit to flush the writer.
fn init_tracing_file() -> Result<WorkerGuard> {
    let log_dir = dirs::cache_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

/// Config file, then environment overrides
fn load_gate() -> Result<LoginGate> {
    let mut config = GateConfig::load()?;
    config.apply_env()?;
    let gate = LoginGate::new(config).context("Invalid login configuration")?;
    Ok(gate)
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }
    if let Some(unknown) = args.iter().find(|a| a.as_str() != "--prompt") {
        eprintln!("Unknown option: {}\n\n{}", unknown, USAGE);
        std::process::exit(2);
    }

    if args.iter().any(|a| a == "--prompt") {
        init_tracing_stderr();
        let mut gate = load_gate()?;
        let outcome = prompt::run(&mut gate)?;
        if outcome == LoginOutcome::Locked {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Initialize logging
    let _log_guard = init_tracing_file()?;
    info!("logingate starting");

    let gate = load_gate()?;
    let mut app = App::new(gate);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("logingate shutting down");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll with a timeout so the lock screen's elapsed time keeps updating
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
