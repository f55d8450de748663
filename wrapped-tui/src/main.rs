mod app;
mod config;
mod keys;
mod log_buffer;
mod ui;

use std::time::{Duration, Instant};

use app::{App, Confirm, Screen};
use config::Config;
use keys::Action;
use log_buffer::{LogBuffer, LogBufferLayer};
use wrapped_core as wc;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// A terminal client for the Spotify Wrapper backend.
#[derive(Parser)]
struct Args {
    /// Override the backend base URL from the config file.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Create log buffer for TUI display instead of stdout.
    let log_buffer = LogBuffer::new();

    // Also log to a file for debugging.
    let log_file = std::fs::File::create("wrapped-tui.log")?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(LogBufferLayer::new(log_buffer.clone()))
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wrapped=info")),
        )
        .init();

    let config = Config::load();
    let base_url = args
        .base_url
        .unwrap_or_else(|| config.server.base_url.clone());

    let logic = wc::Logic::new(wc::LogicArgs {
        base_url,
        history_path: None,
    });

    let mut app = App::new(config, logic, log_buffer);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(app.config.general.tick_rate_ms);
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.config.save();

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            app.needs_redraw = false;
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            // Process the first event, then drain all remaining queued events.
            let mut process_event = |evt: Event, app: &mut App| match evt {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key_event(app, &key);
                    app.needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    app.needs_redraw = true;
                }
                _ => {}
            };

            process_event(event::read()?, app);
            while event::poll(Duration::ZERO)? {
                process_event(event::read()?, app);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: &event::KeyEvent) {
    // A pending confirmation swallows all input.
    if let Some(confirm) = app.confirm {
        if keys::confirm_action(key) == Action::Select {
            match confirm {
                Confirm::Quit => app.should_quit = true,
                Confirm::DeleteAccount => app.logic.delete_account(),
                Confirm::DeleteWrap(id) => app.logic.delete_wrap(id),
            }
        }
        app.confirm = None;
        return;
    }

    match app.screen {
        Screen::Login => {
            if let Some(action) = keys::form_action(key) {
                ui::forms::handle_login_key(app, action);
            }
        }
        Screen::Register => {
            if let Some(action) = keys::form_action(key) {
                ui::forms::handle_register_key(app, action);
            }
        }
        Screen::Dashboard => {
            // Code entry needs raw character input.
            let action = if app.dashboard.entering_code {
                keys::form_action(key)
            } else {
                keys::dashboard_action(key)
            };
            if let Some(action) = action {
                ui::dashboard::handle_key(app, action);
            }
        }
        Screen::Wrapped => {
            if let Some(action) = keys::slides_action(key) {
                ui::slides::handle_key(app, action);
            }
        }
        Screen::History => {
            if let Some(action) = keys::history_action(key) {
                ui::history::handle_key(app, action);
            }
        }
        Screen::Logs => {
            if let Some(action) = keys::logs_action(key) {
                ui::logs::handle_key(app, action);
            }
        }
    }
}
