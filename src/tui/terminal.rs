//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::path::PathBuf;

use crate::config::TokenStore;
use crate::host::HostShell;
use crate::services::LedgerService;

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_key_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard until the user quits
pub fn run_tui(
    ledger: LedgerService,
    local: Option<PathBuf>,
    tokens: TokenStore,
    host: Box<dyn HostShell>,
) -> Result<()> {
    let events = EventHandler::default();
    let mut app = App::new(ledger, local, tokens, host, events.sender());

    let mut terminal = init_terminal()?;
    tracing::info!(host = app.host.name(), "dashboard started");

    let result = run_loop(&mut terminal, &mut app, &events);

    restore_terminal()?;
    result
}

fn run_loop(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    // Draw once before the first load, which may wait on the network
    terminal.draw(|frame| super::views::render(frame, app))?;
    app.reload_month();

    loop {
        terminal.draw(|frame| super::views::render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Task(outcome) => app.apply_task(outcome),
            Event::Tick => app.on_tick(),
            Event::Resize(_, _) => {
                // Terminal will redraw automatically
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
