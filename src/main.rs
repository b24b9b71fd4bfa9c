use std::io;

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use evote::config::AppConfig;
use evote::core::logging::{self, AppError};
use evote::tui::app::AppState;
use evote::tui::services::Services;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = logging::init_tui(&config.log_dir());
    log::info!("{} v{} starting", evote::NAME, evote::VERSION);

    // Setup terminal
    let mut terminal = setup_terminal().map_err(AppError::terminal)?;

    // Run the app
    let tick_rate = config.tui.tick_rate();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::new(config, event_tx);
    let mut app = AppState::new(event_rx, services);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    restore_terminal(&mut terminal).map_err(AppError::terminal)?;

    result.map_err(|e| {
        log::error!("Event loop failed: {e}");
        AppError::terminal(e)
    })?;

    log::info!(
        "{} exiting (completed: {})",
        evote::NAME,
        app.controller.is_completed()
    );
    Ok(())
}

/// Enter raw mode and the alternate screen. A partial setup is undone
/// before the error is returned.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let setup = execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)
        .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));
    if setup.is_err() {
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    setup
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}
