// TUI module for the interactive chat interface
mod app;
mod events;
mod layout;
mod rendering;

use std::io;

use anyhow::Result;
pub use app::App;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::client::ChatBackend;
use crate::session::Session;

/// Run the interactive chat TUI over the given backend.
///
/// Must be called from within a tokio runtime; dispatches are spawned onto
/// it while the UI loop keeps polling the terminal.
pub fn run_interactive<B>(session: Session, backend: B) -> Result<()>
where
    B: ChatBackend + Send + Sync + 'static,
{
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    // Create app state
    let mut app = App::new(session, backend);

    // Run event loop
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
