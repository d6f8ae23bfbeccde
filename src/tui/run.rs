//! Terminal lifecycle around the application loop.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::fields::Filter;
use crate::store::Store;
use crate::tui::app::App;

/// Set up the terminal, run the app, and restore the terminal.
///
/// A final save runs after the terminal is restored so quitting from any
/// screen leaves the file current even if a handler skipped its save.
pub fn run_tui(store: Store, filter: Filter) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, filter);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save_store() {
        tracing::warn!(error = %e, "final save failed");
    }

    result
}
