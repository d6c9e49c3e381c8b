//! Terminal view of the metrics figure
//!
//! Best-effort: the PNG on disk is the real artifact, this only shows the
//! same four panels when a terminal is available.

mod events;
mod viewer;

pub use events::{Action, EventHandler};
pub use viewer::Viewer;

use crate::config::DisplayMode;
use crate::error::{ReportError, Result};
use crate::visualization::Panel;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal, Stdout};
use std::path::Path;

fn display_err(err: io::Error) -> ReportError {
    ReportError::Display(err.to_string())
}

/// Whether stdin and stdout are both attached to a terminal
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Resolve a display mode against the current environment
pub fn should_display(mode: DisplayMode, interactive: bool) -> bool {
    match mode {
        DisplayMode::Always => true,
        DisplayMode::Never => false,
        DisplayMode::Auto => interactive,
    }
}

/// Show the panels until the user quits
pub fn run_viewer(panels: &[Panel], output: &Path) -> Result<()> {
    enable_raw_mode().map_err(display_err)?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(display_err(e));
    }

    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(mut terminal) => {
            let result = event_loop(&mut terminal, &Viewer::new(panels, output));
            let restored = restore(&mut terminal);
            result.and(restored)
        }
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            Err(display_err(e))
        }
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, viewer: &Viewer) -> Result<()> {
    let mut events = EventHandler::new();

    terminal.draw(|f| viewer.render(f)).map_err(display_err)?;
    loop {
        match events.next().map_err(display_err)? {
            Action::Quit => break,
            Action::Redraw => {
                terminal.draw(|f| viewer.render(f)).map_err(display_err)?;
            }
            Action::Idle => {}
        }
    }

    Ok(())
}

fn restore(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().map_err(display_err)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(display_err)?;
    terminal.show_cursor().map_err(display_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display() {
        assert!(should_display(DisplayMode::Always, false));
        assert!(!should_display(DisplayMode::Never, true));
        assert!(should_display(DisplayMode::Auto, true));
        assert!(!should_display(DisplayMode::Auto, false));
    }
}
