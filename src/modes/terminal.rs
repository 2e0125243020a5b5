use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

/// Raw-mode, alternate-screen terminal that is restored when dropped
///
/// Dropping happens on every exit path out of the game loop, errors and
/// panics included.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl TerminalSession {
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        match Self::enter() {
            Ok(terminal) => {
                tracing::debug!("terminal acquired");
                Ok(Self { terminal })
            }
            Err(err) => {
                restore();
                Err(err)
            }
        }
    }

    fn enter() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stderr>> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
        tracing::debug!("terminal restored");
    }
}

fn restore() {
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(stderr(), LeaveAlternateScreen, cursor::Show) {
        tracing::warn!(%err, "failed to leave alternate screen");
    }
}
