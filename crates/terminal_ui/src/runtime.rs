use std::io::{self, Stderr};

use anyhow::{Context, Result};
use crossterm::{
    cursor, event,
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::LevelFilter;
use ratatui::{Terminal, backend::CrosstermBackend};
use tips_search::{BlockCollection, Document};

use crate::render::Palette;
use crate::session::{EventSource, Session, SessionOutcome};

/// Exclusive hold on the controlling terminal for one interactive session.
///
/// Entering switches to raw mode and the alternate screen on stderr, so
/// stdout stays free for the emitted block. Dropping restores the original
/// mode on every path out of the session, unwinding included. Logging is
/// muted while the session is active.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    saved_log_level: LevelFilter,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw terminal mode")?;

        let terminal = match Self::setup() {
            Ok(terminal) => terminal,
            Err(err) => {
                restore_terminal();
                return Err(err);
            }
        };

        let saved_log_level = log::max_level();
        log::set_max_level(LevelFilter::Off);

        Ok(Self {
            terminal,
            saved_log_level,
        })
    }

    fn setup() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen, cursor::Hide)
            .context("failed to enter the alternate screen")?;
        let terminal =
            Terminal::new(CrosstermBackend::new(stderr)).context("failed to set up terminal")?;
        Ok(terminal)
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stderr>> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        restore_terminal();
        log::set_max_level(self.saved_log_level);
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stderr(), LeaveAlternateScreen, cursor::Show);
}

/// Blocking reads from the real terminal.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<Event> {
        event::read().context("failed to read terminal input")
    }
}

/// Runs an interactive search over `documents` on the controlling terminal.
pub fn run_interactive(documents: &[Document], palette: Palette) -> Result<SessionOutcome> {
    let collection = BlockCollection::from_documents(documents);
    let mut session = Session::new(collection.blocks(), palette);

    let mut tty = TerminalSession::enter()?;
    let outcome = session.run(tty.terminal_mut(), &mut CrosstermEvents);
    drop(tty);

    if let Ok(outcome) = &outcome {
        log::debug!("interactive session ended: {outcome:?}");
    }
    outcome
}
