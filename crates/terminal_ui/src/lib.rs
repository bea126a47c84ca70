mod layout;
mod render;
mod runtime;
mod session;

pub use layout::{MatchEntry, PageLayout, PlacedBlock, RESERVED_LINES, lines_needed};
pub use render::{Palette, View, draw, highlighted_line, render, separator_line};
pub use runtime::{CrosstermEvents, TerminalSession, run_interactive};
pub use session::{EventSource, Session, SessionOutcome, keystroke_to_input};

pub use ratatui::style::Color;
