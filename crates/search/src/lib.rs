//! Block extraction and keyword search for tips.

mod block;
mod engine;
mod matcher;
mod state;

pub use block::{Block, BlockCollection, Document, HEADING_DELIMITER, parse_blocks};
pub use engine::{Highlighter, SearchEngine, search};
pub use matcher::{MatchSet, SearchMatch};
pub use state::{SearchState, SessionEvent, Transition};
