use std::io::Write;

use anyhow::Result;
use tips_search::Document;
use tips_terminal_ui::{Palette, SessionOutcome};

pub mod dump;
pub mod interactive;
pub mod list_files;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print every document verbatim.
    Dump,
    /// Incremental search; the confirmed block is the output.
    Interactive,
}

/// Runs `mode` over already-loaded documents.
///
/// Dump mode writes to `out` and yields `None`. Interactive mode takes over the
/// terminal and yields how the session ended.
pub fn run<W: Write>(
    documents: &[Document],
    mode: Mode,
    palette: Palette,
    out: &mut W,
) -> Result<Option<SessionOutcome>> {
    match mode {
        Mode::Dump => {
            dump::run(documents, out)?;
            Ok(None)
        }
        Mode::Interactive => interactive::run(documents, palette).map(Some),
    }
}
