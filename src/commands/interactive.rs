use std::io::Write;

use anyhow::Result;
use tips_search::Document;
use tips_terminal_ui::{Palette, SessionOutcome, run_interactive};

pub fn run(documents: &[Document], palette: Palette) -> Result<SessionOutcome> {
    run_interactive(documents, palette)
}

/// Prints the confirmed block followed by a newline; prints nothing otherwise.
pub fn emit<W: Write>(outcome: &SessionOutcome, out: &mut W) -> Result<()> {
    if let SessionOutcome::Confirmed(Some(text)) = outcome {
        writeln!(out, "{text}")?;
        out.flush()?;
    }
    Ok(())
}
