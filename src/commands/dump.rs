use std::io::Write;

use anyhow::{Context, Result};
use tips_search::Document;

/// Streams every document unchanged, in order.
pub fn run<W: Write>(documents: &[Document], out: &mut W) -> Result<()> {
    for doc in documents {
        out.write_all(doc.text.as_bytes())
            .with_context(|| format!("failed to write {}", doc.source))?;
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_are_written_verbatim() {
        let docs = vec![
            Document::new("a.md", "# A\n##one\n"),
            Document::new("b.md", "##two"),
        ];
        let mut out = Vec::new();
        run(&docs, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# A\n##one\n##two");
    }

    #[test]
    fn no_documents_write_nothing() {
        let mut out = Vec::new();
        run(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
