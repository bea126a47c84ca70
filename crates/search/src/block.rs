/// Literal that starts a second-level markdown heading; every block begins at one.
pub const HEADING_DELIMITER: &str = "##";

/// A loaded tips file: where it came from and its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source: String,
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// One heading-delimited snippet of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Text after the delimiter, up to (not including) the next one.
    pub content: String,
    pub source: String,
    /// Position within the owning document, starting at 0.
    pub index: usize,
}

impl Block {
    /// Raw text as it appeared in the document, delimiter included.
    pub fn raw_text(&self) -> String {
        format!("{}{}", HEADING_DELIMITER, self.content)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}

/// Splits `text` into blocks along [`HEADING_DELIMITER`].
///
/// Whatever precedes the first delimiter is a preamble and is skipped, so a
/// document without any delimiter produces no blocks. Empty segments, which
/// come from consecutive or trailing delimiters, are dropped without consuming
/// a sequence index.
pub fn parse_blocks(source: &str, text: &str) -> Vec<Block> {
    text.split(HEADING_DELIMITER)
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| Block {
            content: segment.to_string(),
            source: source.to_string(),
            index,
        })
        .collect()
}

/// Every block of every document, in load order. Built once per session.
#[derive(Debug, Clone, Default)]
pub struct BlockCollection {
    blocks: Vec<Block>,
}

impl BlockCollection {
    pub fn from_documents(documents: &[Document]) -> Self {
        let blocks: Vec<Block> = documents
            .iter()
            .flat_map(|doc| parse_blocks(&doc.source, &doc.text))
            .collect();
        log::debug!(
            "parsed {} blocks from {} documents",
            blocks.len(),
            documents.len()
        );
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
