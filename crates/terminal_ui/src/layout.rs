use tips_search::{Block, MatchSet};

/// Rows above the first block: the query prompt and that block's separator.
pub const RESERVED_LINES: usize = 2;

/// Per-frame render state of one matched block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEntry {
    /// Position among the current matches, in collection order.
    pub rank: usize,
    /// Index into the block collection.
    pub block: usize,
    /// Content lines plus the separator line.
    pub lines_needed: usize,
    /// Row of the block's first content line if every match were stacked
    /// below the prompt, highest rank on top.
    pub line_offset: usize,
    pub page: usize,
}

/// A block positioned on screen. `top` is the separator row; it is 0 or
/// negative when the stack was shifted up to fit the active block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBlock {
    pub block: usize,
    pub top: i64,
    pub lines_needed: usize,
    pub active: bool,
}

/// Splits the current matches into pages of `rows` lines and picks the page
/// holding the active match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    entries: Vec<MatchEntry>,
    active_rank: Option<usize>,
    visible_page: Option<usize>,
}

pub fn lines_needed(block: &Block) -> usize {
    block.line_count() + 1
}

impl PageLayout {
    pub fn compute(blocks: &[Block], matches: &MatchSet, active_index: usize, rows: usize) -> Self {
        let needed: Vec<usize> = matches
            .indices()
            .iter()
            .map(|&idx| blocks.get(idx).map(lines_needed).unwrap_or(1))
            .collect();

        let page_height = rows.max(1);
        let mut entries = Vec::with_capacity(needed.len());
        let mut below = 0;
        for rank in (0..needed.len()).rev() {
            let line_offset = below + RESERVED_LINES;
            entries.push(MatchEntry {
                rank,
                block: matches.indices()[rank],
                lines_needed: needed[rank],
                line_offset,
                page: line_offset / page_height,
            });
            below += needed[rank];
        }
        entries.reverse();

        let active_rank = matches.active_rank(active_index);
        let visible_page = if rows == 0 {
            None
        } else {
            active_rank.map(|rank| entries[rank].page)
        };

        Self {
            entries,
            active_rank,
            visible_page,
        }
    }

    /// Entries indexed by rank.
    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    pub fn active_rank(&self) -> Option<usize> {
        self.active_rank
    }

    pub fn visible_page(&self) -> Option<usize> {
        self.visible_page
    }

    /// Entries on the visible page, top of the screen first.
    pub fn visible(&self) -> Vec<MatchEntry> {
        let Some(page) = self.visible_page else {
            return Vec::new();
        };
        self.entries
            .iter()
            .rev()
            .filter(|entry| entry.page == page)
            .copied()
            .collect()
    }

    /// Screen rows of the visible blocks for a frame `rows` high.
    ///
    /// Blocks stack downward from the row under the prompt. When the active
    /// block would run past the last row, the whole stack moves up until it
    /// ends there, but never so far that its first content line leaves row 1.
    /// The separator may then sit under the prompt.
    pub fn place(&self, rows: usize) -> Vec<PlacedBlock> {
        let mut placed = Vec::new();
        let mut top: i64 = 1;
        for entry in self.visible() {
            placed.push(PlacedBlock {
                block: entry.block,
                top,
                lines_needed: entry.lines_needed,
                active: Some(entry.rank) == self.active_rank,
            });
            top += entry.lines_needed as i64;
        }

        if let Some(active) = placed.iter().find(|p| p.active) {
            let last_row = rows as i64 - 1;
            let bottom = active.top + active.lines_needed as i64 - 1;
            let shift = (bottom - last_row).min(active.top);
            if shift > 0 {
                for block in &mut placed {
                    block.top -= shift;
                }
            }
        }

        placed
    }
}
