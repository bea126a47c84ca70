/// A highlighted span on one line of a block. Columns are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl SearchMatch {
    pub fn new(line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            line,
            start_col,
            end_col,
        }
    }
}

/// Blocks that satisfy the current query, as indices into the block
/// collection, in collection order.
///
/// Ranks run from 0 (first matching block in collection order) to `count - 1`.
/// The session's active index counts the other way round, from the last rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    indices: Vec<usize>,
}

impl MatchSet {
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Collection index of the block at `rank`.
    pub fn get(&self, rank: usize) -> Option<usize> {
        self.indices.get(rank).copied()
    }

    /// Rank selected by `active_index`.
    ///
    /// Index 0 selects the last rank; indices past the end clamp to rank 0
    /// instead of failing.
    pub fn active_rank(&self, active_index: usize) -> Option<usize> {
        if self.indices.is_empty() {
            return None;
        }
        Some(
            self.indices
                .len()
                .saturating_sub(1)
                .saturating_sub(active_index),
        )
    }

    /// Collection index of the block selected by `active_index`.
    pub fn active(&self, active_index: usize) -> Option<usize> {
        self.active_rank(active_index).and_then(|rank| self.get(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_has_no_active() {
        let set = MatchSet::default();
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
        assert!(set.active_rank(0).is_none());
        assert!(set.active(3).is_none());
    }

    #[test]
    fn test_active_index_counts_from_last_rank() {
        let set = MatchSet::from_indices(vec![2, 5, 9]);
        assert_eq!(set.active_rank(0), Some(2));
        assert_eq!(set.active(0), Some(9));
        assert_eq!(set.active(1), Some(5));
        assert_eq!(set.active(2), Some(2));
    }

    #[test]
    fn test_active_index_past_end_clamps_to_first_rank() {
        let set = MatchSet::from_indices(vec![0, 1]);
        assert_eq!(set.active_rank(2), Some(0));
        assert_eq!(set.active_rank(100), Some(0));
        assert_eq!(set.active(100), Some(0));
    }
}
