use regex::{Regex, RegexBuilder};

use crate::block::Block;
use crate::matcher::{MatchSet, SearchMatch};

/// Finds the spans of a line where any keyword occurs.
///
/// Used only for emphasis; whether a block is shown is decided by
/// [`SearchEngine::is_match`].
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    any_of: Option<Regex>,
}

impl Highlighter {
    pub fn search_line(&self, line_idx: usize, text: &str) -> Vec<SearchMatch> {
        let Some(regex) = &self.any_of else {
            return Vec::new();
        };

        regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| SearchMatch::new(line_idx, m.start(), m.end()))
            .collect()
    }
}

/// Keyword search over blocks.
///
/// Keywords are regex fragments, not literals: `a.c` also matches `abc`.
pub struct SearchEngine {
    pattern: String,
    /// `None` when some keyword could not be compiled at all; nothing matches then.
    all_of: Option<Vec<Regex>>,
    highlighter: Highlighter,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            pattern: String::new(),
            all_of: Some(Vec::new()),
            highlighter: Highlighter::default(),
        }
    }

    pub fn set_pattern(&mut self, pattern: &str) {
        if pattern == self.pattern {
            return;
        }

        self.pattern = pattern.to_string();

        let keywords: Vec<&str> = pattern.split_whitespace().collect();

        self.all_of = keywords.iter().map(|keyword| keyword_regex(keyword)).collect();

        self.highlighter = if keywords.is_empty() {
            Highlighter::default()
        } else {
            let alternation = keywords
                .iter()
                .map(|keyword| format!("(?:{})", usable_fragment(keyword)))
                .collect::<Vec<_>>()
                .join("|");
            Highlighter {
                any_of: compile(&alternation, false),
            }
        };
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// True when every keyword occurs somewhere in `text`, line breaks included.
    pub fn is_match(&self, text: &str) -> bool {
        self.all_of
            .as_ref()
            .is_some_and(|all_of| all_of.iter().all(|regex| regex.is_match(text)))
    }

    pub fn filter(&self, blocks: &[Block]) -> MatchSet {
        let indices = blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| self.is_match(&block.content))
            .map(|(idx, _)| idx)
            .collect();
        MatchSet::from_indices(indices)
    }
}

/// One-shot search: the blocks matching `query` and the highlighter for it.
pub fn search(blocks: &[Block], query: &str) -> (MatchSet, Highlighter) {
    let mut engine = SearchEngine::new();
    engine.set_pattern(query);
    let matches = engine.filter(blocks);
    (matches, engine.highlighter)
}

/// Keeps the keyword as a pattern when it compiles, otherwise matches it literally.
fn usable_fragment(keyword: &str) -> String {
    match Regex::new(keyword) {
        Ok(_) => keyword.to_string(),
        Err(err) => {
            log::debug!("keyword {keyword:?} is not a valid pattern ({err}), matching literally");
            regex::escape(keyword)
        }
    }
}

/// Regex deciding whether a block contains `keyword`, falling back to the
/// literal keyword when the pattern does not build.
fn keyword_regex(keyword: &str) -> Option<Regex> {
    compile(keyword, true).or_else(|| compile(&regex::escape(keyword), true))
}

fn compile(pattern: &str, across_lines: bool) -> Option<Regex> {
    match RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(across_lines)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(err) => {
            log::warn!("failed to compile search pattern {pattern:?}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::parse_blocks;

    fn blocks(text: &str) -> Vec<Block> {
        parse_blocks("test.md", text)
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let blocks = blocks("##one\n##two\n##three");
        let (matches, highlighter) = search(&blocks, "");
        assert_eq!(matches.indices(), &[0, 1, 2]);
        assert!(highlighter.search_line(0, "one").is_empty());
    }

    #[test]
    fn test_whitespace_only_pattern_matches_everything() {
        let blocks = blocks("##one\n##two");
        let (matches, _) = search(&blocks, "   \t ");
        assert_eq!(matches.count(), 2);
    }

    #[test]
    fn test_all_keywords_required() {
        let blocks = blocks("##git rebase\n##git merge\n##cargo rebase");
        let (matches, _) = search(&blocks, "git rebase");
        assert_eq!(matches.indices(), &[0]);
    }

    #[test]
    fn test_case_insensitive() {
        let blocks = blocks("##Hello World");
        let (matches, _) = search(&blocks, "HELLO world");
        assert_eq!(matches.count(), 1);
    }

    #[test]
    fn test_keywords_match_across_lines() {
        let blocks = blocks("##first line\nsecond line");
        let (matches, _) = search(&blocks, "first second");
        assert_eq!(matches.count(), 1);

        let (matches, _) = search(&blocks, "first.*second");
        assert_eq!(matches.count(), 1);
    }

    #[test]
    fn test_keywords_are_patterns() {
        let blocks = blocks("##abc\n##a.c");
        let (matches, _) = search(&blocks, "a.c");
        assert_eq!(matches.indices(), &[0, 1]);

        let (matches, _) = search(&blocks, r"a\.c");
        assert_eq!(matches.indices(), &[1]);
    }

    #[test]
    fn test_invalid_pattern_matches_literally() {
        let blocks = blocks("##call foo(\n##call foo");
        let (matches, highlighter) = search(&blocks, "foo(");
        assert_eq!(matches.indices(), &[0]);
        let spans = highlighter.search_line(0, "call foo(");
        assert_eq!(spans, vec![SearchMatch::new(0, 5, 9)]);
    }

    #[test]
    fn test_preserves_collection_order() {
        let blocks = blocks("##b key\n##a\n##c key\n##key d");
        let (matches, _) = search(&blocks, "key");
        assert_eq!(matches.indices(), &[0, 2, 3]);
    }

    #[test]
    fn test_no_blocks() {
        let (matches, _) = search(&[], "anything");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_is_idempotent() {
        let blocks = blocks("##alpha beta\n##beta\n##gamma alpha");
        let mut engine = SearchEngine::new();
        engine.set_pattern("alpha");
        let first = engine.filter(&blocks);
        let second = engine.filter(&blocks);
        assert_eq!(first, second);
        assert_eq!(search(&blocks, "alpha").0, first);
    }

    #[test]
    fn test_highlight_uses_any_keyword() {
        let mut engine = SearchEngine::new();
        engine.set_pattern("foo bar");
        let matches = engine.highlighter().search_line(3, "foo only, then BAR");
        assert_eq!(
            matches,
            vec![SearchMatch::new(3, 0, 3), SearchMatch::new(3, 15, 18)]
        );
        // The block would not match, but the line still gets spans.
        assert!(!engine.is_match("foo only"));
    }

    #[test]
    fn test_highlight_spans_do_not_overlap() {
        let mut engine = SearchEngine::new();
        engine.set_pattern("aa a");
        let spans = engine.highlighter().search_line(0, "aaa");
        assert_eq!(spans, vec![SearchMatch::new(0, 0, 2), SearchMatch::new(0, 2, 3)]);
    }

    #[test]
    fn test_highlight_skips_empty_matches() {
        let mut engine = SearchEngine::new();
        engine.set_pattern("x*");
        assert!(engine.highlighter().search_line(0, "abc").is_empty());
        assert_eq!(
            engine.highlighter().search_line(0, "axxb"),
            vec![SearchMatch::new(0, 1, 3)]
        );
    }

    #[test]
    fn test_set_pattern_replaces_keywords() {
        let mut engine = SearchEngine::new();
        engine.set_pattern("one two");
        assert!(engine.is_match("two and one"));
        assert!(!engine.is_match("one only"));
        engine.set_pattern("one two");
        assert!(!engine.is_match("one only"));
        engine.set_pattern("");
        assert!(engine.is_match("anything"));
    }

    #[test]
    fn test_keyword_regex_falls_back_to_literal() {
        let regex = keyword_regex("foo(").unwrap();
        assert!(regex.is_match("call FOO("));
        assert!(!regex.is_match("call foo"));

        let regex = keyword_regex("a.c").unwrap();
        assert!(regex.is_match("abc"));
    }

    #[test]
    fn test_invalid_keyword_never_widens_the_filter() {
        let blocks = blocks("##foo( bar\n##bar only");
        let (matches, _) = search(&blocks, "bar foo( [z-a");
        assert!(matches.is_empty());
        let (matches, _) = search(&blocks, "bar foo(");
        assert_eq!(matches.indices(), &[0]);
    }

    #[test]
    fn test_unicode_search() {
        let blocks = blocks("##Hello \u{1F600} World");
        let (matches, highlighter) = search(&blocks, "\u{1F600}");
        assert_eq!(matches.count(), 1);
        assert_eq!(highlighter.search_line(0, "Hello \u{1F600}").len(), 1);
    }
}
