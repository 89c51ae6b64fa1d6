//! In-document find and replace.
//!
//! The [`SearchEngine`] keeps the match list and the current-match cursor for one
//! search session. It never holds on to the document: every operation receives the
//! text it works on and hands back the new text when it edits.

pub mod highlight;
pub mod position;
pub mod replace;
pub mod status;

use std::fmt;

use serde::{Deserialize, Serialize};

use highlight::{HighlightObserver, NoHighlight};

/// A half-open `[start, end)` range of character offsets within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub start: usize,
    pub end: usize,
}

impl SearchMatch {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Direction of a cursor move through the match list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Options a host can persist alongside its own configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub case_sensitive: bool,
}

/// State of one search session
///
/// `matches` is always sorted by `start`. `current_index` is `None` when no match is
/// selected, otherwise it indexes into `matches`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub case_sensitive: bool,
    pub matches: Vec<SearchMatch>,
    pub current_index: Option<usize>,
}

impl SearchState {
    /// The match under the cursor, if any
    pub fn current_match(&self) -> Option<SearchMatch> {
        self.current_index
            .and_then(|index| self.matches.get(index).copied())
    }

    fn reset(&mut self) {
        self.matches.clear();
        self.current_index = None;
    }
}

/// Fold a character for comparison
///
/// Characters whose lowercase form is more than one character are compared as-is so
/// that one document character always maps to one folded character and offsets stay
/// aligned with the original text.
fn fold_char(c: char, match_case: bool) -> char {
    if match_case {
        return c;
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Find all matches in the text
///
/// The scan restarts one character after the start of every hit, so a query that
/// overlaps itself is reported at every position it occurs: `"aa"` in `"aaa"` yields
/// `[0, 2)` and `[1, 3)`.
///
/// ### Arguments
/// - `text`: The text to search in
/// - `query`: The search query
/// - `match_case`: Whether to match case
///
/// ### Returns
/// - `Vec<SearchMatch>`: The matches in document order, empty when `query` is empty
pub fn find_matches(text: &str, query: &str, match_case: bool) -> Vec<SearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }
    let search_text: Vec<char> = text.chars().map(|c| fold_char(c, match_case)).collect();
    let search_query: Vec<char> = query.chars().map(|c| fold_char(c, match_case)).collect();
    let query_len = search_query.len();
    search_text
        .windows(query_len)
        .enumerate()
        .filter(|(_, window)| *window == search_query.as_slice())
        .map(|(start, _)| SearchMatch::new(start, start + query_len))
        .collect()
}

/// Find/replace engine for a single search session
pub struct SearchEngine {
    state: SearchState,
    observer: Box<dyn HighlightObserver>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    /// Create an engine that does not report highlight changes
    pub fn new() -> Self {
        Self::with_observer(Box::new(NoHighlight))
    }

    /// Create an engine reporting highlight changes to `observer`
    ///
    /// ### Arguments
    /// - `observer`: The host's highlight renderer
    pub fn with_observer(observer: Box<dyn HighlightObserver>) -> Self {
        Self {
            state: SearchState::default(),
            observer,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.state.matches
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    /// Search the whole document and replace the match list
    ///
    /// An empty `term` is not a search: the state is left untouched and an empty slice
    /// is returned. Otherwise the cursor is reset and the observer receives the new list.
    ///
    /// ### Arguments
    /// - `document`: Snapshot of the document text
    /// - `term`: The search term
    /// - `case_sensitive`: Whether to match case
    ///
    /// ### Returns
    /// - `&[SearchMatch]`: The matches in document order
    pub fn find_all(&mut self, document: &str, term: &str, case_sensitive: bool) -> &[SearchMatch] {
        if term.is_empty() {
            return &[];
        }
        self.state.term = term.to_string();
        self.state.case_sensitive = case_sensitive;
        self.state.matches = find_matches(document, term, case_sensitive);
        self.state.current_index = None;
        log::debug!(
            "Search for {:?} (case sensitive: {}) found {} matches",
            term,
            case_sensitive,
            self.state.matches.len()
        );
        self.observer.matches_changed(&self.state.matches);
        &self.state.matches
    }

    /// Move the cursor and return the match it lands on
    ///
    /// The cursor wraps in both directions. With no current match the cursor behaves
    /// as if it sat at `-1`, so `Next` selects the first match.
    ///
    /// ### Arguments
    /// - `direction`: Which way to move
    ///
    /// ### Returns
    /// - `Some(SearchMatch)`: The new current match
    /// - `None`: If there are no matches
    pub fn advance(&mut self, direction: Direction) -> Option<SearchMatch> {
        let count = self.state.matches.len();
        if count == 0 {
            return None;
        }
        let current = self.state.current_index.map_or(-1, |index| index as isize);
        let step = match direction {
            Direction::Next => 1,
            Direction::Previous => -1,
        };
        let index = (current + step).rem_euclid(count as isize) as usize;
        self.state.current_index = Some(index);
        let search_match = self.state.matches[index];
        self.observer.current_changed(search_match);
        Some(search_match)
    }

    /// Replace the current match and search the new text again
    ///
    /// The match list is rebuilt from scratch with the same term and case setting
    /// rather than shifting offsets, and the cursor is reset.
    ///
    /// ### Arguments
    /// - `document`: The document the matches were found in
    /// - `replacement`: The text to put in place of the current match
    ///
    /// ### Returns
    /// - `Some(String)`: The updated document
    /// - `None`: If there is no current match
    pub fn replace_current(&mut self, document: &str, replacement: &str) -> Option<String> {
        let search_match = self.state.current_match()?;
        let new_text = replace::replace_range(document, search_match, replacement);
        let term = std::mem::take(&mut self.state.term);
        let case_sensitive = self.state.case_sensitive;
        self.find_all(&new_text, &term, case_sensitive);
        Some(new_text)
    }

    /// Replace every occurrence of `term` in one pass
    ///
    /// The replacement is inserted literally; in case-insensitive mode it keeps its
    /// own casing. Afterwards the session is cleared.
    ///
    /// ### Arguments
    /// - `document`: The document text
    /// - `term`: The search term
    /// - `replacement`: The replacement text
    /// - `case_sensitive`: Whether to match case
    ///
    /// ### Returns
    /// - `String`: The updated document, unchanged when `term` is empty
    pub fn replace_all(
        &mut self,
        document: &str,
        term: &str,
        replacement: &str,
        case_sensitive: bool,
    ) -> String {
        if term.is_empty() {
            return document.to_string();
        }
        let new_text = replace::replace_all(document, term, replacement, case_sensitive);
        self.clear();
        new_text
    }

    /// Drop all matches and ask the host to remove highlighting
    pub fn clear(&mut self) {
        self.state.reset();
        self.observer.highlights_cleared();
    }
}
