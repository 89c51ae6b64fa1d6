//! Host side of a find & replace session.
//!
//! A [`FindPanel`] holds the inputs of the find bar, drives a [`SearchEngine`] against
//! a [`TextBuffer`] and keeps the status line up to date.

use crate::quill::search::{
    Direction, SearchEngine, SearchMatch, SearchOptions,
    highlight::{HighlightObserver, NoHighlight},
    status::SearchStatus,
};

/// Whole-text access to the buffer being searched
pub trait TextBuffer {
    fn text(&self) -> String;
    fn set_text(&mut self, text: String);
}

impl TextBuffer for String {
    fn text(&self) -> String {
        self.clone()
    }

    fn set_text(&mut self, text: String) {
        *self = text;
    }
}

#[derive(Debug)]
pub struct FindPanel {
    show_search: bool,
    search_input: String,
    replace_input: String,
    options: SearchOptions,
    engine: SearchEngine,
    status: SearchStatus,
}

impl Default for FindPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FindPanel {
    pub fn new() -> Self {
        Self::with_observer(Box::new(NoHighlight))
    }

    /// Create a panel whose highlights are rendered by `observer`
    pub fn with_observer(observer: Box<dyn HighlightObserver>) -> Self {
        Self {
            show_search: false,
            search_input: String::new(),
            replace_input: String::new(),
            options: SearchOptions::default(),
            engine: SearchEngine::with_observer(observer),
            status: SearchStatus::Idle,
        }
    }

    pub fn is_open(&self) -> bool {
        self.show_search
    }

    /// Open the panel with an empty session
    pub fn open(&mut self) {
        if self.show_search {
            return;
        }
        self.show_search = true;
        self.engine.clear();
        self.status = SearchStatus::Idle;
    }

    /// Close the panel, dropping the session and its highlights
    pub fn close(&mut self) {
        self.show_search = false;
        self.engine.clear();
        self.search_input.clear();
        self.replace_input.clear();
        self.status = SearchStatus::Idle;
    }

    pub fn term(&self) -> &str {
        &self.search_input
    }

    pub fn replacement(&self) -> &str {
        &self.replace_input
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn matches(&self) -> &[SearchMatch] {
        self.engine.matches()
    }

    pub fn current_match(&self) -> Option<SearchMatch> {
        self.engine.state().current_match()
    }

    /// Submitting a different term invalidates the current matches
    pub fn set_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_input {
            self.search_input = term;
            self.invalidate();
        }
    }

    pub fn set_replacement(&mut self, replacement: impl Into<String>) {
        self.replace_input = replacement.into();
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        if case_sensitive != self.options.case_sensitive {
            self.options.case_sensitive = case_sensitive;
            self.invalidate();
        }
    }

    /// The buffer was edited outside of a replace, so the offsets are stale
    pub fn text_edited(&mut self) {
        self.invalidate();
    }

    fn invalidate(&mut self) {
        if !self.engine.matches().is_empty() || self.engine.current_index().is_some() {
            self.engine.clear();
        }
        self.status = SearchStatus::Idle;
    }

    /// Find all matches and select the first one
    ///
    /// ### Arguments
    /// - `buffer`: The buffer to search
    ///
    /// ### Returns
    /// - `SearchStatus`: The new status line
    pub fn find_all(&mut self, buffer: &impl TextBuffer) -> SearchStatus {
        if !self.show_search || self.search_input.is_empty() {
            return self.status;
        }
        let text = buffer.text();
        self.engine.clear();
        self.engine
            .find_all(&text, &self.search_input, self.options.case_sensitive);
        self.select_first()
    }

    /// Report a fresh match list and put the cursor on its first entry
    fn select_first(&mut self) -> SearchStatus {
        let count = self.engine.matches().len();
        if count == 0 {
            self.status = SearchStatus::NoMatches;
        } else {
            self.status = SearchStatus::Found(count);
            self.select(Direction::Next);
        }
        self.status
    }

    pub fn next(&mut self) -> Option<SearchMatch> {
        if !self.show_search {
            return None;
        }
        self.select(Direction::Next)
    }

    pub fn previous(&mut self) -> Option<SearchMatch> {
        if !self.show_search {
            return None;
        }
        self.select(Direction::Previous)
    }

    fn select(&mut self, direction: Direction) -> Option<SearchMatch> {
        let search_match = self.engine.advance(direction)?;
        if let Some(index) = self.engine.current_index() {
            self.status = SearchStatus::Current {
                index,
                total: self.engine.matches().len(),
            };
        }
        Some(search_match)
    }

    /// Replace the current match and search again
    ///
    /// ### Arguments
    /// - `buffer`: The buffer holding the current match
    ///
    /// ### Returns
    /// - `true`: If a match was replaced
    /// - `false`: If there was no current match
    pub fn replace(&mut self, buffer: &mut impl TextBuffer) -> bool {
        if !self.show_search {
            return false;
        }
        let text = buffer.text();
        let Some(new_text) = self.engine.replace_current(&text, &self.replace_input) else {
            return false;
        };
        buffer.set_text(new_text);
        // The engine already searched the new text
        self.select_first();
        true
    }

    /// Replace every match in the buffer
    ///
    /// Does nothing unless the last search found something.
    ///
    /// ### Arguments
    /// - `buffer`: The buffer to edit
    ///
    /// ### Returns
    /// - `true`: If the buffer was rewritten
    /// - `false`: If there was nothing to replace
    pub fn replace_all(&mut self, buffer: &mut impl TextBuffer) -> bool {
        if !self.show_search || self.engine.matches().is_empty() || self.search_input.is_empty() {
            return false;
        }
        let text = buffer.text();
        let new_text = self.engine.replace_all(
            &text,
            &self.search_input,
            &self.replace_input,
            self.options.case_sensitive,
        );
        buffer.set_text(new_text);
        self.status = SearchStatus::ReplacedAll;
        true
    }
}
