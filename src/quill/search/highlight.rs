use super::SearchMatch;

/// Receives highlight transitions from a [`super::SearchEngine`]
///
/// The engine calls these after its state changed. Styling, scrolling and clearing
/// the view are up to the host; every method defaults to doing nothing.
pub trait HighlightObserver {
    /// A new match list replaced the previous one
    fn matches_changed(&mut self, _matches: &[SearchMatch]) {}

    /// The cursor moved to `current`
    fn current_changed(&mut self, _current: SearchMatch) {}

    /// All search highlighting should be removed
    fn highlights_cleared(&mut self) {}
}

/// Observer for hosts without a view
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHighlight;

impl HighlightObserver for NoHighlight {}

/// Observer that traces highlight transitions to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHighlight;

impl HighlightObserver for LogHighlight {
    fn matches_changed(&mut self, matches: &[SearchMatch]) {
        log::debug!("Highlighting {} search matches", matches.len());
    }

    fn current_changed(&mut self, current: SearchMatch) {
        log::debug!(
            "Current match at characters {}..{}",
            current.start,
            current.end
        );
    }

    fn highlights_cleared(&mut self) {
        log::debug!("Search highlights cleared");
    }
}
