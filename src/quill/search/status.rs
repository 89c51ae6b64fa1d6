use std::fmt;

/// Status line of the find panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// Nothing searched yet
    #[default]
    Idle,
    Found(usize),
    NoMatches,
    /// `index` is 0-based, displayed 1-based
    Current { index: usize, total: usize },
    ReplacedAll,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Idle => write!(f, "Enter search term"),
            SearchStatus::Found(count) => write!(f, "Found {} matches", count),
            SearchStatus::NoMatches => write!(f, "No matches found"),
            SearchStatus::Current { index, total } => {
                write!(f, "Match {} of {}", index + 1, total)
            }
            SearchStatus::ReplacedAll => write!(f, "Replaced all matches"),
        }
    }
}
