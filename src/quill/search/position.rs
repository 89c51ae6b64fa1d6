use serde::{Deserialize, Serialize};

/// Display position of a character offset
///
/// `line` is 1-based and `column` is 0-based, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Get line and column from a character offset
///
/// ### Arguments
/// - `text`: The text
/// - `offset`: The character offset, clamped to the end of the text
///
/// ### Returns
/// - `Position`: The line and column of the offset
pub fn line_col(text: &str, offset: usize) -> Position {
    let mut line = 1;
    let mut column = 0;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    Position { line, column }
}

#[cfg(test)]
mod tests {
    use super::{Position, line_col};

    #[test]
    fn test_line_col_start() {
        assert_eq!(line_col("hello", 0), Position { line: 1, column: 0 });
    }

    #[test]
    fn test_line_col_multiline() {
        let text = "first\nsecond\nthird";
        assert_eq!(line_col(text, 6), Position { line: 2, column: 0 });
        assert_eq!(line_col(text, 15), Position { line: 3, column: 2 });
    }

    #[test]
    fn test_line_col_counts_characters() {
        assert_eq!(line_col("héllo wörld", 7), Position { line: 1, column: 7 });
    }

    #[test]
    fn test_line_col_past_end() {
        assert_eq!(line_col("ab\nc", 100), Position { line: 2, column: 1 });
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position { line: 3, column: 14 }.to_string(), "3:14");
    }
}
