use regex::{NoExpand, RegexBuilder};

use super::SearchMatch;

/// Convert a character offset into a byte offset, clamped to the end of the text
fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(index, _)| index)
}

/// Replace the characters covered by a match
///
/// ### Arguments
/// - `text`: The text to edit
/// - `search_match`: The character range to replace
/// - `replace`: The replacement text
///
/// ### Returns
/// - `String`: The text with the range replaced
pub fn replace_range(text: &str, search_match: SearchMatch, replace: &str) -> String {
    let start = byte_offset(text, search_match.start);
    let end = byte_offset(text, search_match.end).max(start);
    let mut result = String::with_capacity(text.len() - (end - start) + replace.len());
    result.push_str(&text[..start]);
    result.push_str(replace);
    result.push_str(&text[end..]);
    result
}

/// Replace every occurrence of `query` in a single pass
///
/// Case-insensitive mode matches with an escaped regular expression and inserts
/// `replace` literally, so `$` is not expanded and the casing of the found text is not
/// carried over.
///
/// ### Arguments
/// - `text`: The text to edit
/// - `query`: The text to look for
/// - `replace`: The replacement text
/// - `match_case`: Whether to match case
///
/// ### Returns
/// - `String`: The text with replacements
pub fn replace_all(text: &str, query: &str, replace: &str, match_case: bool) -> String {
    if query.is_empty() {
        return text.to_string();
    }
    if match_case {
        return text.replace(query, replace);
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(text, NoExpand(replace)).into_owned(),
        Err(e) => {
            log::error!("Failed to build replace pattern for {:?}: {}", query, e);
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchMatch, replace_all, replace_range};

    #[test]
    fn test_replace_range_at_start() {
        let result = replace_range("test string", SearchMatch::new(0, 4), "example");
        assert_eq!(result, "example string");
    }

    #[test]
    fn test_replace_range_at_end() {
        let result = replace_range("test string", SearchMatch::new(5, 11), "text");
        assert_eq!(result, "test text");
    }

    #[test]
    fn test_replace_range_empty_replace() {
        let result = replace_range("hello world", SearchMatch::new(0, 5), "");
        assert_eq!(result, " world");
    }

    #[test]
    fn test_replace_range_multibyte() {
        let result = replace_range("naïve café", SearchMatch::new(6, 10), "bar");
        assert_eq!(result, "naïve bar");
    }

    #[test]
    fn test_replace_range_past_end_appends() {
        let result = replace_range("abc", SearchMatch::new(10, 12), "d");
        assert_eq!(result, "abcd");
    }

    #[test]
    fn test_replace_all_case_sensitive() {
        assert_eq!(replace_all("foo Foo FOO", "foo", "bar", true), "bar Foo FOO");
    }

    #[test]
    fn test_replace_all_case_insensitive_keeps_replacement_case() {
        assert_eq!(
            replace_all("Hello hello HELLO", "hello", "Hi", false),
            "Hi Hi Hi"
        );
    }

    #[test]
    fn test_replace_all_escapes_query() {
        assert_eq!(replace_all("a.b axb A.B", "a.b", "c", false), "c axb c");
    }

    #[test]
    fn test_replace_all_replacement_is_literal() {
        assert_eq!(replace_all("price: X", "x", "$1.00", false), "price: $1.00");
    }

    #[test]
    fn test_replace_all_non_overlapping() {
        // Unlike find, replacement consumes each hit before looking again
        assert_eq!(replace_all("aaa", "aa", "b", true), "ba");
        assert_eq!(replace_all("AAA", "aa", "b", false), "bA");
    }

    #[test]
    fn test_replace_all_multiline() {
        assert_eq!(
            replace_all("line\nLINE\nline", "line", "row", false),
            "row\nrow\nrow"
        );
    }

    #[test]
    fn test_replace_all_empty_query() {
        assert_eq!(replace_all("unchanged", "", "x", false), "unchanged");
    }
}
