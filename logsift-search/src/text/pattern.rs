//! Query grammar: a raw query is either a literal or a `/regex/`.
//!
//! Only the first and the last character act as regex delimiters, so
//! `/Some/text/` is the regular expression `Some/text`. A query that merely
//! starts or ends with a slash is a literal.

use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Character that brackets a regular expression query.
const REGEX_BOUND_CHAR: char = '/';

/// A compiled query: literal text or a regular expression body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Text matched verbatim; regex metacharacters carry no meaning.
    Literal(String),
    /// Regular expression body, already checked for syntax errors.
    Regex(String),
}

impl Pattern {
    /// Parse a raw query string into a pattern.
    ///
    /// Fails with [`SearchError::EmptyPattern`] on empty or blank input or a
    /// blank regex body (`//`, `/ /`), and with [`SearchError::InvalidRegex`] when
    /// the body between the delimiters is not a valid regular expression.
    /// The reported offset points into the body, not into `text`.
    pub fn compile(text: &str) -> Result<Self, SearchError> {
        if text.trim().is_empty() {
            return Err(SearchError::EmptyPattern);
        }

        match regex_body(text) {
            Some(body) => {
                if body.trim().is_empty() {
                    return Err(SearchError::EmptyPattern);
                }
                validate_regex(body)?;
                log::trace!("Compiled regex pattern '{}'", body);
                Ok(Pattern::Regex(body.to_string()))
            }
            None => Ok(Pattern::Literal(text.to_string())),
        }
    }

    /// The pattern text without delimiters.
    pub fn text(&self) -> &str {
        match self {
            Pattern::Literal(text) | Pattern::Regex(text) => text,
        }
    }

    /// Whether this is a regular expression pattern.
    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Regex(_))
    }
}

impl FromStr for Pattern {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => write!(f, "{text}"),
            Pattern::Regex(body) => write!(f, "{REGEX_BOUND_CHAR}{body}{REGEX_BOUND_CHAR}"),
        }
    }
}

/// Returns the text between the delimiters if `text` is a `/regex/` query.
fn regex_body(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with(REGEX_BOUND_CHAR) && text.ends_with(REGEX_BOUND_CHAR) {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Check a regex body for syntax errors without building a matcher.
pub(crate) fn validate_regex(body: &str) -> Result<(), SearchError> {
    regex_syntax::Parser::new()
        .parse(body)
        .map(|_| ())
        .map_err(|e| syntax_error(body, &e))
}

pub(crate) fn syntax_error(body: &str, err: &regex_syntax::Error) -> SearchError {
    let (message, byte_offset) = match err {
        regex_syntax::Error::Parse(e) => (e.kind().to_string(), Some(e.span().start.offset)),
        regex_syntax::Error::Translate(e) => (e.kind().to_string(), Some(e.span().start.offset)),
        other => (other.to_string(), None),
    };

    // Byte offset -> character offset, so the UI can place a marker under the
    // offending character.
    let offset = byte_offset.and_then(|o| body.get(..o)).map(|s| s.chars().count());
    log::debug!("Invalid regex '{}': {} (offset {:?})", body, message, offset);

    SearchError::InvalidRegex { message, offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_literal() {
        assert_eq!(Pattern::compile("Some text").unwrap(), Pattern::Literal("Some text".into()));
    }

    #[test]
    fn test_regex_metacharacters_stay_literal_without_delimiters() {
        assert_eq!(
            Pattern::compile("Some|text").unwrap(),
            Pattern::Literal("Some|text".into())
        );
    }

    #[test]
    fn test_single_slash_prefix_or_suffix_is_literal() {
        assert_eq!(
            Pattern::compile("/Some|text").unwrap(),
            Pattern::Literal("/Some|text".into())
        );
        assert_eq!(
            Pattern::compile("Some|text/").unwrap(),
            Pattern::Literal("Some|text/".into())
        );
    }

    #[test]
    fn test_lone_slash_is_literal() {
        assert_eq!(Pattern::compile("/").unwrap(), Pattern::Literal("/".into()));
    }

    #[test]
    fn test_bracketed_text_is_regex() {
        assert_eq!(Pattern::compile("/Some|text/").unwrap(), Pattern::Regex("Some|text".into()));
    }

    #[test]
    fn test_interior_slashes_belong_to_regex() {
        assert_eq!(Pattern::compile("/Some/text/").unwrap(), Pattern::Regex("Some/text".into()));
        assert_eq!(Pattern::compile("/a/b/").unwrap(), Pattern::Regex("a/b".into()));
    }

    #[test]
    fn test_empty_inputs_fail() {
        assert_eq!(Pattern::compile(""), Err(SearchError::EmptyPattern));
        assert_eq!(Pattern::compile("//"), Err(SearchError::EmptyPattern));
        assert_eq!(Pattern::compile("/ /"), Err(SearchError::EmptyPattern));
        assert_eq!(Pattern::compile("/\t  /"), Err(SearchError::EmptyPattern));
    }

    #[test]
    fn test_blank_input_is_empty_pattern() {
        assert_eq!(Pattern::compile("  ").unwrap_err(), SearchError::EmptyPattern);
        assert_eq!(Pattern::compile("\t\n").unwrap_err(), SearchError::EmptyPattern);
        assert_eq!(" ".parse::<Pattern>().unwrap_err(), SearchError::EmptyPattern);
    }

    #[test]
    fn test_padded_text_keeps_its_spaces() {
        assert_eq!(Pattern::compile(" a ").unwrap(), Pattern::Literal(" a ".into()));
    }

    #[test]
    fn test_invalid_regex_reports_offset_into_body() {
        let err = Pattern::compile("/foo(/").unwrap_err();
        match err {
            SearchError::InvalidRegex { offset, .. } => assert_eq!(offset, Some(3)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_regex_offset_counts_characters() {
        // 'ü' is two bytes; the offset must still be a character offset.
        let err = Pattern::compile("/üü[/").unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn test_display_round_trips_delimiters() {
        assert_eq!(Pattern::Regex("a/b".into()).to_string(), "/a/b/");
        assert_eq!(Pattern::Literal("a/b".into()).to_string(), "a/b");
    }

    #[test]
    fn test_from_str() {
        let pattern: Pattern = "/c.ntacts/".parse().unwrap();
        assert!(pattern.is_regex());
        assert_eq!(pattern.text(), "c.ntacts");
    }
}
