//! Regular expression matching by Brzozowski derivatives.
//!
//! Instead of compiling a pattern to an automaton, a [`Regex`] is kept as an algebraic value.
//! Matching takes the derivative of that value with respect to each input character in turn;
//! the input matches if the final derivative accepts the empty string.
//!
//! ```
//! use deriv_regex::{matches, RegexStorage};
//!
//! assert_eq!(matches("abc", "a.*c"), Ok(true));
//! assert!(matches("abc", "a(").is_err());
//!
//! let storage = RegexStorage::new();
//! let regex = storage.parse("(a|b)*c").unwrap();
//! assert!(storage.matches("abbac", regex));
//! assert!(!storage.matches("abba", regex));
//! ```
//!
//! Patterns support literals, `.`, postfix `*`, implicit concatenation, `|` and parentheses.
//! A `\` makes any of `. * | ( ) \` literal, and `\ε` and `\∅` are accepted as the plain
//! characters. Matching is always against the whole input.

mod arena_regex;
mod error;
mod matcher;
mod parse;

pub use arena_regex::{Node, Regex, RegexStorage, Rewrite};
pub use error::{MatchError, SyntaxError};
pub use matcher::{MatchConfig, Matcher, EXACT_MAX_DEPTH};
pub use parse::parse;

/// Does the whole of `input` match `pattern`? An invalid pattern is an error, never `false`.
pub fn matches(input: &str, pattern: &str) -> Result<bool, SyntaxError> {
    let storage = RegexStorage::new();
    let regex = storage.parse(pattern)?;
    Ok(storage.matches(input, regex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples() {
        assert_eq!(matches("abc", "abc"), Ok(true));
        assert_eq!(matches("abc", "def"), Ok(false));
        assert_eq!(matches("abc", "a.c"), Ok(true));
        assert_eq!(matches("abc", "a.*c"), Ok(true));
        assert_eq!(matches("ac", "a.*c"), Ok(true));
        assert_eq!(matches("", "a*"), Ok(true));
    }

    #[test]
    fn invalid_patterns() {
        assert_eq!(
            matches("", "("),
            Err(SyntaxError::UnclosedGroup { position: 0 })
        );
        assert_eq!(
            matches("", "*"),
            Err(SyntaxError::NothingToRepeat { position: 0 })
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(matches("a*", "a\\*"), Ok(true));
        assert_eq!(matches("aa", "a\\*"), Ok(false));
        assert_eq!(matches("(x)", "\\(x\\)"), Ok(true));
        assert_eq!(matches("a.b", "a\\.b"), Ok(true));
        assert_eq!(matches("axb", "a\\.b"), Ok(false));
    }

    #[test]
    fn code_points() {
        assert_eq!(matches("héllo", "h.llo"), Ok(true));
        assert_eq!(matches("日本語", "日.*"), Ok(true));
        assert_eq!(matches("☃☃", "☃*"), Ok(true));
        assert_eq!(matches("e\u{301}", "."), Ok(false));
    }
}
