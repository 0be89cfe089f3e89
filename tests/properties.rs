//! Property-based tests for parsing and matching.

use deriv_regex::{matches, parse, MatchConfig, Matcher, RegexStorage, Rewrite};
use proptest::prelude::*;

/// Patterns over `a`, `b` and `.` in the syntax this crate shares with the `regex` crate.
fn pattern() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![Just("a".to_string()), Just("b".to_string()), Just(".".to_string())];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{}{}", l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({}|{})", l, r)),
            inner.prop_map(|r| format!("({})*", r)),
        ]
    })
}

proptest! {
    /// A single literal matches exactly itself
    #[test]
    fn literal_matches_only_itself(c in "[a-z0-9 ]", x in "[a-z0-9 ]") {
        prop_assert_eq!(matches(&x, &c).unwrap(), x == c);
    }

    /// The empty input matches iff the parsed pattern is nullable
    #[test]
    fn empty_input_matches_nullable(p in pattern()) {
        let storage = RegexStorage::new();
        let regex = parse(&storage, &p).unwrap();
        prop_assert_eq!(matches("", &p).unwrap(), regex.is_nullable());
    }

    /// Swapping the sides of an alternation never changes what matches
    #[test]
    fn union_commutes(s in "[abc]{0,6}") {
        prop_assert_eq!(matches(&s, "a|b").unwrap(), matches(&s, "b|a").unwrap());
    }

    /// A star matches empty, or one repetition followed by the star again
    #[test]
    fn star_unrolls(s in "[ab]{0,8}") {
        let expected = s.is_empty()
            || (s.starts_with('a') && matches(&s[1..], "a*").unwrap());
        prop_assert_eq!(matches(&s, "a*").unwrap(), expected);
    }

    /// Trees built independently from the same pattern derive to equal trees
    #[test]
    fn derive_is_structural(p in pattern(), s in "[ab]{0,4}") {
        let first = RegexStorage::new();
        let second = RegexStorage::new();
        let mut x = first.parse(&p).unwrap();
        let mut y = second.parse(&p).unwrap();
        for c in s.chars() {
            x = first.derive(c, x);
            y = second.derive(c, y);
            prop_assert_eq!(x, y);
        }
    }

    /// Simplifying derivatives never changes the answer
    #[test]
    fn rewrites_agree(p in pattern(), s in "[abc]{0,6}") {
        let storage = RegexStorage::new();
        let regex = storage.parse(&p).unwrap();
        let exact = Matcher::new(MatchConfig::new().rewrite(Rewrite::Exact));
        prop_assert_eq!(
            exact.is_match(regex, &s).unwrap(),
            Matcher::default().is_match(regex, &s).unwrap()
        );
    }

    /// Simplified derivatives stay small however long the input runs
    #[test]
    fn derivatives_stay_small(p in pattern(), s in "[abc]{20,30}") {
        let storage = RegexStorage::new();
        let mut regex = storage.parse(&p).unwrap();
        for c in s.chars() {
            regex = storage.derive_with(Rewrite::Simplify, c, regex);
            prop_assert!(!regex.exceeds(1000), "{} grew to {}", p, regex);
        }
    }

    /// Matching agrees with the regex crate on whole-input matches
    #[test]
    fn agrees_with_regex_crate(p in pattern(), s in "[abc]{0,8}") {
        let oracle = regex::Regex::new(&format!("^(?:{})$", p)).unwrap();
        prop_assert_eq!(matches(&s, &p).unwrap(), oracle.is_match(&s));
    }

    /// Rendering a parsed pattern gives a pattern that parses to the same tree
    #[test]
    fn display_reparses(p in pattern()) {
        let storage = RegexStorage::new();
        let regex = storage.parse(&p).unwrap();
        let rendered = regex.to_string();
        prop_assert_eq!(storage.parse(&rendered).unwrap(), regex);
    }

    /// Unbalanced parentheses never parse
    #[test]
    fn unbalanced_groups_fail(p in pattern()) {
        let open = format!("({}", p);
        let close = format!("{})", p);
        prop_assert!(matches("", &open).is_err());
        prop_assert!(matches("", &close).is_err());
    }
}
