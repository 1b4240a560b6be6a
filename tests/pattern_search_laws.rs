//! Property-based tests for pattern search.
//!
//! Results are checked against a direct recursive matcher of one pattern
//! against one query.

use proptest::prelude::*;
use sequence_trie::{CancellationToken, SequenceTrie, Wildcards};

const ANY_ONE: char = '?';
const ANY_SEQUENCE: char = '*';

// =============================================================================
// Reference Matcher
// =============================================================================

fn satisfies(pattern: &[char], query: &[char]) -> bool {
    match pattern.split_first() {
        None => query.is_empty(),
        Some((&ANY_SEQUENCE, rest)) => (0..=query.len()).any(|skip| satisfies(rest, &query[skip..])),
        Some((&ANY_ONE, rest)) => !query.is_empty() && satisfies(rest, &query[1..]),
        Some((piece, rest)) => query.first() == Some(piece) && satisfies(rest, &query[1..]),
    }
}

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

fn arbitrary_pattern() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', ANY_ONE, ANY_SEQUENCE]), 1..6)
}

fn arbitrary_query() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b']), 1..7)
}

fn build(patterns: &[Vec<char>]) -> SequenceTrie<Vec<char>, usize> {
    let mut trie = SequenceTrie::with_wildcards(Wildcards::new(ANY_ONE, ANY_SEQUENCE).unwrap());
    for (index, pattern) in patterns.iter().enumerate() {
        trie.add(pattern.clone(), index).unwrap();
    }
    trie
}

fn sorted(values: Vec<&usize>) -> Vec<usize> {
    let mut values: Vec<usize> = values.into_iter().copied().collect();
    values.sort_unstable();
    values
}

// =============================================================================
// Matching Laws
// =============================================================================

proptest! {
    /// Law: a stored pattern's values are reported exactly when the query
    /// satisfies the pattern.
    #[test]
    fn prop_matches_reference_law(
        patterns in prop::collection::vec(arbitrary_pattern(), 0..12),
        query in arbitrary_query()
    ) {
        let trie = build(&patterns);
        let expected: Vec<usize> = patterns
            .iter()
            .enumerate()
            .filter(|(_, pattern)| satisfies(pattern, &query))
            .map(|(index, _)| index)
            .collect();
        prop_assert_eq!(sorted(trie.pattern_search(&query)), expected);
    }

    /// Law: no value is reported twice.
    #[test]
    fn prop_no_duplicates_law(
        patterns in prop::collection::vec(arbitrary_pattern(), 0..12),
        query in arbitrary_query()
    ) {
        let trie = build(&patterns);
        let found = sorted(trie.pattern_search(&query));
        prop_assert!(found.windows(2).all(|pair| pair[0] != pair[1]));
    }

    /// Law: a wildcard-free key matches only itself.
    #[test]
    fn prop_literal_pattern_law(query in arbitrary_query()) {
        let trie = build(std::slice::from_ref(&query));
        prop_assert_eq!(trie.pattern_search(&query), vec![&0]);
    }

    /// Law: an untouched token never changes the result.
    #[test]
    fn prop_cancellable_agrees_law(
        patterns in prop::collection::vec(arbitrary_pattern(), 0..12),
        query in arbitrary_query()
    ) {
        let trie = build(&patterns);
        let token = CancellationToken::new();
        prop_assert_eq!(
            trie.pattern_search_cancellable(&query, &token),
            Ok(trie.pattern_search(&query))
        );
    }
}
