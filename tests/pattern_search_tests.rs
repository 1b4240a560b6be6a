//! Tests for reverse wildcard matching.

use rstest::rstest;
use sequence_trie::{CancellationToken, SequenceTrie, TrieError, Wildcards};

fn patterns(entries: &[(&str, &'static str)]) -> SequenceTrie<String, &'static str> {
    let mut trie = SequenceTrie::with_wildcards(Wildcards::new('?', '*').unwrap());
    for (key, value) in entries {
        trie.add((*key).to_string(), *value).unwrap();
    }
    trie
}

fn matched(trie: &SequenceTrie<String, &'static str>, query: &str) -> Vec<&'static str> {
    let mut values: Vec<&'static str> = trie.pattern_search(query).into_iter().copied().collect();
    values.sort_unstable();
    values
}

// =============================================================================
// Wildcards Tests
// =============================================================================

#[rstest]
fn test_wildcards_accessors() {
    let wildcards = Wildcards::new('?', '*').unwrap();
    assert_eq!(wildcards.any_one(), &'?');
    assert_eq!(wildcards.any_sequence(), &'*');
    assert!(wildcards.is_wildcard(&'?'));
    assert!(!wildcards.is_wildcard(&'x'));
}

#[rstest]
fn test_equal_wildcards_rejected() {
    let result = Wildcards::new('*', '*');
    assert!(matches!(
        result,
        Err(TrieError::InvalidArgument {
            operation: "Wildcards::new",
            ..
        })
    ));
}

#[rstest]
fn test_trie_reports_its_wildcards() {
    let trie = patterns(&[]);
    assert_eq!(trie.wildcards(), Some(&Wildcards::new('?', '*').unwrap()));
}

// =============================================================================
// Matching Tests
// =============================================================================

#[rstest]
#[case("cat", vec!["c?t"])]
#[case("cot", vec!["c?t"])]
#[case("ct", vec![])]
#[case("coat", vec![])]
fn test_any_one_consumes_exactly_one(#[case] query: &str, #[case] expected: Vec<&str>) {
    let trie = patterns(&[("c?t", "c?t")]);
    assert_eq!(matched(&trie, query), expected);
}

#[rstest]
#[case("az", true)]
#[case("abz", true)]
#[case("abcz", true)]
#[case("azz", true)]
#[case("za", false)]
#[case("a", false)]
fn test_any_sequence_consumes_zero_or_more(#[case] query: &str, #[case] hit: bool) {
    let trie = patterns(&[("a*z", "a*z")]);
    assert_eq!(!matched(&trie, query).is_empty(), hit);
}

#[rstest]
fn test_every_satisfied_pattern_is_reported() {
    let trie = patterns(&[
        ("a*c", "a*c"),
        ("ab?", "ab?"),
        ("abc", "abc"),
        ("*", "*"),
        ("abd", "abd"),
        ("a?", "a?"),
    ]);
    assert_eq!(matched(&trie, "abc"), vec!["*", "a*c", "ab?", "abc"]);
}

#[rstest]
fn test_pattern_reported_once_per_query() {
    let trie = patterns(&[("*a*", "*a*")]);
    assert_eq!(matched(&trie, "banana"), vec!["*a*"]);
}

#[rstest]
fn test_collision_list_in_insertion_order() {
    let trie = patterns(&[("x*", "first"), ("x*", "second")]);
    assert_eq!(trie.pattern_search("xyz"), vec![&"first", &"second"]);
}

#[rstest]
fn test_literal_before_wildcards_in_discovery_order() {
    let trie = patterns(&[("*", "sequence"), ("?", "one"), ("a", "literal")]);
    assert_eq!(
        trie.pattern_search("a"),
        vec![&"literal", &"one", &"sequence"]
    );
}

#[rstest]
fn test_empty_query_matches_nothing() {
    let trie = patterns(&[("*", "*")]);
    assert!(trie.pattern_search("").is_empty());
}

#[rstest]
fn test_trailing_sequence_matches_empty_tail() {
    let trie = patterns(&[("ab*", "ab*"), ("ab**", "ab**")]);
    assert_eq!(matched(&trie, "ab"), vec!["ab*", "ab**"]);
}

#[rstest]
fn test_reserved_piece_in_query_only_matched_by_wildcards() {
    let trie = patterns(&[("a*", "a*"), ("a?", "a?"), ("ab", "ab")]);
    assert_eq!(matched(&trie, "a*"), vec!["a*", "a?"]);
    assert_eq!(matched(&trie, "ab"), vec!["a*", "a?", "ab"]);
}

#[rstest]
fn test_many_sequence_wildcards_stay_tractable() {
    let pattern = "*a".repeat(12);
    let trie = patterns(&[(pattern.as_str(), "many")]);
    let query = "a".repeat(40);
    assert_eq!(matched(&trie, &query), vec!["many"]);
    assert!(matched(&trie, &"b".repeat(40)).is_empty());
}

#[rstest]
fn test_removed_pattern_no_longer_matches() {
    let mut trie = patterns(&[("c*", "c*"), ("c?t", "c?t")]);
    assert!(trie.remove("c*"));
    assert_eq!(matched(&trie, "cat"), vec!["c?t"]);
}

#[rstest]
fn test_literal_trie_search_is_exact() {
    let mut trie: SequenceTrie<String, i32> = SequenceTrie::new();
    trie.add("c?t".to_string(), 1).unwrap();
    assert!(trie.pattern_search("cat").is_empty());
    assert_eq!(trie.pattern_search("c?t"), vec![&1]);
}

#[rstest]
fn test_non_character_wildcards() {
    let mut routes: SequenceTrie<Vec<&str>, u32> =
        SequenceTrie::with_wildcards(Wildcards::new("{id}", "**").unwrap());
    routes.add(vec!["users", "{id}"], 1).unwrap();
    routes.add(vec!["users", "**"], 2).unwrap();
    routes.add(vec!["users", "{id}", "posts"], 3).unwrap();

    assert_eq!(routes.pattern_search(&["users", "42"]), vec![&1, &2]);
    assert_eq!(routes.pattern_search(&["users", "42", "posts"]), vec![&3, &2]);
    assert_eq!(routes.pattern_search(&["users"]), vec![&2]);
}

// =============================================================================
// Cancellation Tests
// =============================================================================

#[rstest]
fn test_uncancelled_token_returns_matches() {
    let trie = patterns(&[("a*", "a*")]);
    let token = CancellationToken::new();
    assert_eq!(
        trie.pattern_search_cancellable("abc", &token),
        Ok(vec![&"a*"])
    );
}

#[rstest]
fn test_cancelled_token_returns_error() {
    let trie = patterns(&[("a*", "a*")]);
    let token = CancellationToken::new();
    token.clone().cancel();
    assert_eq!(
        trie.pattern_search_cancellable("abc", &token),
        Err(TrieError::Cancelled)
    );
}
