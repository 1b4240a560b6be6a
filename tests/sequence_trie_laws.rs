//! Property-based tests for SequenceTrie.
//!
//! A `BTreeMap` from key to value list serves as the model: byte-vector keys
//! order the same way in both, so enumeration, counts and lookups can be
//! compared entry for entry.

use std::collections::BTreeMap;

use proptest::prelude::*;
use sequence_trie::SequenceTrie;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// Short keys over a four-piece alphabet, so prefixes and collisions are
/// common.
fn arbitrary_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 1..5)
}

fn arbitrary_entries(max_size: usize) -> impl Strategy<Value = Vec<(Vec<u8>, i32)>> {
    prop::collection::vec((arbitrary_key(), any::<i32>()), 0..max_size)
}

fn build(entries: &[(Vec<u8>, i32)]) -> (SequenceTrie<Vec<u8>, i32>, BTreeMap<Vec<u8>, Vec<i32>>) {
    let mut trie = SequenceTrie::new();
    let mut model: BTreeMap<Vec<u8>, Vec<i32>> = BTreeMap::new();
    for (key, value) in entries {
        trie.add(key.clone(), *value).unwrap();
        model.entry(key.clone()).or_default().push(*value);
    }
    (trie, model)
}

fn flatten(model: &BTreeMap<Vec<u8>, Vec<i32>>) -> Vec<(Vec<u8>, i32)> {
    model
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |value| (key.clone(), *value)))
        .collect()
}

fn entries_of(trie: &SequenceTrie<Vec<u8>, i32>) -> Vec<(Vec<u8>, i32)> {
    trie.iter()
        .map(|(key, value)| (key.clone(), *value))
        .collect()
}

// =============================================================================
// Add-Search Laws
// =============================================================================

proptest! {
    /// Law: a value added under a key is the last entry of that key's
    /// collision list.
    #[test]
    fn prop_search_after_add_law(
        entries in arbitrary_entries(20),
        key in arbitrary_key(),
        value: i32
    ) {
        let (mut trie, _) = build(&entries);
        trie.add(key.clone(), value).unwrap();
        prop_assert!(trie.contains_key(&key));
        prop_assert_eq!(trie.search(&key).last(), Some(&value));
    }

    /// Law: collision lists keep insertion order.
    #[test]
    fn prop_collision_order_law(entries in arbitrary_entries(30)) {
        let (trie, model) = build(&entries);
        for (key, values) in &model {
            prop_assert_eq!(trie.search(key), values.as_slice());
            prop_assert_eq!(trie.try_get(key), values.first());
        }
    }

    /// Law: a strict prefix of a stored key is only found when stored itself.
    #[test]
    fn prop_prefix_not_a_key_law(entries in arbitrary_entries(20), key in arbitrary_key()) {
        let (trie, model) = build(&entries);
        for end in 1..=key.len() {
            let prefix = &key[..end];
            prop_assert_eq!(trie.contains_key(prefix), model.contains_key(prefix));
        }
    }
}

// =============================================================================
// Count Laws
// =============================================================================

proptest! {
    /// Law: len counts distinct keys, value_count counts every value.
    #[test]
    fn prop_count_law(entries in arbitrary_entries(30)) {
        let (trie, model) = build(&entries);
        prop_assert_eq!(trie.len(), model.len());
        prop_assert_eq!(trie.value_count(), entries.len());
        prop_assert_eq!(trie.is_empty(), entries.is_empty());
        prop_assert_eq!(trie.keys().len(), model.len());
    }
}

// =============================================================================
// Enumeration Laws
// =============================================================================

proptest! {
    /// Law: enumeration is lexicographic by key, collision lists in
    /// insertion order.
    #[test]
    fn prop_enumeration_order_law(entries in arbitrary_entries(30)) {
        let (trie, model) = build(&entries);
        prop_assert_eq!(entries_of(&trie), flatten(&model));
    }

    /// Law: keys are strictly ascending.
    #[test]
    fn prop_keys_ascending_law(entries in arbitrary_entries(30)) {
        let (trie, _) = build(&entries);
        let keys: Vec<&Vec<u8>> = trie.keys().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Law: a cursor over an unmodified trie yields exactly what iter yields.
    #[test]
    fn prop_cursor_agrees_with_iter_law(entries in arbitrary_entries(30)) {
        let (trie, _) = build(&entries);
        let mut cursor = trie.cursor();
        let mut drained = Vec::new();
        while let Some((key, value)) = cursor.next(&trie).unwrap() {
            drained.push((key.clone(), *value));
        }
        prop_assert_eq!(drained, entries_of(&trie));
    }

    /// Law: a prefix scan is the enumeration filtered by prefix.
    #[test]
    fn prop_iter_prefix_law(entries in arbitrary_entries(30), prefix in arbitrary_key()) {
        let (trie, model) = build(&entries);
        let scanned: Vec<(Vec<u8>, i32)> = trie
            .iter_prefix(&prefix)
            .map(|(key, value)| (key.clone(), *value))
            .collect();
        let expected: Vec<(Vec<u8>, i32)> = flatten(&model)
            .into_iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect();
        prop_assert_eq!(scanned, expected);
    }
}

// =============================================================================
// Remove Laws
// =============================================================================

proptest! {
    /// Law: remove takes the whole collision list and nothing else.
    #[test]
    fn prop_remove_totality_law(entries in arbitrary_entries(30), key in arbitrary_key()) {
        let (mut trie, mut model) = build(&entries);
        let expected = model.remove(&key).is_some();
        prop_assert_eq!(trie.remove(&key), expected);
        prop_assert!(!trie.contains_key(&key));
        prop_assert!(trie.search(&key).is_empty());
        prop_assert_eq!(entries_of(&trie), flatten(&model));
    }

    /// Law: removing an absent key changes nothing, including the generation.
    #[test]
    fn prop_remove_idempotent_law(entries in arbitrary_entries(20), key in arbitrary_key()) {
        let (mut trie, _) = build(&entries);
        trie.remove(&key);
        let generation = trie.generation();
        let snapshot = trie.clone();
        prop_assert!(!trie.remove(&key));
        prop_assert_eq!(trie.generation(), generation);
        prop_assert_eq!(trie, snapshot);
    }

    /// Law: remove_value drops the first equal value only.
    #[test]
    fn prop_remove_value_law(
        entries in prop::collection::vec((arbitrary_key(), 0i32..3), 0..30),
        key in arbitrary_key(),
        value in 0i32..3
    ) {
        let (mut trie, mut model) = build(&entries);
        let expected = model.get_mut(&key).and_then(|values| {
            let position = values.iter().position(|stored| *stored == value)?;
            values.remove(position);
            Some(())
        });
        model.retain(|_, values| !values.is_empty());

        prop_assert_eq!(trie.remove_value(&key, &value), expected.is_some());
        prop_assert_eq!(entries_of(&trie), flatten(&model));
        prop_assert_eq!(trie.len(), model.len());
    }

    /// Law: re-adding removed entries restores an equal trie.
    #[test]
    fn prop_remove_then_restore_law(entries in arbitrary_entries(20), key in arbitrary_key()) {
        let (mut trie, model) = build(&entries);
        trie.remove(&key);
        for value in model.get(&key).into_iter().flatten() {
            trie.add(key.clone(), *value).unwrap();
        }
        let (rebuilt, _) = build(&flatten(&model));
        prop_assert_eq!(trie, rebuilt);
    }
}
