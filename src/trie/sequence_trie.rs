//! Trie over sequences of ordered pieces.
//!
//! This module provides [`SequenceTrie`], a mutable trie whose levels are
//! ordered maps keyed by the next piece of a key.
//!
//! # Overview
//!
//! - Keys are any type implementing [`Pieces`]: strings walk by `char`,
//!   vectors and slices by element.
//! - Adding a value under a key that is already present appends it to that
//!   key's collision list instead of replacing the earlier value.
//! - Enumeration is depth-first and ascending by piece at every level, so
//!   keys come out in lexicographic order with prefixes first.
//! - Stored keys may act as patterns when the trie is built with
//!   [`Wildcards`]; see [`SequenceTrie::pattern_search`].
//!
//! # Counting
//!
//! [`SequenceTrie::len`] is the number of distinct keys currently stored.
//! [`SequenceTrie::value_count`] is the number of values across all collision
//! lists. A second `add` under the same key moves only the latter.
//!
//! # Space
//!
//! Removing a key clears its terminal record but keeps the nodes that lead to
//! it. Those nodes are reused by later adds under the same prefix and are only
//! released by [`SequenceTrie::clear`] or by dropping the trie.
//!
//! # Examples
//!
//! ```rust
//! use sequence_trie::SequenceTrie;
//!
//! let mut trie = SequenceTrie::new();
//! trie.add("dog".to_string(), 1).unwrap();
//! trie.add("cat".to_string(), 2).unwrap();
//! trie.add("car".to_string(), 3).unwrap();
//! trie.add("cat".to_string(), 4).unwrap();
//!
//! assert_eq!(trie.search("cat"), &[2, 4]);
//! assert_eq!(trie.len(), 3);
//! assert_eq!(trie.value_count(), 4);
//!
//! let keys: Vec<&String> = trie.keys().collect();
//! assert_eq!(keys, vec!["car", "cat", "dog"]);
//! ```

use std::fmt;

use log::{debug, trace, warn};

use super::cursor::Cursor;
use super::iter::{Iter, Keys, Values};
use super::node::Node;
use super::pattern::Wildcards;
use super::Pieces;
use crate::TrieError;

// =============================================================================
// SequenceTrie Definition
// =============================================================================

/// A trie mapping piece sequences to lists of values.
///
/// # Time Complexity
///
/// With `m` the key length in pieces and `b` the widest level on the path:
///
/// | Operation         | Complexity        |
/// |-------------------|-------------------|
/// | `add`             | O(m log b)        |
/// | `remove`          | O(m log b)        |
/// | `contains_key`    | O(m log b)        |
/// | `search`          | O(m log b)        |
/// | `len`             | O(1)              |
/// | `iter` (per step) | amortized O(1)    |
///
/// # Examples
///
/// ```rust
/// use sequence_trie::SequenceTrie;
///
/// let mut trie: SequenceTrie<Vec<u8>, &str> = SequenceTrie::new();
/// trie.add(vec![1, 2, 3], "one-two-three").unwrap();
///
/// assert!(trie.contains_key(&[1u8, 2, 3]));
/// assert!(!trie.contains_key(&[1u8, 2]));
/// assert_eq!(trie.try_get(&[1u8, 2, 3]), Some(&"one-two-three"));
/// ```
#[derive(Clone)]
pub struct SequenceTrie<K: Pieces, V> {
    pub(crate) root: Node<K, V>,
    /// Number of distinct keys.
    length: usize,
    /// Number of values across all collision lists.
    value_count: usize,
    /// Bumped by every structural change.
    generation: u64,
    pub(crate) wildcards: Option<Wildcards<K::Piece>>,
}

impl<K: Pieces, V> SequenceTrie<K, V> {
    /// Creates an empty trie whose stored keys are matched literally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SequenceTrie;
    ///
    /// let trie: SequenceTrie<String, i32> = SequenceTrie::new();
    /// assert!(trie.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: Node::new(),
            length: 0,
            value_count: 0,
            generation: 0,
            wildcards: None,
        }
    }

    /// Creates an empty trie whose stored keys may contain the given
    /// wildcard pieces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::{SequenceTrie, Wildcards};
    ///
    /// let wildcards = Wildcards::new('?', '*').unwrap();
    /// let mut patterns: SequenceTrie<String, u32> = SequenceTrie::with_wildcards(wildcards);
    /// patterns.add("c?t".to_string(), 7).unwrap();
    ///
    /// assert_eq!(patterns.pattern_search("cat"), vec![&7]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_wildcards(wildcards: Wildcards<K::Piece>) -> Self {
        Self {
            root: Node::new(),
            length: 0,
            value_count: 0,
            generation: 0,
            wildcards: Some(wildcards),
        }
    }

    /// Returns the wildcard pieces this trie was built with, if any.
    #[inline]
    #[must_use]
    pub const fn wildcards(&self) -> Option<&Wildcards<K::Piece>> {
        self.wildcards.as_ref()
    }

    /// Returns the number of distinct keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SequenceTrie;
    ///
    /// let mut trie = SequenceTrie::new();
    /// trie.add("key".to_string(), 1).unwrap();
    /// trie.add("key".to_string(), 2).unwrap();
    /// assert_eq!(trie.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns the number of values across all collision lists.
    #[inline]
    #[must_use]
    pub const fn value_count(&self) -> usize {
        self.value_count
    }

    /// Returns `true` if no key is stored.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the modification token.
    ///
    /// The token moves on every `add`, on every removal that changed the
    /// trie, and on `clear` of a non-empty trie. A [`Cursor`] compares it
    /// against the value it captured to detect interleaved mutation.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    const fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Adds `value` under `key`.
    ///
    /// If `key` is already present the value is appended to its collision
    /// list, and `key` replaces the stored representative key.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidArgument`] if `key` has no pieces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SequenceTrie;
    ///
    /// let mut trie = SequenceTrie::new();
    /// trie.add("k".to_string(), 1).unwrap();
    /// trie.add("k".to_string(), 2).unwrap();
    /// assert_eq!(trie.search("k"), &[1, 2]);
    ///
    /// assert!(trie.add(String::new(), 3).is_err());
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Result<(), TrieError> {
        if key.is_empty_key() {
            return Err(TrieError::invalid_argument(
                "add",
                "key must contain at least one piece",
            ));
        }

        let node = self.root.descend_or_create(&key);
        if node.attach(key, value) {
            self.length += 1;
        }
        self.value_count += 1;
        self.bump_generation();
        trace!(
            "add: {} keys, {} values, generation {}",
            self.length, self.value_count, self.generation
        );
        Ok(())
    }

    /// Removes `key` together with its whole collision list.
    ///
    /// Returns `false`, leaving the trie untouched, if `key` is not stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SequenceTrie;
    ///
    /// let mut trie = SequenceTrie::new();
    /// trie.add("k".to_string(), 1).unwrap();
    /// trie.add("k".to_string(), 2).unwrap();
    ///
    /// assert!(trie.remove("k"));
    /// assert!(!trie.contains_key("k"));
    /// assert!(!trie.remove("k"));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        let Some(node) = self.root.descend_mut(key) else {
            return false;
        };
        let dropped = node.detach();
        if dropped == 0 {
            return false;
        }

        self.length -= 1;
        self.value_count -= dropped;
        self.bump_generation();
        trace!(
            "remove: dropped {dropped} values, generation {}",
            self.generation
        );
        true
    }

    /// Removes the first value equal to `value` from the collision list of
    /// `key`.
    ///
    /// The key stays stored while other values remain under it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SequenceTrie;
    ///
    /// let mut trie = SequenceTrie::new();
    /// trie.add("k".to_string(), 1).unwrap();
    /// trie.add("k".to_string(), 2).unwrap();
    ///
    /// assert!(trie.remove_value("k", &1));
    /// assert_eq!(trie.search("k"), &[2]);
    /// assert!(!trie.remove_value("k", &1));
    /// ```
    pub fn remove_value<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
        V: PartialEq,
    {
        let Some(emptied) = self
            .root
            .descend_mut(key)
            .and_then(|node| node.detach_value(value))
        else {
            return false;
        };

        if emptied {
            self.length -= 1;
        }
        self.value_count -= 1;
        self.bump_generation();
        trace!(
            "remove_value: key emptied: {emptied}, generation {}",
            self.generation
        );
        true
    }

    /// Removes every key and releases every node.
    pub fn clear(&mut self) {
        if self.root.children.is_empty() {
            return;
        }
        debug!(
            "clear: dropping {} keys and {} values",
            self.length, self.value_count
        );
        self.root = Node::new();
        self.length = 0;
        self.value_count = 0;
        self.bump_generation();
    }

    /// Returns `true` if `key` is stored.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        self.root.descend(key).is_some_and(Node::is_terminal)
    }

    /// Returns the first value stored under `key`.
    ///
    /// Later values of the collision list are reachable through
    /// [`SequenceTrie::search`] or enumeration.
    #[must_use]
    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        self.search(key).first()
    }

    /// Returns the whole collision list of `key`, empty if `key` is absent.
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> &[V]
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        self.root
            .descend(key)
            .map(Node::values)
            .unwrap_or_default()
    }

    /// Returns an iterator over `(key, value)` pairs in lexicographic piece
    /// order, one pair per value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SequenceTrie;
    ///
    /// let trie: SequenceTrie<String, i32> = [("cat", 1), ("car", 2), ("dog", 3)]
    ///     .into_iter()
    ///     .map(|(key, value)| (key.to_string(), value))
    ///     .collect();
    ///
    /// let entries: Vec<(&str, i32)> = trie.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    /// assert_eq!(entries, vec![("car", 2), ("cat", 1), ("dog", 3)]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, Some(self.value_count))
    }

    /// Returns an iterator over the entries whose key starts with `prefix`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SequenceTrie;
    ///
    /// let trie: SequenceTrie<String, i32> = [("car", 1), ("cart", 2), ("cat", 3)]
    ///     .into_iter()
    ///     .map(|(key, value)| (key.to_string(), value))
    ///     .collect();
    ///
    /// let values: Vec<&i32> = trie.iter_prefix("car").map(|(_, v)| v).collect();
    /// assert_eq!(values, vec![&1, &2]);
    /// ```
    #[must_use]
    pub fn iter_prefix<Q>(&self, prefix: &Q) -> Iter<'_, K, V>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        self.root
            .descend(prefix)
            .map_or_else(Iter::empty, |node| Iter::new(node, None))
    }

    /// Returns an iterator over the distinct keys in lexicographic order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(&self.root, self.length)
    }

    /// Returns an iterator over the values in key order, collision lists in
    /// insertion order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns a detached cursor positioned before the first entry.
    ///
    /// The cursor borrows nothing; it is advanced with [`Cursor::next`] and
    /// fails with [`TrieError::ConcurrentModification`] once the trie has
    /// changed since the cursor was created or last reset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::{SequenceTrie, TrieError};
    ///
    /// let mut trie = SequenceTrie::new();
    /// trie.add("a".to_string(), 1).unwrap();
    /// trie.add("b".to_string(), 2).unwrap();
    ///
    /// let mut cursor = trie.cursor();
    /// assert_eq!(cursor.next(&trie).unwrap(), Some((&"a".to_string(), &1)));
    ///
    /// trie.add("c".to_string(), 3).unwrap();
    /// assert!(matches!(
    ///     cursor.next(&trie),
    ///     Err(TrieError::ConcurrentModification { .. })
    /// ));
    /// ```
    #[must_use]
    pub fn cursor(&self) -> Cursor<K::Piece> {
        Cursor::new(self.generation)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Pieces, V> Default for SequenceTrie<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Entries with an empty key are skipped.
impl<K: Pieces, V> Extend<(K, V)> for SequenceTrie<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Err(error) = self.add(key, value) {
                warn!("extend: skipped entry: {error}");
            }
        }
    }
}

/// Entries with an empty key are skipped.
impl<K: Pieces, V> FromIterator<(K, V)> for SequenceTrie<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<'a, K: Pieces, V> IntoIterator for &'a SequenceTrie<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two tries are equal when they enumerate the same entries in the same
/// order. Wildcard configuration is not compared.
impl<K: Pieces + PartialEq, V: PartialEq> PartialEq for SequenceTrie<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.value_count == other.value_count
            && self.iter().eq(other.iter())
    }
}

impl<K: Pieces + Eq, V: Eq> Eq for SequenceTrie<K, V> {}

impl<K: Pieces + fmt::Debug, V: fmt::Debug> fmt::Debug for SequenceTrie<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Pieces + fmt::Display, V: fmt::Display> fmt::Display for SequenceTrie<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for SequenceTrie<K, V>
where
    K: Pieces + serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut entries = serializer.serialize_seq(Some(self.value_count))?;
        for entry in self {
            entries.serialize_element(&entry)?;
        }
        entries.end()
    }
}

#[cfg(feature = "serde")]
struct SequenceTrieVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> SequenceTrieVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for SequenceTrieVisitor<K, V>
where
    K: Pieces + serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    type Value = SequenceTrie<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of (key, value) entries")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut trie = SequenceTrie::new();
        while let Some((key, value)) = access.next_element::<(K, V)>()? {
            trie.add(key, value)
                .map_err(<A::Error as serde::de::Error>::custom)?;
        }
        Ok(trie)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for SequenceTrie<K, V>
where
    K: Pieces + serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SequenceTrieVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
