//! A trie shared between threads.
//!
//! [`SharedSequenceTrie`] is a cloneable handle to one [`SequenceTrie`] behind
//! a reader-writer lock. Writers serialize on the write lock; lookups and
//! pattern searches share the read lock and may run concurrently with each
//! other.
//!
//! Enumeration does not hold the lock between steps. A [`SharedEnumerator`]
//! takes the read lock for each step only, and fails with
//! [`TrieError::ConcurrentModification`] if a writer got in between.
//!
//! # Examples
//!
//! ```rust
//! use sequence_trie::SharedSequenceTrie;
//!
//! let trie: SharedSequenceTrie<String, i32> = SharedSequenceTrie::new();
//! let writer = trie.clone();
//!
//! std::thread::spawn(move || {
//!     writer.add("from-thread".to_string(), 1).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(trie.try_get("from-thread"), Some(1));
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::TrieError;
use crate::trie::{CancellationToken, Cursor, EnumeratorState, Pieces, SequenceTrie, Wildcards};

// =============================================================================
// SharedSequenceTrie
// =============================================================================

/// A thread-safe handle to a [`SequenceTrie`].
///
/// Cloning the handle shares the trie. Read accessors return owned copies of
/// the stored data, since no borrow may outlive the lock.
pub struct SharedSequenceTrie<K: Pieces, V> {
    inner: Arc<RwLock<SequenceTrie<K, V>>>,
}

impl<K: Pieces, V> SharedSequenceTrie<K, V> {
    /// Creates an empty shared trie with literal keys.
    #[must_use]
    pub fn new() -> Self {
        Self::from(SequenceTrie::new())
    }

    /// Creates an empty shared pattern trie.
    #[must_use]
    pub fn with_wildcards(wildcards: Wildcards<K::Piece>) -> Self {
        Self::from(SequenceTrie::with_wildcards(wildcards))
    }

    /// Locks the trie for reading and returns the guard.
    ///
    /// Writers on other handles block until the guard is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::SharedSequenceTrie;
    ///
    /// let trie = SharedSequenceTrie::new();
    /// trie.add("b".to_string(), 2).unwrap();
    /// trie.add("a".to_string(), 1).unwrap();
    ///
    /// let guard = trie.read();
    /// let keys: Vec<&String> = guard.keys().collect();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn read(&self) -> RwLockReadGuard<'_, SequenceTrie<K, V>> {
        self.inner.read()
    }

    /// See [`SequenceTrie::add`].
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidArgument`] if `key` has no pieces.
    pub fn add(&self, key: K, value: V) -> Result<(), TrieError> {
        self.inner.write().add(key, value)
    }

    /// See [`SequenceTrie::remove`].
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        self.inner.write().remove(key)
    }

    /// See [`SequenceTrie::remove_value`].
    pub fn remove_value<Q>(&self, key: &Q, value: &V) -> bool
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
        V: PartialEq,
    {
        self.inner.write().remove_value(key, value)
    }

    /// See [`SequenceTrie::clear`].
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// See [`SequenceTrie::contains_key`].
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// Returns a copy of the first value stored under `key`.
    #[must_use]
    pub fn try_get<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
        V: Clone,
    {
        self.inner.read().try_get(key).cloned()
    }

    /// Returns a copy of the collision list of `key`.
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> Vec<V>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
        V: Clone,
    {
        self.inner.read().search(key).to_vec()
    }

    /// Returns copies of the values whose pattern `query` satisfies.
    #[must_use]
    pub fn pattern_search<Q>(&self, query: &Q) -> Vec<V>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
        V: Clone,
    {
        self.inner
            .read()
            .pattern_search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// See [`SequenceTrie::pattern_search_cancellable`].
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::Cancelled`] once the token is observed cancelled.
    pub fn pattern_search_cancellable<Q>(
        &self,
        query: &Q,
        token: &CancellationToken,
    ) -> Result<Vec<V>, TrieError>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
        V: Clone,
    {
        let guard = self.inner.read();
        let matched = guard.pattern_search_cancellable(query, token)?;
        Ok(matched.into_iter().cloned().collect())
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.inner.read().value_count()
    }

    /// Returns `true` if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the current modification token.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.read().generation()
    }

    /// Returns an enumerator over copies of the entries, in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::{SharedSequenceTrie, TrieError};
    ///
    /// let trie = SharedSequenceTrie::new();
    /// trie.add("a".to_string(), 1).unwrap();
    /// trie.add("b".to_string(), 2).unwrap();
    ///
    /// let mut entries = trie.enumerator();
    /// assert_eq!(entries.next(), Some(Ok(("a".to_string(), 1))));
    ///
    /// trie.add("c".to_string(), 3).unwrap();
    /// assert!(matches!(
    ///     entries.next(),
    ///     Some(Err(TrieError::ConcurrentModification { .. }))
    /// ));
    /// assert_eq!(entries.next(), None);
    /// ```
    #[must_use]
    pub fn enumerator(&self) -> SharedEnumerator<K, V> {
        let cursor = self.inner.read().cursor();
        SharedEnumerator {
            trie: self.clone(),
            cursor,
            finished: false,
        }
    }
}

impl<K: Pieces, V> Clone for SharedSequenceTrie<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Pieces, V> Default for SharedSequenceTrie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Pieces, V> From<SequenceTrie<K, V>> for SharedSequenceTrie<K, V> {
    fn from(trie: SequenceTrie<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(trie)),
        }
    }
}

impl<K: Pieces + fmt::Debug, V: fmt::Debug> fmt::Debug for SharedSequenceTrie<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("SharedSequenceTrie")
            .field(&*self.inner.read())
            .finish()
    }
}

// =============================================================================
// SharedEnumerator
// =============================================================================

/// A fail-fast enumerator over a [`SharedSequenceTrie`].
///
/// Yields `Ok((key, value))` copies in key order. If a writer changed the trie
/// since the enumerator was created or reset, the next step yields one
/// `Err(TrieError::ConcurrentModification)` and the enumerator ends.
pub struct SharedEnumerator<K: Pieces, V> {
    trie: SharedSequenceTrie<K, V>,
    cursor: Cursor<K::Piece>,
    finished: bool,
}

impl<K: Pieces, V> SharedEnumerator<K, V> {
    /// Returns where the enumerator is in its lifecycle.
    #[must_use]
    pub const fn state(&self) -> EnumeratorState {
        self.cursor.state()
    }

    /// Rewinds to the first entry against the trie as it is now.
    pub fn reset(&mut self) {
        let guard = self.trie.inner.read();
        self.cursor.reset(&*guard);
        self.finished = false;
    }
}

impl<K: Pieces + Clone, V: Clone> Iterator for SharedEnumerator<K, V> {
    type Item = Result<(K, V), TrieError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let guard = self.trie.inner.read();
        match self.cursor.next(&*guard) {
            Ok(Some((key, value))) => Some(Ok((key.clone(), value.clone()))),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl<K: Pieces + Clone, V: Clone> FusedIterator for SharedEnumerator<K, V> {}
