//! Detached, fail-fast enumeration.
//!
//! A [`Cursor`] remembers where it is as the piece path of the node it last
//! yielded from, plus the position inside that node's collision list. It holds
//! no borrow between steps, so the trie may be mutated while a cursor is
//! alive. Every step first compares the trie's generation with the one the
//! cursor captured; any difference fails the cursor with
//! [`TrieError::ConcurrentModification`] instead of yielding stale data.

use std::collections::btree_map;
use std::ops::Bound;

use log::debug;

use super::node::Node;
use super::{Pieces, SequenceTrie};
use crate::TrieError;

/// Lifecycle of a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumeratorState {
    /// Created or reset; nothing yielded yet.
    Created,
    /// At least one entry yielded, more may follow.
    Active,
    /// Every entry has been yielded.
    Exhausted,
    /// A concurrent modification was observed. Only a reset leaves this state.
    Failed,
}

/// A resumable enumerator over a [`SequenceTrie`] that detects mutation.
///
/// Entries come out in the same order as [`SequenceTrie::iter`].
///
/// # Examples
///
/// ```rust
/// use sequence_trie::{EnumeratorState, SequenceTrie};
///
/// let mut trie = SequenceTrie::new();
/// trie.add("b".to_string(), 2).unwrap();
/// trie.add("a".to_string(), 1).unwrap();
///
/// let mut cursor = trie.cursor();
/// let mut seen = Vec::new();
/// while let Some((key, value)) = cursor.next(&trie).unwrap() {
///     seen.push((key.clone(), *value));
/// }
/// assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
/// assert_eq!(cursor.state(), EnumeratorState::Exhausted);
///
/// trie.add("c".to_string(), 3).unwrap();
/// cursor.reset(&trie);
/// assert_eq!(cursor.state(), EnumeratorState::Created);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<P> {
    generation: u64,
    path: Vec<P>,
    value_index: usize,
    state: EnumeratorState,
}

impl<P: Ord + Clone> Cursor<P> {
    pub(crate) const fn new(generation: u64) -> Self {
        Self {
            generation,
            path: Vec::new(),
            value_index: 0,
            state: EnumeratorState::Created,
        }
    }

    /// Returns where the cursor is in its lifecycle.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> EnumeratorState {
        self.state
    }

    /// Returns the generation this cursor validates against.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Rewinds to the first entry and captures the trie's current generation.
    pub fn reset<K, V>(&mut self, trie: &SequenceTrie<K, V>)
    where
        K: Pieces<Piece = P>,
    {
        self.generation = trie.generation();
        self.path.clear();
        self.value_index = 0;
        self.state = EnumeratorState::Created;
    }

    /// Yields the next entry, or `None` once every entry has been yielded.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::ConcurrentModification`] if `trie` changed since
    /// this cursor was created or reset. The cursor then stays
    /// [`EnumeratorState::Failed`] and keeps returning the error until
    /// [`Cursor::reset`].
    pub fn next<'a, K, V>(
        &mut self,
        trie: &'a SequenceTrie<K, V>,
    ) -> Result<Option<(&'a K, &'a V)>, TrieError>
    where
        K: Pieces<Piece = P>,
    {
        if self.state == EnumeratorState::Exhausted {
            return Ok(None);
        }
        if self.state == EnumeratorState::Failed || trie.generation() != self.generation {
            if self.state != EnumeratorState::Failed {
                debug!(
                    "cursor: generation moved from {} to {}",
                    self.generation,
                    trie.generation()
                );
            }
            self.state = EnumeratorState::Failed;
            return Err(TrieError::ConcurrentModification {
                expected: self.generation,
                found: trie.generation(),
            });
        }

        let root = &trie.root;
        let found = match self.state {
            EnumeratorState::Created => seek(root.children.range::<P, _>(..), &mut self.path),
            _ => {
                let Some(node) = root.descend(self.path.as_slice()) else {
                    self.exhaust();
                    return Ok(None);
                };
                if self.value_index + 1 < node.values().len() {
                    self.value_index += 1;
                    self.state = EnumeratorState::Active;
                    return Ok(Self::entry(node, self.value_index));
                }
                self.advance(root, node)
            }
        };

        if !found {
            self.exhaust();
            return Ok(None);
        }
        self.value_index = 0;
        self.state = EnumeratorState::Active;
        Ok(root
            .descend(self.path.as_slice())
            .and_then(|node| Self::entry(node, 0)))
    }

    /// Moves `path` to the next terminal node after `node` in pre-order.
    fn advance<K, V>(&mut self, root: &Node<K, V>, node: &Node<K, V>) -> bool
    where
        K: Pieces<Piece = P>,
    {
        if seek(node.children.range::<P, _>(..), &mut self.path) {
            return true;
        }
        while let Some(piece) = self.path.pop() {
            let Some(parent) = root.descend(self.path.as_slice()) else {
                return false;
            };
            let siblings = parent
                .children
                .range::<P, _>((Bound::Excluded(&piece), Bound::Unbounded));
            if seek(siblings, &mut self.path) {
                return true;
            }
        }
        false
    }

    fn exhaust(&mut self) {
        self.path.clear();
        self.state = EnumeratorState::Exhausted;
    }

    fn entry<K: Pieces, V>(node: &Node<K, V>, index: usize) -> Option<(&K, &V)> {
        let terminal = node.terminal.as_ref()?;
        terminal.values.get(index).map(|value| (&terminal.key, value))
    }
}

/// Finds the first terminal node, in pre-order, among the subtrees reachable
/// from `siblings`, appending the pieces leading to it onto `path`.
///
/// Leaves `path` unchanged when there is none.
fn seek<P, K, V>(siblings: btree_map::Range<'_, P, Node<K, V>>, path: &mut Vec<P>) -> bool
where
    P: Ord + Clone,
    K: Pieces<Piece = P>,
{
    let mut stack = vec![siblings];
    while let Some(level) = stack.last_mut() {
        if let Some((piece, child)) = level.next() {
            path.push(piece.clone());
            if child.is_terminal() {
                return true;
            }
            stack.push(child.children.range::<P, _>(..));
        } else {
            stack.pop();
            if !stack.is_empty() {
                path.pop();
            }
        }
    }
    false
}
