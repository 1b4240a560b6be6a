//! Borrowing iterators over a [`SequenceTrie`](super::SequenceTrie).
//!
//! Traversal is depth-first and pre-order, visiting children in ascending
//! piece order. It keeps an explicit stack of child cursors, one per level
//! currently open, so each step resumes where the previous one stopped.
//!
//! These iterators borrow the trie, which statically rules out mutation while
//! they are alive. For enumeration that may interleave with writers, see
//! [`Cursor`](super::Cursor).

use std::collections::btree_map;
use std::iter::FusedIterator;

use super::Pieces;
use super::node::Node;

// =============================================================================
// Node Walk
// =============================================================================

/// Pre-order walk over the nodes below (and including) a starting node.
struct Nodes<'a, K: Pieces, V> {
    start: Option<&'a Node<K, V>>,
    stack: Vec<btree_map::Values<'a, K::Piece, Node<K, V>>>,
}

impl<'a, K: Pieces, V> Nodes<'a, K, V> {
    const fn new(start: Option<&'a Node<K, V>>) -> Self {
        Self {
            start,
            stack: Vec::new(),
        }
    }
}

impl<'a, K: Pieces, V> Iterator for Nodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.stack.push(start.children.values());
            return Some(start);
        }

        loop {
            let level = self.stack.last_mut()?;
            if let Some(child) = level.next() {
                self.stack.push(child.children.values());
                return Some(child);
            }
            self.stack.pop();
        }
    }
}

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the `(key, value)` pairs of a
/// [`SequenceTrie`](super::SequenceTrie).
///
/// A key with several values yields one pair per value, in insertion order,
/// before any longer key sharing its prefix.
pub struct Iter<'a, K: Pieces, V> {
    nodes: Nodes<'a, K, V>,
    current: Option<(&'a K, std::slice::Iter<'a, V>)>,
    remaining: Option<usize>,
}

impl<'a, K: Pieces, V> Iter<'a, K, V> {
    pub(crate) const fn new(start: &'a Node<K, V>, remaining: Option<usize>) -> Self {
        Self {
            nodes: Nodes::new(Some(start)),
            current: None,
            remaining,
        }
    }

    pub(crate) const fn empty() -> Self {
        Self {
            nodes: Nodes::new(None),
            current: None,
            remaining: Some(0),
        }
    }
}

impl<'a, K: Pieces, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = &mut self.current {
                if let Some(value) = values.next() {
                    if let Some(remaining) = &mut self.remaining {
                        *remaining = remaining.saturating_sub(1);
                    }
                    return Some((*key, value));
                }
                self.current = None;
            }

            let node = self.nodes.next()?;
            self.current = node
                .terminal
                .as_ref()
                .map(|terminal| (&terminal.key, terminal.values.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining
            .map_or((0, None), |remaining| (remaining, Some(remaining)))
    }
}

impl<K: Pieces, V> FusedIterator for Iter<'_, K, V> {}

// =============================================================================
// Keys and Values
// =============================================================================

/// An iterator over the distinct keys of a
/// [`SequenceTrie`](super::SequenceTrie), in lexicographic order.
pub struct Keys<'a, K: Pieces, V> {
    nodes: Nodes<'a, K, V>,
    remaining: usize,
}

impl<'a, K: Pieces, V> Keys<'a, K, V> {
    pub(crate) const fn new(root: &'a Node<K, V>, remaining: usize) -> Self {
        Self {
            nodes: Nodes::new(Some(root)),
            remaining,
        }
    }
}

impl<'a, K: Pieces, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self
            .nodes
            .by_ref()
            .find_map(|node| node.terminal.as_ref().map(|terminal| &terminal.key))?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Pieces, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K: Pieces, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`SequenceTrie`](super::SequenceTrie),
/// in key order.
pub struct Values<'a, K: Pieces, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: Pieces, V> Values<'a, K, V> {
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: Pieces, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Pieces, V> FusedIterator for Values<'_, K, V> {}
