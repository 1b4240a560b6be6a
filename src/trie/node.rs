//! Trie vertices.
//!
//! Every node is owned by its parent's child map; the root is owned by the
//! trie. The piece a node was reached by is the key its parent stores it
//! under, so it is not repeated inside the node.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use super::Pieces;

/// Values attached to one key, in insertion order.
///
/// Most keys carry a single value, which is kept inline.
pub(crate) type CollisionList<V> = SmallVec<[V; 1]>;

/// The record a node carries while some key ends at it.
#[derive(Clone)]
pub(crate) struct Terminal<K, V> {
    /// The key object passed to the latest `add` ending here.
    pub(crate) key: K,
    /// Never empty.
    pub(crate) values: CollisionList<V>,
}

#[derive(Clone)]
pub(crate) struct Node<K: Pieces, V> {
    pub(crate) children: BTreeMap<K::Piece, Node<K, V>>,
    pub(crate) terminal: Option<Terminal<K, V>>,
}

impl<K: Pieces, V> Node<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            terminal: None,
        }
    }

    #[inline]
    pub(crate) const fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Values attached to this node, empty unless terminal.
    #[inline]
    pub(crate) fn values(&self) -> &[V] {
        match &self.terminal {
            Some(terminal) => terminal.values.as_slice(),
            None => &[],
        }
    }

    /// Follows `key` piece by piece without creating anything.
    pub(crate) fn descend<Q>(&self, key: &Q) -> Option<&Self>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        key.pieces()
            .try_fold(self, |node, piece| node.children.get(&piece))
    }

    /// Mutable counterpart of [`Node::descend`].
    pub(crate) fn descend_mut<Q>(&mut self, key: &Q) -> Option<&mut Self>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        key.pieces()
            .try_fold(self, |node, piece| node.children.get_mut(&piece))
    }

    /// Follows `key`, creating the missing nodes on the way.
    pub(crate) fn descend_or_create(&mut self, key: &K) -> &mut Self {
        key.pieces().fold(self, |node, piece| {
            node.children.entry(piece).or_insert_with(Self::new)
        })
    }

    /// Appends `value`, making this node terminal for `key`.
    pub(crate) fn attach(&mut self, key: K, value: V) -> bool {
        match &mut self.terminal {
            Some(terminal) => {
                terminal.key = key;
                terminal.values.push(value);
                false
            }
            None => {
                let mut values = CollisionList::new();
                values.push(value);
                self.terminal = Some(Terminal { key, values });
                true
            }
        }
    }

    /// Drops the whole collision list. Returns how many values were dropped.
    pub(crate) fn detach(&mut self) -> usize {
        self.terminal
            .take()
            .map_or(0, |terminal| terminal.values.len())
    }

    /// Drops the first value equal to `value`.
    ///
    /// Returns `None` when nothing matched, otherwise whether the node stopped
    /// being terminal.
    pub(crate) fn detach_value(&mut self, value: &V) -> Option<bool>
    where
        V: PartialEq,
    {
        let terminal = self.terminal.as_mut()?;
        let position = terminal
            .values
            .iter()
            .position(|candidate| candidate == value)?;
        terminal.values.remove(position);
        if terminal.values.is_empty() {
            self.terminal = None;
            Some(true)
        } else {
            Some(false)
        }
    }
}
