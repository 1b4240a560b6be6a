//! Reverse wildcard matching.
//!
//! Conventional pattern matching tests one pattern against many inputs. Here
//! the trie stores many patterns and one concrete query is tested against all
//! of them at once. Two reserved pieces, configured through [`Wildcards`], may
//! appear in stored keys:
//!
//! - `any_one` matches exactly one arbitrary query piece;
//! - `any_sequence` matches zero or more arbitrary query pieces.
//!
//! Every other stored piece must equal the query piece at the same position.
//!
//! # Search
//!
//! The matcher walks states `(node, consumed)`: a trie node together with the
//! number of query pieces consumed to reach it. From each state it follows
//! the literal child equal to the next query piece, the `any_one` child, and
//! the `any_sequence` child once per possible consumption length. A state
//! with the whole query consumed at a terminal node is a match.
//!
//! States are remembered, so each one is expanded at most once and each stored
//! pattern contributes its collision list at most once. The work is bounded by
//! the number of nodes times the query length plus one.
//!
//! # Examples
//!
//! ```rust
//! use sequence_trie::{SequenceTrie, Wildcards};
//!
//! let mut patterns = SequenceTrie::with_wildcards(Wildcards::new('?', '*').unwrap());
//! patterns.add("a*c".to_string(), "a-star-c").unwrap();
//! patterns.add("ab?".to_string(), "a-b-any").unwrap();
//! patterns.add("x*".to_string(), "x-prefix").unwrap();
//!
//! let mut matched = patterns.pattern_search("abc");
//! matched.sort();
//! assert_eq!(matched, vec![&"a-b-any", &"a-star-c"]);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use super::node::Node;
use super::{Pieces, SequenceTrie};
use crate::TrieError;

#[cfg(feature = "fxhash")]
type StateSet = rustc_hash::FxHashSet<(usize, usize)>;

#[cfg(not(feature = "fxhash"))]
type StateSet = std::collections::HashSet<(usize, usize)>;

// =============================================================================
// Wildcards
// =============================================================================

/// The two reserved pieces a pattern trie recognises.
///
/// # Examples
///
/// ```rust
/// use sequence_trie::Wildcards;
///
/// let wildcards = Wildcards::new('?', '*').unwrap();
/// assert!(wildcards.is_wildcard(&'*'));
/// assert!(!wildcards.is_wildcard(&'a'));
///
/// assert!(Wildcards::new('*', '*').is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wildcards<P> {
    any_one: P,
    any_sequence: P,
}

impl<P: Ord> Wildcards<P> {
    /// Creates the wildcard pair.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidArgument`] if both pieces are equal.
    pub fn new(any_one: P, any_sequence: P) -> Result<Self, TrieError> {
        if any_one == any_sequence {
            return Err(TrieError::invalid_argument(
                "Wildcards::new",
                "any_one and any_sequence must differ",
            ));
        }
        Ok(Self {
            any_one,
            any_sequence,
        })
    }

    /// The piece matching exactly one query piece.
    #[inline]
    pub const fn any_one(&self) -> &P {
        &self.any_one
    }

    /// The piece matching any run of query pieces, including none.
    #[inline]
    pub const fn any_sequence(&self) -> &P {
        &self.any_sequence
    }

    /// Returns `true` if `piece` is one of the two wildcards.
    #[inline]
    pub fn is_wildcard(&self, piece: &P) -> bool {
        *piece == self.any_one || *piece == self.any_sequence
    }
}

// =============================================================================
// Cancellation
// =============================================================================

/// A flag that stops a running pattern search between two descents.
///
/// Clones share the flag, so a token handed to another thread can cancel a
/// search running here.
///
/// # Examples
///
/// ```rust
/// use sequence_trie::CancellationToken;
///
/// let token = CancellationToken::new();
/// let remote = token.clone();
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`CancellationToken::cancel`] was called on any
    /// clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

// =============================================================================
// Pattern Search
// =============================================================================

impl<K: Pieces, V> SequenceTrie<K, V> {
    /// Returns every value whose stored pattern is satisfied by `query`.
    ///
    /// Values of one pattern keep their insertion order. Patterns are reported
    /// in discovery order: at each node the literal continuation is explored
    /// before `any_one`, and `any_one` before `any_sequence`. An empty query
    /// matches nothing. On a trie built without [`Wildcards`] every stored
    /// piece is literal and this is an exact lookup.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sequence_trie::{SequenceTrie, Wildcards};
    ///
    /// let mut patterns = SequenceTrie::with_wildcards(Wildcards::new('?', '*').unwrap());
    /// patterns.add("a*z".to_string(), 1).unwrap();
    ///
    /// assert_eq!(patterns.pattern_search("az"), vec![&1]);
    /// assert_eq!(patterns.pattern_search("abcz"), vec![&1]);
    /// assert!(patterns.pattern_search("zz").is_empty());
    /// ```
    #[must_use]
    pub fn pattern_search<Q>(&self, query: &Q) -> Vec<&V>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        let query: Vec<K::Piece> = query.pieces().collect();
        Matcher::new(&self.root, &query, self.wildcards.as_ref())
            .run(|| false)
            .unwrap_or_default()
    }

    /// Like [`SequenceTrie::pattern_search`], checking `token` before every
    /// descent.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::Cancelled`] once the token is observed cancelled.
    pub fn pattern_search_cancellable<Q>(
        &self,
        query: &Q,
        token: &CancellationToken,
    ) -> Result<Vec<&V>, TrieError>
    where
        Q: Pieces<Piece = K::Piece> + ?Sized,
    {
        let query: Vec<K::Piece> = query.pieces().collect();
        Matcher::new(&self.root, &query, self.wildcards.as_ref())
            .run(|| token.is_cancelled())
            .ok_or_else(|| {
                debug!("pattern_search: cancelled");
                TrieError::Cancelled
            })
    }
}

struct Matcher<'a, 'q, K: Pieces, V> {
    root: &'a Node<K, V>,
    query: &'q [K::Piece],
    wildcards: Option<&'a Wildcards<K::Piece>>,
}

impl<'a, 'q, K: Pieces, V> Matcher<'a, 'q, K, V> {
    const fn new(
        root: &'a Node<K, V>,
        query: &'q [K::Piece],
        wildcards: Option<&'a Wildcards<K::Piece>>,
    ) -> Self {
        Self {
            root,
            query,
            wildcards,
        }
    }

    /// Runs the search. Returns `None` if `cancelled` reported `true`.
    fn run(&self, cancelled: impl Fn() -> bool) -> Option<Vec<&'a V>> {
        let mut matches = Vec::new();
        if self.query.is_empty() {
            return Some(matches);
        }

        let mut visited = StateSet::default();
        let mut pending: Vec<(&'a Node<K, V>, usize)> = vec![(self.root, 0)];

        while let Some((node, consumed)) = pending.pop() {
            if cancelled() {
                return None;
            }
            if !visited.insert((std::ptr::from_ref(node).addr(), consumed)) {
                continue;
            }
            if consumed == self.query.len() {
                matches.extend(node.values());
            }
            self.expand(node, consumed, &mut pending);
        }

        Some(matches)
    }

    /// Pushes the successors of `(node, consumed)`, the one to explore first
    /// pushed last.
    fn expand(
        &self,
        node: &'a Node<K, V>,
        consumed: usize,
        pending: &mut Vec<(&'a Node<K, V>, usize)>,
    ) {
        let next = self.query.get(consumed);

        if let Some(wildcards) = self.wildcards {
            if let Some(child) = node.children.get(wildcards.any_sequence()) {
                pending.extend((consumed..=self.query.len()).rev().map(|end| (child, end)));
            }
            if next.is_some()
                && let Some(child) = node.children.get(wildcards.any_one())
            {
                pending.push((child, consumed + 1));
            }
        }

        if let Some(piece) = next {
            let reserved = self
                .wildcards
                .is_some_and(|wildcards| wildcards.is_wildcard(piece));
            if !reserved && let Some(child) = node.children.get(piece) {
                pending.push((child, consumed + 1));
            }
        }
    }
}
