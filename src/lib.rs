//! # sequence-trie
//!
//! A trie over sequences of arbitrary ordered pieces, with collision lists,
//! fail-fast enumeration and reverse wildcard matching.
//!
//! ## Overview
//!
//! - **[`SequenceTrie`]**: every level is an ordered map from the next piece to
//!   the child node, so keys need not be strings: any [`Pieces`] type works.
//!   Adding under an existing key appends to that key's collision list.
//! - **Enumeration**: [`SequenceTrie::iter`] walks keys in lexicographic piece
//!   order; a [`Cursor`] does the same without borrowing the trie and fails
//!   with [`TrieError::ConcurrentModification`] when the trie changed under it.
//! - **Pattern search**: stored keys may contain the two [`Wildcards`] pieces;
//!   [`SequenceTrie::pattern_search`] returns every value whose pattern a
//!   concrete query satisfies.
//! - **Sharing**: [`SharedSequenceTrie`] puts a trie behind a reader-writer
//!   lock for use from several threads.
//!
//! ## Feature Flags
//!
//! - `shared` (default): [`SharedSequenceTrie`] and [`SharedEnumerator`]
//! - `serde`: `Serialize`/`Deserialize` for [`SequenceTrie`]
//! - `fxhash`: faster hashing of search states in pattern search
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use sequence_trie::prelude::*;
//!
//! let mut patterns = SequenceTrie::with_wildcards(Wildcards::new('?', '*').unwrap());
//! patterns.add("c?t".to_string(), "three letters").unwrap();
//! patterns.add("c*".to_string(), "starts with c").unwrap();
//!
//! let mut matched = patterns.pattern_search("cat");
//! matched.sort();
//! assert_eq!(matched, vec![&"starts with c", &"three letters"]);
//! assert!(patterns.pattern_search("dog").is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use sequence_trie::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;
    pub use crate::trie::*;

    #[cfg(feature = "shared")]
    pub use crate::shared::*;
}

mod error;

pub mod trie;

#[cfg(feature = "shared")]
mod shared;

pub use error::TrieError;
pub use trie::{
    CancellationToken, Cursor, EnumeratorState, Iter, Keys, Pieces, SequenceTrie, Values,
    Wildcards,
};

#[cfg(feature = "shared")]
pub use shared::{SharedEnumerator, SharedSequenceTrie};
