//! The trie engine and its enumerators.
//!
//! - [`SequenceTrie`]: the trie itself, with collision lists per key
//! - [`Pieces`]: how a key type is walked piece by piece
//! - [`Iter`], [`Keys`], [`Values`]: borrowing, ordered iterators
//! - [`Cursor`]: a detached enumerator that fails fast on mutation
//! - [`Wildcards`], [`CancellationToken`]: configuration and control of
//!   [`SequenceTrie::pattern_search`]
//!
//! # Examples
//!
//! ## Collision lists
//!
//! ```rust
//! use sequence_trie::trie::SequenceTrie;
//!
//! let mut trie = SequenceTrie::new();
//! trie.add("key".to_string(), "first").unwrap();
//! trie.add("key".to_string(), "second").unwrap();
//!
//! assert_eq!(trie.try_get("key"), Some(&"first"));
//! assert_eq!(trie.search("key"), &["first", "second"]);
//! ```
//!
//! ## Ordered enumeration over non-character pieces
//!
//! ```rust
//! use sequence_trie::trie::SequenceTrie;
//!
//! let mut trie: SequenceTrie<Vec<u32>, &str> = SequenceTrie::new();
//! trie.add(vec![2, 1], "two-one").unwrap();
//! trie.add(vec![1, 9, 9], "one-nine-nine").unwrap();
//! trie.add(vec![1, 9], "one-nine").unwrap();
//!
//! let values: Vec<&&str> = trie.values().collect();
//! assert_eq!(values, vec![&"one-nine", &"one-nine-nine", &"two-one"]);
//! ```
//!
//! ## Pattern search
//!
//! ```rust
//! use sequence_trie::trie::{SequenceTrie, Wildcards};
//!
//! let wildcards = Wildcards::new('?', '*').unwrap();
//! let mut routes = SequenceTrie::with_wildcards(wildcards);
//! routes.add("/users/*".to_string(), "users").unwrap();
//! routes.add("/users/?".to_string(), "single-char-user").unwrap();
//!
//! let mut matched = routes.pattern_search("/users/7");
//! matched.sort();
//! assert_eq!(matched, vec![&"single-char-user", &"users"]);
//! ```

mod cursor;
mod iter;
mod node;
mod pattern;
mod pieces;
mod sequence_trie;

pub use cursor::Cursor;
pub use cursor::EnumeratorState;
pub use iter::Iter;
pub use iter::Keys;
pub use iter::Values;
pub use pattern::CancellationToken;
pub use pattern::Wildcards;
pub use pieces::Pieces;
pub use sequence_trie::SequenceTrie;
