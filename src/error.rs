//! Error types for the trie.
//!
//! Lookups never fail: a missing key is reported as `false`, `None` or an
//! empty slice. [`TrieError`] covers the remaining conditions: malformed
//! arguments, an enumerator that observed a structural change, and a
//! pattern search stopped by its [`CancellationToken`].
//!
//! [`CancellationToken`]: crate::trie::CancellationToken

/// Errors reported by [`SequenceTrie`](crate::trie::SequenceTrie) and its
/// enumerators.
///
/// # Examples
///
/// ```rust
/// use sequence_trie::{SequenceTrie, TrieError};
///
/// let mut trie: SequenceTrie<String, i32> = SequenceTrie::new();
/// let error = trie.add(String::new(), 1).unwrap_err();
/// assert!(matches!(error, TrieError::InvalidArgument { operation: "add", .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// An argument has a shape the operation cannot accept.
    InvalidArgument {
        /// The operation that rejected the argument.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: &'static str,
    },
    /// The trie was modified after the enumerator captured its generation.
    ConcurrentModification {
        /// The generation captured by the enumerator.
        expected: u64,
        /// The generation observed on the trie.
        found: u64,
    },
    /// A cancellable traversal observed its cancellation token.
    Cancelled,
}

impl TrieError {
    pub(crate) const fn invalid_argument(operation: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { operation, reason }
    }
}

impl std::fmt::Display for TrieError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { operation, reason } => {
                write!(formatter, "{operation}: invalid argument: {reason}")
            }
            Self::ConcurrentModification { expected, found } => write!(
                formatter,
                "trie modified during enumeration (expected generation {expected}, found {found})"
            ),
            Self::Cancelled => write!(formatter, "traversal cancelled"),
        }
    }
}

impl std::error::Error for TrieError {}
