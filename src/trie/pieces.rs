//! Keys as sequences of ordered pieces.
//!
//! A [`SequenceTrie`](super::SequenceTrie) never looks at its keys as a whole:
//! it walks them one piece at a time. [`Pieces`] is the view that makes a key
//! type walkable. Strings are walked by `char`, slices and vectors by element.

/// A key that can be walked as a sequence of ordered pieces.
///
/// Lookups on a trie keyed by `K` accept any `Q: Pieces<Piece = K::Piece>`,
/// so a `SequenceTrie<String, _>` can be queried with `&str`, and a
/// `SequenceTrie<Vec<u8>, _>` with a byte slice or array.
///
/// # Examples
///
/// ```rust
/// use sequence_trie::Pieces;
///
/// let pieces: Vec<char> = "cat".pieces().collect();
/// assert_eq!(pieces, vec!['c', 'a', 't']);
///
/// let pieces: Vec<u8> = [1u8, 2, 3].pieces().collect();
/// assert_eq!(pieces, vec![1, 2, 3]);
/// ```
pub trait Pieces {
    /// One element of the key.
    type Piece: Ord + Clone;

    /// Iterator over the pieces of a key, front to back.
    type Iter<'a>: Iterator<Item = Self::Piece>
    where
        Self: 'a;

    /// Returns the pieces of this key.
    fn pieces(&self) -> Self::Iter<'_>;

    /// Returns `true` if the key has no pieces.
    fn is_empty_key(&self) -> bool {
        self.pieces().next().is_none()
    }
}

impl Pieces for str {
    type Piece = char;
    type Iter<'a> = std::str::Chars<'a>;

    #[inline]
    fn pieces(&self) -> Self::Iter<'_> {
        self.chars()
    }

    #[inline]
    fn is_empty_key(&self) -> bool {
        self.is_empty()
    }
}

impl Pieces for String {
    type Piece = char;
    type Iter<'a> = std::str::Chars<'a>;

    #[inline]
    fn pieces(&self) -> Self::Iter<'_> {
        self.chars()
    }

    #[inline]
    fn is_empty_key(&self) -> bool {
        self.is_empty()
    }
}

impl Pieces for Box<str> {
    type Piece = char;
    type Iter<'a> = std::str::Chars<'a>;

    #[inline]
    fn pieces(&self) -> Self::Iter<'_> {
        self.chars()
    }
}

impl<T: Ord + Clone> Pieces for [T] {
    type Piece = T;
    type Iter<'a>
        = std::iter::Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    #[inline]
    fn pieces(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }

    #[inline]
    fn is_empty_key(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Ord + Clone> Pieces for Vec<T> {
    type Piece = T;
    type Iter<'a>
        = std::iter::Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    #[inline]
    fn pieces(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }

    #[inline]
    fn is_empty_key(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Ord + Clone, const N: usize> Pieces for [T; N] {
    type Piece = T;
    type Iter<'a>
        = std::iter::Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    #[inline]
    fn pieces(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }

    #[inline]
    fn is_empty_key(&self) -> bool {
        N == 0
    }
}

impl<Q: Pieces + ?Sized> Pieces for &Q {
    type Piece = Q::Piece;
    type Iter<'a>
        = Q::Iter<'a>
    where
        Self: 'a;

    #[inline]
    fn pieces(&self) -> Self::Iter<'_> {
        (**self).pieces()
    }

    #[inline]
    fn is_empty_key(&self) -> bool {
        (**self).is_empty_key()
    }
}
