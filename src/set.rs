//! A set of `i32` keys with a backend chosen at creation time.

use std::cmp;
use std::fmt;
use std::iter::{Copied, FusedIterator};
use std::slice;

use crate::array::SortedArray;
use crate::error::{Error, Result};
use crate::tree::{self, AvlTree};

/// Selects the structure backing a [`Set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// An AVL tree: `O(log n)` updates, no capacity bound.
    Tree,
    /// A sorted array bounded by the size hint given at creation.
    Array,
}

/// An ordered set of unique keys backed by either an [`AvlTree`] or a
/// [`SortedArray`].
///
/// The backend is fixed for the lifetime of the set. Union and intersection
/// build a new set of the same backend and require both operands to share
/// it.
///
/// ```
/// use intset::{Backend, Set};
/// let mut a = Set::new(Backend::Array, 3);
/// let mut b = Set::new(Backend::Array, 2);
/// a.insert(3);
/// a.insert(1);
/// b.insert(3);
/// b.insert(7);
/// assert_eq!(a.union(&b)?.to_string(), "{1 3 7 }");
/// assert_eq!(a.intersection(&b)?.to_string(), "{3 }");
/// # Ok::<(), intset::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Set {
    size_hint: usize,
    repr: Repr,
}

#[derive(Clone, PartialEq, Eq)]
enum Repr {
    Tree(AvlTree),
    Array(SortedArray),
}

/// An iterator over the keys of a set in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`Set`].
///
/// [`iter`]: Set::iter
#[derive(Clone, Debug)]
pub enum Iter<'a> {
    Tree(Copied<tree::Iter<'a>>),
    Array(Copied<slice::Iter<'a, i32>>),
}

impl Set {
    /// Creates an empty set.
    ///
    /// `size_hint` is the number of keys the caller intends to insert. An
    /// array-backed set allocates exactly that many slots and refuses
    /// insertions beyond it; a tree-backed set only records it.
    pub fn new(backend: Backend, size_hint: usize) -> Self {
        let repr = match backend {
            Backend::Tree => Repr::Tree(AvlTree::new()),
            Backend::Array => Repr::Array(SortedArray::with_capacity(size_hint)),
        };
        tracing::trace!(%backend, size_hint, "created set");
        Self { size_hint, repr }
    }

    /// Returns the backend chosen at creation.
    pub fn backend(&self) -> Backend {
        match self.repr {
            Repr::Tree(_) => Backend::Tree,
            Repr::Array(_) => Backend::Array,
        }
    }

    /// Returns the size hint given at creation.
    pub fn size_hint(&self) -> usize {
        self.size_hint
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Tree(tree) => tree.len(),
            Repr::Array(array) => array.len(),
        }
    }

    /// Returns true if the set contains no keys.
    pub fn is_empty(&self) -> bool {
        match &self.repr {
            Repr::Tree(tree) => tree.is_empty(),
            Repr::Array(array) => array.is_empty(),
        }
    }

    /// Inserts a key.
    /// Returns false if the key was already present, or if an array-backed
    /// set is full.
    pub fn insert(&mut self, key: i32) -> bool {
        match &mut self.repr {
            Repr::Tree(tree) => tree.insert(key),
            Repr::Array(array) => {
                let full = array.is_full();
                let inserted = array.insert(key);
                if !inserted && full && !array.contains(key) {
                    tracing::debug!(key, capacity = array.capacity(), "array is full, key refused");
                }
                inserted
            }
        }
    }

    /// Removes a key.
    /// Returns whether the key was previously in the set.
    pub fn remove(&mut self, key: i32) -> bool {
        match &mut self.repr {
            Repr::Tree(tree) => tree.remove(key),
            Repr::Array(array) => array.remove(key),
        }
    }

    /// Returns true if the set contains the key.
    pub fn contains(&self, key: i32) -> bool {
        match &self.repr {
            Repr::Tree(tree) => tree.contains(key),
            Repr::Array(array) => array.contains(key),
        }
    }

    /// Removes all keys, releasing the memory held by a tree backend.
    pub fn clear(&mut self) {
        match &mut self.repr {
            Repr::Tree(tree) => tree.clear(),
            Repr::Array(array) => array.clear(),
        }
    }

    /// Gets an iterator over the keys of the set in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        match &self.repr {
            Repr::Tree(tree) => Iter::Tree(tree.iter().copied()),
            Repr::Array(array) => Iter::Array(array.iter().copied()),
        }
    }

    /// Returns a new set holding every key of `self` or `other`.
    ///
    /// Array-backed sets are merged in a single linear pass. Tree-backed
    /// sets copy `self` and insert each key of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendMismatch`] if the sets use different backends.
    pub fn union(&self, other: &Self) -> Result<Self> {
        let repr = match (&self.repr, &other.repr) {
            (Repr::Tree(lhs), Repr::Tree(rhs)) => Repr::Tree(lhs.union(rhs)),
            (Repr::Array(lhs), Repr::Array(rhs)) => Repr::Array(lhs.union(rhs)),
            _ => return Err(self.mismatch(other)),
        };
        let result = Self {
            size_hint: self.size_hint + other.size_hint,
            repr,
        };
        tracing::debug!(
            backend = %result.backend(),
            lhs = self.len(),
            rhs = other.len(),
            result = result.len(),
            "union"
        );
        Ok(result)
    }

    /// Returns a new set holding the keys found both in `self` and `other`.
    ///
    /// Array-backed sets are merged in a single linear pass. Tree-backed
    /// sets walk the operand with the smaller size hint and probe the other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendMismatch`] if the sets use different backends.
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        let repr = match (&self.repr, &other.repr) {
            (Repr::Tree(lhs), Repr::Tree(rhs)) => {
                if self.size_hint >= other.size_hint {
                    Repr::Tree(rhs.intersection(lhs))
                } else {
                    Repr::Tree(lhs.intersection(rhs))
                }
            }
            (Repr::Array(lhs), Repr::Array(rhs)) => Repr::Array(lhs.intersection(rhs)),
            _ => return Err(self.mismatch(other)),
        };
        let result = Self {
            size_hint: cmp::min(self.size_hint, other.size_hint),
            repr,
        };
        tracing::debug!(
            backend = %result.backend(),
            lhs = self.len(),
            rhs = other.len(),
            result = result.len(),
            "intersection"
        );
        Ok(result)
    }

    /// Asserts that the backing structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        match &self.repr {
            Repr::Tree(tree) => tree.check_consistency(),
            Repr::Array(array) => array.check_consistency(),
        }
    }

    fn mismatch(&self, other: &Self) -> Error {
        let error = Error::BackendMismatch {
            lhs: self.backend(),
            rhs: other.backend(),
        };
        tracing::warn!(%error, "rejected set operation");
        error
    }
}

impl TryFrom<i64> for Backend {
    type Error = Error;

    /// Decodes the numeric tag used on the command line: `0` selects the
    /// tree, `1` the array.
    fn try_from(tag: i64) -> Result<Self> {
        match tag {
            0 => Ok(Backend::Tree),
            1 => Ok(Backend::Array),
            _ => Err(Error::UnknownBackend(tag)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Backend::Tree => "tree",
            Backend::Array => "array",
        })
    }
}

/// Renders the keys in ascending order, each followed by a space, between
/// braces: `{1 3 4 }`, or `{}` when empty.
impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{")?;
        for key in self {
            write!(f, "{} ", key)?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Set<{}>", self.backend())?;
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = i32;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<i32> for Set {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |key| {
            self.insert(key);
        });
    }
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Tree(iter) => iter.next(),
            Iter::Array(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Tree(iter) => iter.size_hint(),
            Iter::Array(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
