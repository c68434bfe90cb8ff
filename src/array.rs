//! A sorted, capacity-bounded array of unique `i32` keys.

use std::cmp::{self, Ordering};
use std::fmt;
use std::slice;

/// A strictly increasing buffer of keys with a capacity fixed at creation.
///
/// Lookups bisect the occupied prefix. Insertions and removals shift the
/// tail of the buffer by one slot. The array never grows: inserting into a
/// full array is refused.
///
/// ```
/// use intset::SortedArray;
/// let mut array = SortedArray::with_capacity(3);
/// assert!(array.insert(4));
/// assert!(array.insert(1));
/// assert!(!array.insert(4));
/// assert_eq!(array.as_slice(), &[1, 4]);
/// ```
#[derive(Clone, Default)]
pub struct SortedArray {
    elems: Vec<i32>,
    capacity: usize,
}

impl SortedArray {
    /// Creates an empty array with room for exactly `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elems: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns true if the array contains no keys.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Returns true if no further key can be inserted.
    pub fn is_full(&self) -> bool {
        self.elems.len() == self.capacity
    }

    /// Returns the number of keys in the array.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns the number of keys the array can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the occupied prefix of the buffer.
    pub fn as_slice(&self) -> &[i32] {
        &self.elems
    }

    /// Gets an iterator over the keys in ascending order.
    pub fn iter(&self) -> slice::Iter<'_, i32> {
        self.elems.iter()
    }

    /// Removes all keys. The capacity is kept.
    pub fn clear(&mut self) {
        self.elems.clear();
    }

    /// Bisects the occupied prefix for `key`.
    ///
    /// Returns `Ok` with the index of the key if present, otherwise `Err`
    /// with the index where it would have to be inserted.
    pub fn binary_search(&self, key: i32) -> Result<usize, usize> {
        let mut lower = 0;
        let mut upper = self.elems.len();
        while lower < upper {
            let middle = lower + (upper - lower) / 2;
            match self.elems[middle].cmp(&key) {
                Ordering::Equal => return Ok(middle),
                Ordering::Greater => upper = middle,
                Ordering::Less => lower = middle + 1,
            }
        }
        Err(lower)
    }

    /// Returns true if the array contains the key.
    pub fn contains(&self, key: i32) -> bool {
        self.binary_search(key).is_ok()
    }

    /// Inserts a key at its sorted position.
    /// Returns false and leaves the array untouched if the key is already
    /// present or the array is full.
    pub fn insert(&mut self, key: i32) -> bool {
        match self.binary_search(key) {
            Ok(_) => false,
            Err(_) if self.is_full() => false,
            Err(index) => {
                self.elems.insert(index, key);
                true
            }
        }
    }

    /// Removes a key, shifting the following keys one slot left.
    /// Returns whether the key was previously in the array.
    pub fn remove(&mut self, key: i32) -> bool {
        match self.binary_search(key) {
            Ok(index) => {
                self.elems.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Reallocates the buffer to hold exactly `len()` keys.
    pub fn shrink_to_fit(&mut self) {
        self.elems.shrink_to_fit();
        self.capacity = self.elems.len();
    }

    /// Returns a new array holding every key of `self` or `other`.
    ///
    /// Single two-pointer pass over both arrays. The result is provisioned
    /// for the disjoint case, `len() + other.len()`, then shrunk to fit.
    pub fn union(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.as_slice(), other.as_slice());
        let mut result = Self::with_capacity(lhs.len() + rhs.len());
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() && j < rhs.len() {
            match lhs[i].cmp(&rhs[j]) {
                Ordering::Equal => {
                    result.push(lhs[i]);
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    result.push(lhs[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    result.push(rhs[j]);
                    j += 1;
                }
            }
        }
        // At most one of the remainders is non-empty
        lhs[i..].iter().chain(&rhs[j..]).for_each(|&key| result.push(key));
        result.shrink_to_fit();
        result
    }

    /// Returns a new array holding the keys found both in `self` and `other`.
    ///
    /// Single two-pointer pass over both arrays. The result is provisioned
    /// for the smaller operand, then shrunk to fit.
    pub fn intersection(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.as_slice(), other.as_slice());
        let mut result = Self::with_capacity(cmp::min(lhs.len(), rhs.len()));
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() && j < rhs.len() {
            match lhs[i].cmp(&rhs[j]) {
                Ordering::Equal => {
                    result.push(lhs[i]);
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result.shrink_to_fit();
        result
    }

    /// Asserts that the keys are strictly increasing and within capacity.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        assert!(self.elems.len() <= self.capacity);
        for pair in self.elems.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    // Appends a key known to be greater than every key already present.
    fn push(&mut self, key: i32) {
        debug_assert!(!self.is_full());
        debug_assert!(self.elems.last().map_or(true, |&last| last < key));
        self.elems.push(key);
    }
}

impl PartialEq for SortedArray {
    fn eq(&self, other: &Self) -> bool {
        self.elems == other.elems
    }
}

impl Eq for SortedArray {}

impl fmt::Debug for SortedArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a SortedArray {
    type Item = &'a i32;
    type IntoIter = slice::Iter<'a, i32>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
