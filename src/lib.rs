//! Ordered sets of `i32` keys with two interchangeable backends.
//!
//! A [`Set`] is backed either by an [`AvlTree`] or by a [`SortedArray`],
//! selected through [`Backend`] when the set is created. Both backends offer
//! membership tests, insertion and removal, and both build a fresh set for
//! union and intersection:
//!
//! - the array backend merges its two operands in a single linear pass,
//! - the tree backend inserts one operand into a copy of the other, which
//!   costs `O(m log(n + m))`.
//!
//! Pick the backend whose cost profile suits the workload.
//!
//! ```
//! use intset::{Backend, Set};
//!
//! let mut a = Set::new(Backend::Tree, 5);
//! let mut b = Set::new(Backend::Tree, 3);
//! a.extend([5, 3, 8, 1, 4]);
//! b.extend([8, 4, 9]);
//!
//! assert!(a.contains(8));
//! assert_eq!(a.union(&b)?.to_string(), "{1 3 4 5 8 9 }");
//! assert_eq!(a.intersection(&b)?.to_string(), "{4 8 }");
//! # Ok::<(), intset::Error>(())
//! ```
//!
//! # Memory
//!
//! Allocation failure is not reported through `Result`. Like the standard
//! collections, every structure here relies on the global allocator, which
//! aborts the process when memory is exhausted.

mod array;
mod error;
mod set;
mod tree;

pub use array::SortedArray;
pub use error::{Error, Result};
pub use set::{Backend, Iter, Set};
pub use tree::{AvlTree, Iter as TreeIter};
