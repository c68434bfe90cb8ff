//! An AVL tree of unique `i32` keys.

use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// A self-balancing binary search tree of unique keys.
///
/// Every node owns its subtrees outright; there are no parent links and no
/// shared nodes. Insertion and removal recurse down the access path and
/// restore the AVL condition on the way back up, so the recursion depth is
/// bounded by the tree height, which is `O(log n)`.
///
/// ```
/// use intset::AvlTree;
/// let mut tree = AvlTree::new();
/// assert!(tree.insert(5));
/// assert!(tree.insert(3));
/// assert!(!tree.insert(5));
/// assert!(tree.contains(3));
/// assert!(tree.remove(3));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5]);
/// ```
#[derive(Clone, Default)]
pub struct AvlTree {
    root: Link,
    num_nodes: usize,
}

#[derive(Clone)]
struct Node {
    key: i32,
    left: Link,
    right: Link,
    height: i32,
}

type Link = Option<Box<Node>>;

/// An iterator over the keys of a tree in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`AvlTree`].
///
/// [`iter`]: AvlTree::iter
#[derive(Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl AvlTree {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree.
    /// A single node has height 0, the empty tree has height -1.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Removes all keys, deallocating every node children first.
    pub fn clear(&mut self) {
        Node::destroy(self.root.take());
        self.num_nodes = 0;
    }

    /// Returns true if the tree contains the key.
    pub fn contains(&self, key: i32) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Returns the smallest key in the tree.
    pub fn first(&self) -> Option<i32> {
        self.root.as_deref().map(Node::min_key)
    }

    /// Returns the largest key in the tree.
    pub fn last(&self) -> Option<i32> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(node.key)
    }

    /// Inserts a key into the tree.
    /// Returns false and leaves the tree untouched if the key is already present.
    pub fn insert(&mut self, key: i32) -> bool {
        let mut inserted = false;
        self.root = Some(Self::insert_into(self.root.take(), key, &mut inserted));
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn remove(&mut self, key: i32) -> bool {
        let mut removed = false;
        self.root = Self::remove_from(self.root.take(), key, &mut removed);
        if removed {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Gets an iterator over the keys of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root, self.num_nodes)
    }

    /// Returns a new tree holding every key of `self` or `other`.
    ///
    /// Starts from a copy of `self` and inserts each key of `other`, so the
    /// cost is `O(m log(n + m))` rather than a linear merge.
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for &key in other {
            result.insert(key);
        }
        result
    }

    /// Returns a new tree holding the keys found both in `self` and `other`.
    ///
    /// Walks `self` and probes `other` for each key: `O(n log m)`.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = Self::new();
        for &key in self {
            if other.contains(key) {
                result.insert(key);
            }
        }
        result
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let (_, num_nodes) = Self::check_subtree(&self.root, None, None);
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.root.is_none(), self.num_nodes == 0);
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn check_subtree(link: &Link, lower: Option<i32>, upper: Option<i32>) -> (i32, usize) {
        let node = match link {
            None => return (-1, 0),
            Some(node) => node,
        };

        // Check search order against the bounds inherited from ancestors
        if let Some(lower) = lower {
            assert!(node.key > lower);
        }
        if let Some(upper) = upper {
            assert!(node.key < upper);
        }

        let (left_height, left_nodes) = Self::check_subtree(&node.left, lower, Some(node.key));
        let (right_height, right_nodes) = Self::check_subtree(&node.right, Some(node.key), upper);

        // Check cached height
        assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

        // Check AVL condition (nearly balance)
        assert!(left_height <= right_height + 1);
        assert!(right_height <= left_height + 1);

        (node.height, left_nodes + right_nodes + 1)
    }

    fn insert_into(link: Link, key: i32, inserted: &mut bool) -> Box<Node> {
        let mut node = match link {
            None => {
                *inserted = true;
                return Node::create(key);
            }
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Equal => return node,
            Ordering::Less => node.left = Some(Self::insert_into(node.left.take(), key, inserted)),
            Ordering::Greater => {
                node.right = Some(Self::insert_into(node.right.take(), key, inserted))
            }
        }
        if !*inserted {
            return node;
        }
        Self::rebalance_node(node)
    }

    fn remove_from(link: Link, key: i32, removed: &mut bool) -> Link {
        let mut node = link?;
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Self::remove_from(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::remove_from(node.right.take(), key, removed),
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    // Node to-remove is stem or leaf, replace it by its only child
                    (None, child) | (child, None) => return child,
                    (Some(left), Some(right)) => {
                        // Take over the smallest key of the right subtree and remove it there
                        let successor = right.min_key();
                        node.key = successor;
                        node.left = Some(left);
                        node.right = Self::remove_from(Some(right), successor, &mut true);
                    }
                }
            }
        }
        if !*removed {
            return Some(node);
        }
        Some(Self::rebalance_node(node))
    }

    fn rotate_left(mut node: Box<Node>) -> Box<Node> {
        let mut right = match node.right.take() {
            None => return node,
            Some(right) => right,
        };
        node.right = right.left.take();
        node.adjust_height();
        right.left = Some(node);
        right.adjust_height();
        right
    }

    fn rotate_right(mut node: Box<Node>) -> Box<Node> {
        let mut left = match node.left.take() {
            None => return node,
            Some(left) => left,
        };
        node.left = left.right.take();
        node.adjust_height();
        left.right = Some(node);
        left.adjust_height();
        left
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Both subtrees must already be balanced with correct heights, and their
    /// heights may differ by at most 2, which always holds after a single update.
    /// Returns the new root of the subtree.
    fn rebalance_node(mut node: Box<Node>) -> Box<Node> {
        let balance = node.balance();
        debug_assert!((-2..=2).contains(&balance));
        if balance > 1 {
            // Left-right case needs the left child turned left-heavy first
            if node.left.as_deref().map_or(0, Node::balance) < 0 {
                node.left = node.left.take().map(Self::rotate_left);
            }
            Self::rotate_right(node)
        } else if balance < -1 {
            // Right-left case needs the right child turned right-heavy first
            if node.right.as_deref().map_or(0, Node::balance) > 0 {
                node.right = node.right.take().map(Self::rotate_right);
            }
            Self::rotate_left(node)
        } else {
            node.adjust_height();
            node
        }
    }
}

impl Drop for AvlTree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl PartialEq for AvlTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for AvlTree {}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<i32> for AvlTree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for AvlTree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |key| {
            self.insert(key);
        });
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = &'a i32;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn height(link: &Link) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

impl Node {
    fn create(key: i32) -> Box<Node> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 0,
        })
    }

    // Post-order: both subtrees are released before the node itself.
    fn destroy(link: Link) {
        if let Some(mut node) = link {
            Self::destroy(node.left.take());
            Self::destroy(node.right.take());
        }
    }

    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn min_key(&self) -> i32 {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node.key
    }
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a i32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::AvlTree;

    #[test]
    fn test_empty() {
        let tree = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.iter().next(), None);
        tree.check_consistency();
    }

    #[test]
    fn test_single_node_height() {
        let mut tree = AvlTree::new();
        tree.insert(7);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first(), Some(7));
        assert_eq!(tree.last(), Some(7));
        tree.check_consistency();
    }

    #[test]
    fn test_remove_node_with_two_children() {
        //     4           5
        //    / \         / \
        //   2   6  ->   2   6
        //  / \ / \     / \   \
        // 1  3 5  7   1   3   7
        let mut tree: AvlTree = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
        tree.check_consistency();
        assert!(tree.remove(4));
        tree.check_consistency();
        assert!(!tree.contains(4));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_remove_absent() {
        let mut tree: AvlTree = [5, 3, 8].into_iter().collect();
        let before = tree.clone();
        assert!(!tree.remove(99));
        assert_eq!(tree, before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut tree: AvlTree = (0..10).collect();
        let copy = tree.clone();
        tree.remove(3);
        tree.insert(42);
        assert!(copy.contains(3));
        assert!(!copy.contains(42));
        copy.check_consistency();
        tree.check_consistency();
    }

    #[test]
    fn test_iter_size_hint() {
        let tree: AvlTree = [9, 1, 5].into_iter().collect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!(format!("{:?}", iter), "[5, 9]");
        assert_eq!(format!("{:?}", tree), "{1, 5, 9}");
    }

    #[test]
    fn test_union_and_intersection() {
        let lhs: AvlTree = [5, 3, 8, 1, 4].into_iter().collect();
        let rhs: AvlTree = [8, 4, 9].into_iter().collect();

        let union = lhs.union(&rhs);
        union.check_consistency();
        assert_eq!(union.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8, 9]);

        let intersection = lhs.intersection(&rhs);
        intersection.check_consistency();
        assert_eq!(intersection.iter().copied().collect::<Vec<_>>(), vec![4, 8]);

        // Operands are left untouched
        assert_eq!(lhs.len(), 5);
        assert_eq!(rhs.len(), 3);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut tree: AvlTree = (0..100).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert!(tree.insert(1));
        tree.check_consistency();
    }
}
