//! Point-update / range-query tree.
//!
//! [`RangeTree`] holds a fixed-size sequence of combinable elements and
//! answers aggregate queries over any index range:
//!
//! - `from_slice`: O(n) recursive build
//! - `update_point`: O(log n), rewrites one root-to-leaf path
//! - `query`: O(log n), decomposes the range into covered nodes
//! - `get`: O(log n) descent to the leaf slot
//!
//! Nodes live in a flat `Vec` addressed arithmetically: slot 1 is the
//! root and node `v` has children `2v` and `2v + 1`. No per-node
//! allocation, no pointer chasing.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::combine::Combine;
use crate::combine::Sum;

/// A fixed-size sequence supporting point updates and combined range
/// queries in O(log n) under a pluggable associative combiner.
///
/// Node `v` covering `[l, r]` has children `2v` over `[l, mid]` and
/// `2v + 1` over `[mid + 1, r]`, with `mid = (l + r) / 2`. Every
/// internal slot holds the combined value of its two children; slots no
/// subdivision reaches hold the combiner's identity and are never read.
///
/// The element count is fixed at construction. Only element values
/// change, through [`update_point`](RangeTree::update_point), which
/// rewrites the ancestor path of the touched leaf. All such paths share
/// the root slot, so concurrent updates require external
/// synchronization; no internal locking is provided.
#[derive(Clone, Debug)]
pub struct RangeTree<T, C = Sum> {
    /// Number of logical elements. Fixed for the lifetime of the tree.
    len: usize,
    /// Node slots, sized `4 * len` so any subdivision of `[0, len - 1]`
    /// fits. Slot 0 is unused.
    nodes: Vec<T>,
    /// The combiner, fixed at construction.
    combine: C,
}

impl<T, C> RangeTree<T, C>
where
    T: Clone,
    C: Combine<T>,
{
    /// Create a tree of `len` identity-valued elements with the default
    /// combiner for `C`.
    pub fn new(len: usize) -> RangeTree<T, C>
    where
        C: Default,
    {
        return RangeTree::with_combine(len, C::default());
    }

    /// Create a tree of `len` identity-valued elements using `combine`.
    ///
    /// No build pass is needed: every leaf already holds the identity,
    /// so every internal slot's combined value is the identity too.
    pub fn with_combine(len: usize, combine: C) -> RangeTree<T, C> {
        let nodes = vec![combine.identity(); 4 * len];
        return RangeTree { len, nodes, combine };
    }

    /// Build a tree over a copy of `values` with the default combiner
    /// for `C`.
    pub fn from_slice(values: &[T]) -> RangeTree<T, C>
    where
        C: Default,
    {
        return RangeTree::from_slice_with(values, C::default());
    }

    /// Build a tree over a copy of `values` using `combine`. O(n).
    pub fn from_slice_with(values: &[T], combine: C) -> RangeTree<T, C> {
        let mut tree = RangeTree::with_combine(values.len(), combine);
        if tree.len != 0 {
            tree.build_recursive(values, 1, 0, tree.len - 1);
        }
        return tree;
    }

    /// Replace the element at `index` with `value`, recomputing every
    /// ancestor aggregate on the way back up. O(log n).
    ///
    /// An out-of-range `index` is ignored and the tree is left
    /// unchanged; callers are expected to keep indices valid.
    pub fn update_point(&mut self, index: usize, value: T) {
        if index >= self.len {
            return;
        }
        self.update_recursive(index, value, 1, 0, self.len - 1);
    }

    /// Combine the elements of `[left, right]`, both ends inclusive,
    /// left before right. O(log n).
    ///
    /// An empty or out-of-range request (`left > right` or
    /// `right >= len`) yields the combiner's identity rather than an
    /// error.
    pub fn query(&self, left: usize, right: usize) -> T {
        if left > right || right >= self.len {
            return self.combine.identity();
        }
        return self.query_recursive(left, right, 1, 0, self.len - 1);
    }

    /// Combine all elements. Equivalent to `query(0, len - 1)` but
    /// O(1): the root slot already holds the whole-range aggregate.
    pub fn query_all(&self) -> T {
        if self.len == 0 {
            return self.combine.identity();
        }
        return self.nodes[1].clone();
    }

    /// Fill the subtree at `node`, which covers `values[l..=r]`.
    fn build_recursive(&mut self, values: &[T], node: usize, l: usize, r: usize) {
        if l == r {
            self.nodes[node] = values[l].clone();
        } else {
            let mid = (l + r) / 2;
            self.build_recursive(values, 2 * node, l, mid);
            self.build_recursive(values, 2 * node + 1, mid + 1, r);
            let combined = self.combine.combine(&self.nodes[2 * node], &self.nodes[2 * node + 1]);
            self.nodes[node] = combined;
        }
    }

    /// Descend to leaf `index` within `[l, r]`, replace its value, and
    /// recompute each ancestor in post-order.
    fn update_recursive(&mut self, index: usize, value: T, node: usize, l: usize, r: usize) {
        debug_assert!(l <= index && index <= r, "index outside node range");
        if l == r {
            self.nodes[node] = value;
        } else {
            let mid = (l + r) / 2;
            if index <= mid {
                self.update_recursive(index, value, 2 * node, l, mid);
            } else {
                self.update_recursive(index, value, 2 * node + 1, mid + 1, r);
            }
            let combined = self.combine.combine(&self.nodes[2 * node], &self.nodes[2 * node + 1]);
            self.nodes[node] = combined;
        }
    }

    /// Decompose `[left, right]` over the subtree at `node`, which
    /// covers `[l, r]` and is known to overlap the query range.
    ///
    /// A fully covered node returns its stored aggregate without
    /// descending; a node straddling the query boundary combines its two
    /// partial results left before right.
    fn query_recursive(&self, left: usize, right: usize, node: usize, l: usize, r: usize) -> T {
        debug_assert!(left <= r && l <= right, "query range misses node range");
        if left <= l && r <= right {
            return self.nodes[node].clone();
        }

        let mid = (l + r) / 2;
        if right <= mid {
            return self.query_recursive(left, right, 2 * node, l, mid);
        }
        if left > mid {
            return self.query_recursive(left, right, 2 * node + 1, mid + 1, r);
        }

        let left_part = self.query_recursive(left, right, 2 * node, l, mid);
        let right_part = self.query_recursive(left, right, 2 * node + 1, mid + 1, r);
        return self.combine.combine(&left_part, &right_part);
    }
}

impl<T, C> RangeTree<T, C> {
    /// Number of logical elements. Fixed for the lifetime of the tree.
    #[inline]
    pub fn len(&self) -> usize {
        return self.len;
    }

    /// True if the tree holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Get a reference to the element at `index`, or `None` if out of
    /// range.
    ///
    /// O(log n): leaves are scattered through the slot array, so the
    /// leaf is found by descending from the root.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let mut node = 1;
        let (mut l, mut r) = (0, self.len - 1);
        while l != r {
            let mid = (l + r) / 2;
            if index <= mid {
                node = 2 * node;
                r = mid;
            } else {
                node = 2 * node + 1;
                l = mid + 1;
            }
        }
        return Some(&self.nodes[node]);
    }

    /// Iterate over the elements in index order.
    pub fn iter(&self) -> ElementIterator<'_, T, C> {
        return ElementIterator::new(self);
    }
}

impl<T, C> Default for RangeTree<T, C>
where
    T: Clone,
    C: Combine<T> + Default,
{
    fn default() -> Self {
        return RangeTree::new(0);
    }
}

impl<T, C> FromIterator<T> for RangeTree<T, C>
where
    T: Clone,
    C: Combine<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        return RangeTree::from_slice(&values);
    }
}

impl<T, C> std::ops::Index<usize> for RangeTree<T, C> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => return value,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len, index
            ),
        }
    }
}

/// Iterator over the elements of a [`RangeTree`] in index order.
///
/// Walks the implicit tree with an explicit descent stack, so a full
/// traversal is O(n) rather than n separate O(log n) lookups. The stack
/// holds at most one frame per tree level and stays inline for every
/// practical tree size.
pub struct ElementIterator<'a, T, C> {
    tree: &'a RangeTree<T, C>,
    /// Unvisited subtrees as `(node, l, r)`; the top of the stack is the
    /// leftmost pending subtree.
    stack: SmallVec<[(usize, usize, usize); 32]>,
    /// Elements not yet yielded.
    remaining: usize,
}

impl<'a, T, C> ElementIterator<'a, T, C> {
    fn new(tree: &'a RangeTree<T, C>) -> ElementIterator<'a, T, C> {
        let mut stack = SmallVec::new();
        if tree.len > 0 {
            stack.push((1, 0, tree.len - 1));
        }
        return ElementIterator {
            tree,
            stack,
            remaining: tree.len,
        };
    }
}

impl<'a, T, C> Iterator for ElementIterator<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, l, r)) = self.stack.pop() {
            if l == r {
                self.remaining -= 1;
                return Some(&self.tree.nodes[node]);
            }
            let mid = (l + r) / 2;
            // Right pushed first so the left child is popped first.
            self.stack.push((2 * node + 1, mid + 1, r));
            self.stack.push((2 * node, l, mid));
        }
        return None;
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<'a, T, C> ExactSizeIterator for ElementIterator<'a, T, C> {}

impl<'a, T, C> FusedIterator for ElementIterator<'a, T, C> {}
