//! Range-sum store over per-node meter readings.
//!
//! A complete binary tree laid out in a flat array of `2 * width` slots,
//! where `width` is `len` rounded up to a power of two. Leaves occupy
//! `[width, width + len)`; padding leaves hold zero. Every internal slot `i`
//! holds `tree[2i] + tree[2i + 1]`, so slot 1 is the total.

use thiserror::Error;

use crate::error::define_error_codes;

/// Errors returned by [`SegmentTree`] updates.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SegmentTreeError {
    /// An index outside `[0, len)` was updated.
    #[error("index {index} is out of bounds for a segment tree of {len} values")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of leaves.
        len: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SegmentTreeError`] variants.
    enum SegmentTreeErrorCode for SegmentTreeError {
        /// An index outside the tree was updated.
        IndexOutOfBounds => IndexOutOfBounds { .. } => "SEGMENT_TREE_INDEX_OUT_OF_BOUNDS",
    }
}

/// Point-update, inclusive range-sum tree.
///
/// # Examples
/// ```
/// use gridlink_core::SegmentTree;
///
/// let mut tree = SegmentTree::build(&[5, 1, 4, 2]);
/// assert_eq!(tree.range_sum(1, 2), 5);
/// tree.update(2, 10)?;
/// assert_eq!(tree.total(), 18);
/// assert_eq!(tree.range_sum(3, 50), 2);
/// # Ok::<(), gridlink_core::SegmentTreeError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SegmentTree {
    len: usize,
    width: usize,
    tree: Vec<i64>,
}

impl SegmentTree {
    /// Builds the tree over `values` in `O(len)`.
    #[must_use]
    pub fn build(values: &[i64]) -> Self {
        let len = values.len();
        let width = len.next_power_of_two();
        let mut tree = vec![0_i64; 2 * width];
        tree[width..width + len].copy_from_slice(values);
        for slot in (1..width).rev() {
            tree[slot] = tree[2 * slot].saturating_add(tree[2 * slot + 1]);
        }
        Self { len, width, tree }
    }

    /// Returns the number of leaves.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.len }

    /// Returns `true` when the tree has no leaves.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the sum of every leaf.
    #[must_use]
    pub fn total(&self) -> i64 {
        if self.len == 0 { 0 } else { self.tree[1] }
    }

    /// Returns the leaf at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i64> {
        (index < self.len).then(|| self.tree[self.width + index])
    }

    /// Overwrites the leaf at `index` with `value` and refreshes its
    /// ancestors in `O(log len)`.
    ///
    /// # Errors
    /// Returns [`SegmentTreeError::IndexOutOfBounds`] when `index >= len`.
    pub fn update(&mut self, index: usize, value: i64) -> Result<(), SegmentTreeError> {
        if index >= self.len {
            return Err(SegmentTreeError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        let mut slot = self.width + index;
        self.tree[slot] = value;
        while slot > 1 {
            slot /= 2;
            self.tree[slot] = self.tree[2 * slot].saturating_add(self.tree[2 * slot + 1]);
        }
        Ok(())
    }

    /// Returns the sum of leaves in the inclusive range `[lo, hi]`.
    ///
    /// The range is clipped to `[0, len)`. A range that is inverted or lies
    /// entirely past the end sums to zero.
    #[must_use]
    pub fn range_sum(&self, lo: usize, hi: usize) -> i64 {
        if self.len == 0 || lo > hi || lo >= self.len {
            return 0;
        }
        let hi = hi.min(self.len - 1);

        // Half-open walk over leaf slots [left, right).
        let mut left = self.width + lo;
        let mut right = self.width + hi + 1;
        let mut sum = 0_i64;
        while left < right {
            if left % 2 == 1 {
                sum = sum.saturating_add(self.tree[left]);
                left += 1;
            }
            if right % 2 == 1 {
                right -= 1;
                sum = sum.saturating_add(self.tree[right]);
            }
            left /= 2;
            right /= 2;
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn empty_tree_sums_to_zero() {
        let mut tree = SegmentTree::build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.total(), 0);
        assert_eq!(tree.range_sum(0, 10), 0);
        assert_eq!(
            tree.update(0, 1),
            Err(SegmentTreeError::IndexOutOfBounds { index: 0, len: 0 })
        );
    }

    #[rstest]
    #[case::single(0, 0, 3)]
    #[case::prefix(0, 2, 9)]
    #[case::suffix(3, 4, 13)]
    #[case::whole(0, 4, 22)]
    #[case::clipped(2, 99, 15)]
    #[case::inverted(3, 1, 0)]
    #[case::past_end(5, 9, 0)]
    fn range_sum_cases(#[case] lo: usize, #[case] hi: usize, #[case] expected: i64) {
        let tree = SegmentTree::build(&[3, 4, 2, 6, 7]);
        assert_eq!(tree.range_sum(lo, hi), expected);
    }

    #[test]
    fn update_refreshes_total_and_point() {
        let mut tree = SegmentTree::build(&[3, 4, 2, 6, 7]);
        tree.update(1, -10).expect("in range");
        assert_eq!(tree.get(1), Some(-10));
        assert_eq!(tree.total(), 8);
        assert_eq!(tree.range_sum(0, 1), -7);
        assert_eq!(tree.get(5), None);
    }

    #[test]
    fn rejects_update_past_end() {
        let mut tree = SegmentTree::build(&[1, 2, 3]);
        let error = tree.update(3, 9).expect_err("must fail");
        assert_eq!(error.code().as_str(), "SEGMENT_TREE_INDEX_OUT_OF_BOUNDS");
        assert_eq!(tree.total(), 6);
    }

    proptest! {
        #[test]
        fn total_tracks_leaves_through_updates(
            values in proptest::collection::vec(-1_000_i64..1_000, 1..40),
            updates in proptest::collection::vec((any::<usize>(), -1_000_i64..1_000), 0..40),
        ) {
            let mut leaves = values.clone();
            let mut tree = SegmentTree::build(&values);
            for (seed, value) in updates {
                let index = seed % leaves.len();
                tree.update(index, value).expect("in range");
                leaves[index] = value;
                prop_assert_eq!(tree.range_sum(index, index), value);
                prop_assert_eq!(tree.total(), leaves.iter().sum::<i64>());
            }
        }

        #[test]
        fn range_sum_matches_slice_sum(
            values in proptest::collection::vec(-1_000_i64..1_000, 1..40),
            lo in 0_usize..48,
            hi in 0_usize..48,
        ) {
            let tree = SegmentTree::build(&values);
            let expected = if lo > hi || lo >= values.len() {
                0
            } else {
                values[lo..=hi.min(values.len() - 1)].iter().sum()
            };
            prop_assert_eq!(tree.range_sum(lo, hi), expected);
        }
    }
}
