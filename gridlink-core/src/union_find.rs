//! Sequential union-find over dense node ids.
//!
//! Union by rank with path compression. Ties in rank resolve to the smaller
//! root id so that repeated runs over the same input produce the same forest.

use thiserror::Error;

use crate::error::define_error_codes;

/// Errors returned by [`DisjointSet`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DisjointSetError {
    /// An element outside `[0, len)` was supplied.
    #[error("element {element} is out of bounds for a disjoint set of {len} elements")]
    OutOfBounds {
        /// The offending element.
        element: usize,
        /// Number of elements tracked by the set.
        len: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DisjointSetError`] variants.
    enum DisjointSetErrorCode for DisjointSetError {
        /// An element outside the set was supplied.
        OutOfBounds => OutOfBounds { .. } => "DISJOINT_SET_OUT_OF_BOUNDS",
    }
}

/// Partition of `[0, n)` into connectivity classes.
///
/// # Examples
/// ```
/// use gridlink_core::DisjointSet;
///
/// let mut set = DisjointSet::new(4);
/// assert!(set.union(0, 1)?);
/// assert!(!set.union(1, 0)?);
/// assert!(set.same_set(0, 1)?);
/// assert_eq!(set.components(), 3);
/// # Ok::<(), gridlink_core::DisjointSetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parents: Vec<usize>,
    ranks: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    /// Creates `len` singleton classes.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parents: (0..len).collect(),
            ranks: vec![0; len],
            components: len,
        }
    }

    /// Returns the number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns `true` when the set tracks no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns the number of live classes.
    #[must_use]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the representative of `element`'s class.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::OutOfBounds`] when `element >= len`.
    pub fn find(&mut self, element: usize) -> Result<usize, DisjointSetError> {
        self.check(element)?;
        let mut root = element;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        let mut current = element;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }
        Ok(root)
    }

    /// Merges the classes of `left` and `right`.
    ///
    /// Returns `true` when two distinct classes were merged and `false` when
    /// both elements already shared a class.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::OutOfBounds`] when either element is
    /// outside the set.
    pub fn union(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        let left_root = self.find(left)?;
        let right_root = self.find(right)?;
        if left_root == right_root {
            return Ok(false);
        }

        let left_rank = self.ranks[left_root];
        let right_rank = self.ranks[right_root];
        let (parent, child) = choose_parent_child(left_root, right_root, left_rank, right_rank);
        self.parents[child] = parent;
        if left_rank == right_rank {
            self.ranks[parent] = self.ranks[parent].saturating_add(1);
        }
        self.components -= 1;
        Ok(true)
    }

    /// Returns `true` when both elements belong to the same class.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::OutOfBounds`] when either element is
    /// outside the set.
    pub fn same_set(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        Ok(self.find(left)? == self.find(right)?)
    }

    fn check(&self, element: usize) -> Result<(), DisjointSetError> {
        if element < self.parents.len() {
            Ok(())
        } else {
            Err(DisjointSetError::OutOfBounds {
                element,
                len: self.parents.len(),
            })
        }
    }
}

fn choose_parent_child(
    left_root: usize,
    right_root: usize,
    left_rank: u8,
    right_rank: u8,
) -> (usize, usize) {
    if left_rank > right_rank {
        return (left_root, right_root);
    }
    if right_rank > left_rank {
        return (right_root, left_root);
    }
    if left_root <= right_root {
        (left_root, right_root)
    } else {
        (right_root, left_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn starts_with_singletons() {
        let mut set = DisjointSet::new(3);
        assert_eq!(set.components(), 3);
        for element in 0..3 {
            assert_eq!(set.find(element), Ok(element));
        }
    }

    #[rstest]
    #[case::find_past_end(DisjointSet::new(2).find(2))]
    #[case::empty_set(DisjointSet::new(0).find(0))]
    fn find_is_bounds_checked(#[case] result: Result<usize, DisjointSetError>) {
        let err = result.expect_err("out-of-range element must fail");
        assert_eq!(err.code().as_str(), "DISJOINT_SET_OUT_OF_BOUNDS");
    }

    #[test]
    fn union_is_bounds_checked() {
        let mut set = DisjointSet::new(2);
        assert_eq!(
            set.union(0, 5),
            Err(DisjointSetError::OutOfBounds { element: 5, len: 2 })
        );
        assert_eq!(set.components(), 2);
    }

    #[test]
    fn equal_ranks_prefer_smaller_root() {
        let mut set = DisjointSet::new(4);
        set.union(3, 2).expect("in range");
        assert_eq!(set.find(3), Ok(2));
        set.union(1, 0).expect("in range");
        set.union(3, 1).expect("in range");
        assert_eq!(set.find(3), Ok(0));
        assert_eq!(set.components(), 1);
    }

    #[test]
    fn path_compression_flattens_chains() {
        let mut set = DisjointSet::new(5);
        for element in 1..5 {
            set.union(element - 1, element).expect("in range");
        }
        let root = set.find(4).expect("in range");
        assert!(set.parents.iter().all(|parent| *parent == root));
    }

    proptest! {
        #[test]
        fn classes_match_naive_labelling(
            len in 1_usize..24,
            pairs in proptest::collection::vec((0_usize..24, 0_usize..24), 0..48),
        ) {
            let mut set = DisjointSet::new(len);
            let mut labels: Vec<usize> = (0..len).collect();
            for (left, right) in pairs {
                let (left, right) = (left % len, right % len);
                set.union(left, right).expect("in range");
                let (from, to) = (labels[left], labels[right]);
                for label in &mut labels {
                    if *label == from {
                        *label = to;
                    }
                }
            }
            let mut distinct = labels.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(set.components(), distinct.len());
            for left in 0..len {
                for right in 0..len {
                    prop_assert_eq!(
                        set.same_set(left, right).expect("in range"),
                        labels[left] == labels[right]
                    );
                }
            }
        }
    }
}
