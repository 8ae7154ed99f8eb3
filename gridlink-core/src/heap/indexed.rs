//! Binary min-heap with O(log n) decrease-key.

use super::{HeapError, children, parent};

/// A binary min-heap over node ids `[0, slots)`.
///
/// Each node appears at most once. `positions[node]` stores the heap index
/// of the node while it is queued.
///
/// # Examples
/// ```
/// use gridlink_core::IndexedMinHeap;
///
/// let mut heap = IndexedMinHeap::with_slots(3);
/// heap.push_or_decrease(2, 9_u64)?;
/// heap.push_or_decrease(1, 4)?;
/// heap.push_or_decrease(2, 3)?;
/// assert_eq!(heap.pop_min(), Some((2, 3)));
/// assert_eq!(heap.pop_min(), Some((1, 4)));
/// assert!(heap.is_empty());
/// # Ok::<(), gridlink_core::HeapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct IndexedMinHeap<K> {
    entries: Vec<(usize, K)>,
    positions: Vec<Option<usize>>,
}

impl<K: Ord + Copy> IndexedMinHeap<K> {
    /// Creates an empty heap addressing nodes `[0, slots)`.
    #[must_use]
    pub fn with_slots(slots: usize) -> Self {
        Self {
            entries: Vec::with_capacity(slots),
            positions: vec![None; slots],
        }
    }

    /// Returns the number of queued nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when `node` is queued.
    #[must_use]
    pub fn contains(&self, node: usize) -> bool {
        self.positions.get(node).is_some_and(Option::is_some)
    }

    /// Returns the queued key of `node`.
    #[must_use]
    pub fn key_of(&self, node: usize) -> Option<K> {
        let position = (*self.positions.get(node)?)?;
        Some(self.entries[position].1)
    }

    /// Inserts `node` or lowers its key.
    ///
    /// Returns `true` when the heap changed. A key that is not smaller than
    /// the queued one leaves the heap untouched.
    ///
    /// # Errors
    /// Returns [`HeapError::SlotOutOfBounds`] when `node >= slots`.
    pub fn push_or_decrease(&mut self, node: usize, key: K) -> Result<bool, HeapError> {
        let slot = self
            .positions
            .get(node)
            .copied()
            .ok_or(HeapError::SlotOutOfBounds {
                node,
                slots: self.positions.len(),
            })?;

        match slot {
            None => {
                let index = self.entries.len();
                self.entries.push((node, key));
                self.positions[node] = Some(index);
                self.sift_up(index);
                Ok(true)
            }
            Some(index) if key < self.entries[index].1 => {
                self.entries[index].1 = key;
                self.sift_up(index);
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    /// Removes and returns the node with the smallest key.
    pub fn pop_min(&mut self) -> Option<(usize, K)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let (node, key) = self.entries.pop()?;
        self.positions[node] = None;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((node, key))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let up = parent(index);
            if self.entries[index].1 >= self.entries[up].1 {
                break;
            }
            self.swap(index, up);
            index = up;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let (left, right) = children(index);
            let mut best = index;
            if left < len && self.entries[left].1 < self.entries[best].1 {
                best = left;
            }
            if right < len && self.entries[right].1 < self.entries[best].1 {
                best = right;
            }
            if best == index {
                break;
            }
            self.swap(index, best);
            index = best;
        }
    }

    fn swap(&mut self, left: usize, right: usize) {
        self.entries.swap(left, right);
        self.positions[self.entries[left].0] = Some(left);
        self.positions[self.entries[right].0] = Some(right);
    }
}
