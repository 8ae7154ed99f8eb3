//! Fixed-capacity binary max-heap keyed by an integer score.

use super::{HeapError, children, parent};

/// A max-heap holding at most `capacity` scored items.
///
/// An item only moves above its parent when its score is strictly greater,
/// so among equal scores the earliest pushed item stays on top.
///
/// # Examples
/// ```
/// use gridlink_core::BoundedMaxHeap;
///
/// let mut heap = BoundedMaxHeap::with_capacity(2);
/// heap.push(70, "wind")?;
/// heap.push(90, "hydro")?;
/// assert_eq!(heap.peek_max(), Some((90, &"hydro")));
/// assert!(heap.push(10, "solar").is_err());
/// # Ok::<(), gridlink_core::HeapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BoundedMaxHeap<T> {
    entries: Vec<(i64, T)>,
    capacity: usize,
}

impl<T> BoundedMaxHeap<T> {
    /// Creates an empty heap holding at most `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the maximum number of items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the heap holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when no further item fits.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Inserts `item` with `score`.
    ///
    /// # Errors
    /// Returns [`HeapError::Full`] when the heap already holds `capacity`
    /// items.
    pub fn push(&mut self, score: i64, item: T) -> Result<(), HeapError> {
        if self.is_full() {
            return Err(HeapError::Full {
                capacity: self.capacity,
            });
        }
        self.entries.push((score, item));
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Returns the highest-scoring item without removing it.
    #[must_use]
    pub fn peek_max(&self) -> Option<(i64, &T)> {
        self.entries.first().map(|(score, item)| (*score, item))
    }

    /// Removes and returns the highest-scoring item.
    pub fn pop_max(&mut self) -> Option<(i64, T)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let top = self.entries.pop();
        self.sift_down(0);
        top
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let up = parent(index);
            if self.entries[index].0 <= self.entries[up].0 {
                break;
            }
            self.entries.swap(index, up);
            index = up;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let (left, right) = children(index);
            let mut best = index;
            if left < len && self.entries[left].0 > self.entries[best].0 {
                best = left;
            }
            if right < len && self.entries[right].0 > self.entries[best].0 {
                best = right;
            }
            if best == index {
                break;
            }
            self.entries.swap(index, best);
            index = best;
        }
    }
}
