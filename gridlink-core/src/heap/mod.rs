//! Priority structures used by the analyses.
//!
//! - [`IndexedMinHeap`] keeps a node-to-slot map so Dijkstra can decrease a
//!   key in place instead of pushing stale duplicates.
//! - [`BoundedMaxHeap`] holds a small, fixed number of scored candidates and
//!   answers "which one is best".

mod bounded;
mod indexed;

pub use self::{bounded::BoundedMaxHeap, indexed::IndexedMinHeap};

use thiserror::Error;

use crate::error::define_error_codes;

/// Errors returned by the priority structures.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HeapError {
    /// A node id outside the heap's slot range was supplied.
    #[error("node {node} is outside the {slots} heap slots")]
    SlotOutOfBounds {
        /// The offending node id.
        node: usize,
        /// Number of addressable slots.
        slots: usize,
    },
    /// The heap already holds its maximum number of items.
    #[error("heap is full at capacity {capacity}")]
    Full {
        /// Maximum number of items the heap holds.
        capacity: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`HeapError`] variants.
    enum HeapErrorCode for HeapError {
        /// A node id outside the heap's slot range was supplied.
        SlotOutOfBounds => SlotOutOfBounds { .. } => "HEAP_SLOT_OUT_OF_BOUNDS",
        /// The heap already holds its maximum number of items.
        Full => Full { .. } => "HEAP_FULL",
    }
}

const fn parent(index: usize) -> usize {
    (index - 1) / 2
}

const fn children(index: usize) -> (usize, usize) {
    (2 * index + 1, 2 * index + 2)
}
