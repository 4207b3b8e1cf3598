//! Min-ordered priority queue for tree construction.
//!
//! `std::collections::BinaryHeap` is a max-heap, so entries compare in
//! reverse on `(weight, seq)`. The sequence number stamped on every insert
//! makes the order total: among equal weights the earliest insert pops
//! first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap keyed by weight, ties broken by insertion order.
pub struct MinQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> MinQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty queue with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert `item` with the given weight. O(log n).
    pub fn insert(&mut self, weight: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { weight, seq, item });
    }

    /// Remove the minimum-weight item, earliest inserted among ties. O(log n).
    pub fn pop_min(&mut self) -> Option<(u64, T)> {
        self.heap.pop().map(|e| (e.weight, e.item))
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if the queue holds nothing.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for MinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
