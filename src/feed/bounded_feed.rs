//! Bounded most-recent-first list with ring-buffer eviction
//!
//! Every telemetry stream keeps its records in a `BoundedFeed`: an ordered
//! collection with a fixed maximum size where the newest record sits at the
//! head and the oldest entry is evicted once the cap is exceeded.

use std::collections::VecDeque;

/// Fixed-capacity most-recent-first list
///
/// Insertion is an explicit capacity-checked insert-and-trim: the new record
/// goes to the head and entries past the cap are dropped from the tail. The
/// cap is the only throttling mechanism in the system.
#[derive(Debug, Clone)]
pub struct BoundedFeed<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedFeed<T> {
    /// Create a new feed with the given capacity
    ///
    /// A capacity of zero is bumped to one so the feed always holds at least
    /// the latest record.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a record at the head, evicting from the tail past the cap
    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.enforce_capacity();
    }

    /// Replace the whole list, re-applying the cap
    ///
    /// Used by the correlation pass, which reads the current list, computes a
    /// new one, and swaps it in as a single operation.
    pub fn replace(&mut self, entries: Vec<T>) {
        self.entries = entries.into();
        self.enforce_capacity();
    }

    /// Number of records currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the feed is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of records this feed will hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate records most-recent-first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Mutable iteration, most-recent-first
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut()
    }

    /// Drop entries from the tail until the feed fits its cap
    fn enforce_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }
}

impl<T: Clone> BoundedFeed<T> {
    /// Cloned copy of the list, most-recent-first
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_snapshot_order() {
        let mut feed = BoundedFeed::new(5);
        feed.push(1);
        feed.push(2);
        feed.push(3);

        // Most-recent-first
        assert_eq!(feed.snapshot(), vec![3, 2, 1]);
    }

    #[test]
    fn test_capacity_eviction() {
        let mut feed = BoundedFeed::new(3);
        for i in 0..5 {
            feed.push(i);
        }

        // Oldest entries (0 and 1) were evicted
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.snapshot(), vec![4, 3, 2]);
    }

    #[test]
    fn test_exact_cap_insertion_evicts_exactly_one() {
        let mut feed = BoundedFeed::new(20);
        for i in 0..20 {
            feed.push(i);
        }
        assert_eq!(feed.len(), 20);

        feed.push(20);
        assert_eq!(feed.len(), 20);
        let snapshot = feed.snapshot();
        assert_eq!(snapshot[0], 20);
        // The oldest entry (0) is the only one gone
        assert_eq!(*snapshot.last().unwrap(), 1);
    }

    #[test]
    fn test_replace_reapplies_cap() {
        let mut feed = BoundedFeed::new(2);
        feed.replace(vec![1, 2, 3, 4]);

        assert_eq!(feed.len(), 2);
        // Head of the supplied list is kept; overflow is trimmed from the tail
        assert_eq!(feed.snapshot(), vec![1, 2]);
    }

    #[test]
    fn test_zero_capacity_bumped_to_one() {
        let mut feed = BoundedFeed::new(0);
        assert_eq!(feed.capacity(), 1);

        feed.push("a");
        feed.push("b");
        assert_eq!(feed.snapshot(), vec!["b"]);
    }

    #[test]
    fn test_iter_mut() {
        let mut feed = BoundedFeed::new(3);
        feed.push(1);
        feed.push(2);

        for entry in feed.iter_mut() {
            *entry *= 10;
        }
        assert_eq!(feed.snapshot(), vec![20, 10]);
    }

    #[test]
    fn test_empty() {
        let feed: BoundedFeed<u8> = BoundedFeed::new(4);
        assert!(feed.is_empty());
        assert_eq!(feed.len(), 0);
        assert!(feed.snapshot().is_empty());
    }
}
