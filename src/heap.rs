use crate::error::{Error, Result};

struct Entry<T> {
    value: T,
    priority: u64,
    seq: u64,
}

impl<T> Entry<T> {
    // Equal priorities are broken by insertion order, so extraction among
    // ties is deterministic regardless of how the heap shuffles entries.
    fn key(&self) -> (u64, u64) {
        (self.priority, self.seq)
    }
}

/// Growable array-backed binary min-heap of `(value, priority)` pairs.
pub struct MinHeap<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, value: T, priority: u64) {
        self.entries.push(Entry {
            value,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the value with the lowest priority.
    pub fn extract_min(&mut self) -> Result<T> {
        if self.entries.is_empty() {
            return Err(Error::QueueEmpty);
        }
        let entry = self.entries.swap_remove(0);
        self.sift_down(0);
        Ok(entry.value)
    }

    pub fn peek(&self) -> Result<&T> {
        self.entries.first().map(|e| &e.value).ok_or(Error::QueueEmpty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].key() < self.entries[parent].key() {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            if left >= self.entries.len() {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < self.entries.len()
                && self.entries[right].key() < self.entries[left].key()
            {
                smallest = right;
            }
            if self.entries[smallest].key() < self.entries[index].key() {
                self.entries.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MinHeap;
    use crate::error::Error;

    #[test]
    fn extracts_in_priority_order() {
        let mut heap = MinHeap::new();
        for (value, priority) in [("c", 30), ("a", 10), ("d", 40), ("b", 20)] {
            heap.insert(value, priority);
        }
        assert_eq!(4, heap.len());
        assert_eq!("a", heap.extract_min().unwrap());
        assert_eq!("b", heap.extract_min().unwrap());
        assert_eq!("c", heap.extract_min().unwrap());
        assert_eq!("d", heap.extract_min().unwrap());
        assert!(heap.is_empty());
    }

    #[test]
    fn equal_priorities_extract_in_insertion_order() {
        let mut heap = MinHeap::new();
        for value in 0..16u32 {
            heap.insert(value, 7);
        }
        for expected in 0..16u32 {
            assert_eq!(expected, heap.extract_min().unwrap());
        }
    }

    #[test]
    fn peek_does_not_remove() {
        let mut heap = MinHeap::new();
        heap.insert('x', 5);
        heap.insert('y', 1);
        assert_eq!(&'y', heap.peek().unwrap());
        assert_eq!(2, heap.len());
        assert_eq!('y', heap.extract_min().unwrap());
    }

    #[test]
    fn empty_heap_errors() {
        let mut heap: MinHeap<u8> = MinHeap::new();
        assert!(matches!(heap.extract_min(), Err(Error::QueueEmpty)));
        assert!(matches!(heap.peek(), Err(Error::QueueEmpty)));
    }
}
