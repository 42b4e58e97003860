use flowboard_base::FlowboardResult;

use crate::store::traits::RecordStore;

/// An in-memory record store backed by a Vec.
///
/// Records live for the lifetime of the process. Reads hand out clones, so callers never
/// hold references into the store.
///
/// # Example
///
/// ```
/// use flowboard_engine::store::{InMemoryStore, RecordStore};
///
/// let mut store = InMemoryStore::new();
/// store.append("first").unwrap();
/// store.append("second").unwrap();
///
/// assert_eq!(store.len().unwrap(), 2);
/// assert_eq!(store.tail(1).unwrap(), vec!["second"]);
/// ```
#[derive(Debug)]
pub struct InMemoryStore<T> {
    records: Vec<T>,
}

impl<T> InMemoryStore<T> {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a new store with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> RecordStore<T> for InMemoryStore<T> {
    fn append(&mut self, record: T) -> FlowboardResult<()> {
        self.records.push(record);
        Ok(())
    }

    fn len(&self) -> FlowboardResult<usize> {
        Ok(self.records.len())
    }

    fn is_empty(&self) -> FlowboardResult<bool> {
        Ok(self.records.is_empty())
    }

    fn list(&self) -> FlowboardResult<Vec<T>> {
        Ok(self.records.clone())
    }

    fn tail(&self, n: usize) -> FlowboardResult<Vec<T>> {
        let start = self.records.len().saturating_sub(n);
        Ok(self.records[start..].to_vec())
    }

    fn count_matching(&self, predicate: &dyn Fn(&T) -> bool) -> FlowboardResult<usize> {
        Ok(self.records.iter().filter(|record| predicate(record)).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreHandle;

    #[test]
    fn test_store_new() {
        let store = InMemoryStore::<u32>::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut store = InMemoryStore::new();
        for value in [3, 1, 2] {
            store.append(value).unwrap();
        }
        assert_eq!(store.list().unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_tail() {
        let mut store = InMemoryStore::new();
        for value in 0..15 {
            store.append(value).unwrap();
        }
        assert_eq!(store.tail(10).unwrap(), (5..15).collect::<Vec<_>>());
        assert_eq!(store.tail(0).unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn test_tail_larger_than_store() {
        let mut store = InMemoryStore::with_capacity(4);
        store.append("a").unwrap();
        store.append("b").unwrap();
        assert_eq!(store.tail(10).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_count_matching() {
        let mut store = InMemoryStore::new();
        for value in 1..=10 {
            store.append(value).unwrap();
        }
        assert_eq!(store.count_matching(&|value| value % 2 == 0).unwrap(), 5);
    }

    #[test]
    fn test_store_handle_clone_shares_records() {
        let handle1 = StoreHandle::new(InMemoryStore::new());
        let handle2 = handle1.clone();

        handle1.append("shared".to_string()).unwrap();
        assert_eq!(handle2.len().unwrap(), 1);
        assert_eq!(handle2.count_matching(|s| s == "shared").unwrap(), 1);
    }

    #[test]
    fn test_store_handle_concurrent_appends() {
        let handle = StoreHandle::new(InMemoryStore::new());
        let threads: Vec<_> = (0..8)
            .map(|thread| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        handle.append((thread, i)).unwrap();
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        let records = handle.list().unwrap();
        assert_eq!(records.len(), 800);
        // Each thread's own appends stay in order
        for thread in 0..8 {
            let own: Vec<_> = records
                .iter()
                .filter(|(t, _)| *t == thread)
                .map(|(_, i)| *i)
                .collect();
            assert_eq!(own, (0..100).collect::<Vec<_>>());
        }
    }
}
