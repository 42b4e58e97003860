/* 📖 # Why create a RecordStore trait?

Leads and contact messages live in process memory today, and the handlers should not
care whether that stays true. The RecordStore trait captures exactly what the handlers
need from a store: append a record, and read back counts, the full list or the most
recent entries. There is no update or delete: stored records are never
mutated or removed.

Swapping in a database-backed store later means implementing this trait; handlers and
tests keep talking to `StoreHandle`.
*/

use std::sync::Arc;

use parking_lot::RwLock;

use flowboard_base::FlowboardResult;

/// Append-only, insertion-ordered collection of records.
pub trait RecordStore<T>: Send + Sync + 'static {
    /// Add a record after all existing ones.
    fn append(&mut self, record: T) -> FlowboardResult<()>;

    /// Number of stored records.
    fn len(&self) -> FlowboardResult<usize>;

    /// Returns true if nothing has been stored yet.
    fn is_empty(&self) -> FlowboardResult<bool>;

    /// All records in insertion order.
    fn list(&self) -> FlowboardResult<Vec<T>>;

    /// The last `n` records in insertion order (fewer if the store is smaller).
    fn tail(&self, n: usize) -> FlowboardResult<Vec<T>>;

    /// Number of records for which `predicate` returns true.
    fn count_matching(&self, predicate: &dyn Fn(&T) -> bool) -> FlowboardResult<usize>;
}

/// A thread-safe handle to a record store.
///
/// StoreHandle provides cheap cloning (via Arc) and interior mutability (via RwLock).
/// Appends take the write lock, so concurrent appends from request threads are never
/// lost or interleaved; reads share the read lock.
///
/// This follows the same pattern as `PalHandle` in flowboard_base.
pub struct StoreHandle<T>(Arc<RwLock<dyn RecordStore<T>>>);

impl<T> Clone for StoreHandle<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: 'static> StoreHandle<T> {
    /// Create a new StoreHandle wrapping the given store implementation.
    pub fn new<S: RecordStore<T>>(store: S) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// See [`RecordStore::append`].
    pub fn append(&self, record: T) -> FlowboardResult<()> {
        self.0.write().append(record)
    }

    /// See [`RecordStore::len`].
    pub fn len(&self) -> FlowboardResult<usize> {
        self.0.read().len()
    }

    /// See [`RecordStore::is_empty`].
    pub fn is_empty(&self) -> FlowboardResult<bool> {
        self.0.read().is_empty()
    }

    /// See [`RecordStore::list`].
    pub fn list(&self) -> FlowboardResult<Vec<T>> {
        self.0.read().list()
    }

    /// See [`RecordStore::tail`].
    pub fn tail(&self, n: usize) -> FlowboardResult<Vec<T>> {
        self.0.read().tail(n)
    }

    /// See [`RecordStore::count_matching`].
    pub fn count_matching(&self, predicate: impl Fn(&T) -> bool) -> FlowboardResult<usize> {
        self.0.read().count_matching(&predicate)
    }
}

impl<T> std::fmt::Debug for StoreHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StoreHandle").finish_non_exhaustive()
    }
}
