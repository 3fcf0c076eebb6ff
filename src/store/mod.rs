//! Record collections backing the resource modules.

use grubdash_http::AppError;

pub mod memory;
pub mod seed;

pub use memory::InMemoryCollection;
pub use seed::Seed;

/// A stored record addressed by an opaque string id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Ordered collection of records.
///
/// Each call is atomic on its own. Checks that must hold at the moment of a
/// write go through [`update_with`](Collection::update_with) or
/// [`remove_if`](Collection::remove_if), which run them under the write lock.
pub trait Collection<T: Record>: Send + Sync {
    /// All records in insertion order
    fn list(&self) -> anyhow::Result<Vec<T>>;

    fn find(&self, id: &str) -> anyhow::Result<Option<T>>;

    /// Append a record; fails if its id is already taken
    fn append(&self, record: T) -> anyhow::Result<T>;

    /// Replace the record with the same id in place, returning the previous value
    fn replace(&self, record: T) -> anyhow::Result<Option<T>>;

    /// Remove a record, returning it if it was present
    fn remove(&self, id: &str) -> anyhow::Result<Option<T>>;

    /// Replace the record `id` with what `apply` builds from it.
    ///
    /// `Ok(None)` when there is no such record. An error from `apply` leaves
    /// the record untouched.
    fn update_with(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&T) -> Result<T, AppError>,
    ) -> Result<Option<T>, AppError>;

    /// Remove the record `id` if `guard` accepts it.
    fn remove_if(
        &self,
        id: &str,
        guard: &mut dyn FnMut(&T) -> Result<(), AppError>,
    ) -> Result<Option<T>, AppError>;
}
