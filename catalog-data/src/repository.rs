use std::future::Future;

use crate::error::DataError;
use crate::id::ObjectId;

/// Async CRUD over one collection of `T`.
///
/// Uses RPITIT (return-position `impl Trait` in traits), no `async-trait` needed.
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    fn find_by_id(&self, id: &ObjectId) -> impl Future<Output = Result<Option<T>, DataError>> + Send;

    /// Documents whose ids appear in `ids`, in the order given; unknown ids are skipped.
    fn find_many(&self, ids: &[ObjectId]) -> impl Future<Output = Result<Vec<T>, DataError>> + Send;

    /// Every document, in insertion order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, DataError>> + Send;

    fn find_where<F>(&self, predicate: F) -> impl Future<Output = Result<Vec<T>, DataError>> + Send
    where
        F: Fn(&T) -> bool + Send;

    fn count(&self) -> impl Future<Output = Result<u64, DataError>> + Send;

    fn count_where<F>(&self, predicate: F) -> impl Future<Output = Result<u64, DataError>> + Send
    where
        F: Fn(&T) -> bool + Send;

    /// Store a new document under its own id.
    fn insert(&self, entity: &T) -> impl Future<Output = Result<T, DataError>> + Send;

    /// Replace the document stored under `id`, keeping `id` whatever the
    /// entity carries. Returns `None` when nothing is stored under `id`.
    fn update(&self, id: &ObjectId, entity: T) -> impl Future<Output = Result<Option<T>, DataError>> + Send;

    /// Remove the document; `false` when it was already absent.
    fn delete(&self, id: &ObjectId) -> impl Future<Output = Result<bool, DataError>> + Send;
}
