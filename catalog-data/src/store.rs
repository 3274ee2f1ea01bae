//! In-process document store.
//!
//! Documents are kept as JSON values in per-collection concurrent maps, so
//! each read or write of a single document is atomic while nothing spans
//! documents: there are no transactions and no cross-collection constraints.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use garde::Validate;
use serde_json::Value;
use tracing::debug;

use crate::document::Document;
use crate::error::DataError;
use crate::id::ObjectId;
use crate::repository::Repository;

struct StoredDocument {
    /// Insertion sequence, gives lists a stable natural order.
    seq: u64,
    body: Value,
}

#[derive(Default)]
struct RawCollection {
    docs: DashMap<ObjectId, StoredDocument>,
}

#[derive(Default)]
struct StoreInner {
    collections: DashMap<&'static str, Arc<RawCollection>>,
    next_seq: AtomicU64,
    closed: AtomicBool,
}

/// Shared handle to the store; clones see the same data.
#[derive(Clone, Default)]
pub struct DocumentStore {
    inner: Arc<StoreInner>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed handle to the collection backing `T`, created on first use.
    pub fn collection<T: Document>(&self) -> Collection<T> {
        let raw = self
            .inner
            .collections
            .entry(T::COLLECTION)
            .or_default()
            .clone();
        Collection {
            store: self.clone(),
            raw,
            _marker: PhantomData,
        }
    }

    pub fn collection_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.inner.collections.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }

    /// Refuse all further operations. Used on shutdown.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            tracing::info!("document store closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), DataError> {
        if self.is_closed() {
            Err(DataError::Unavailable("document store is closed".to_string()))
        } else {
            Ok(())
        }
    }

    fn next_seq(&self) -> u64 {
        self.inner.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// Typed view over one collection.
pub struct Collection<T> {
    store: DocumentStore,
    raw: Arc<RawCollection>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            raw: self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn name(&self) -> &'static str {
        T::COLLECTION
    }

    fn decode(body: &Value) -> Result<T, DataError> {
        Ok(T::deserialize(body)?)
    }

    fn encode(entity: &T) -> Result<Value, DataError> {
        if let Err(report) = entity.validate() {
            let details: Vec<String> = report
                .iter()
                .map(|(path, error)| format!("{path}: {}", error.message()))
                .collect();
            return Err(DataError::Constraint(format!(
                "{} {}",
                T::COLLECTION,
                details.join(", ")
            )));
        }
        Ok(serde_json::to_value(entity)?)
    }

    /// Snapshot of all documents sorted by insertion order.
    fn scan(&self) -> Result<Vec<T>, DataError> {
        self.store.ensure_open()?;
        let mut rows: Vec<(u64, T)> = Vec::with_capacity(self.raw.docs.len());
        for entry in self.raw.docs.iter() {
            rows.push((entry.seq, Self::decode(&entry.body)?));
        }
        rows.sort_unstable_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, doc)| doc).collect())
    }

    fn get(&self, id: &ObjectId) -> Result<Option<T>, DataError> {
        self.store.ensure_open()?;
        self.raw
            .docs
            .get(id)
            .map(|doc| Self::decode(&doc.body))
            .transpose()
    }
}

impl<T: Document> Repository<T> for Collection<T> {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<T>, DataError> {
        self.get(id)
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<T>, DataError> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(doc) = self.get(id)? {
                found.push(doc);
            }
        }
        Ok(found)
    }

    async fn find_all(&self) -> Result<Vec<T>, DataError> {
        self.scan()
    }

    async fn find_where<F>(&self, predicate: F) -> Result<Vec<T>, DataError>
    where
        F: Fn(&T) -> bool + Send,
    {
        Ok(self.scan()?.into_iter().filter(|doc| predicate(doc)).collect())
    }

    async fn count(&self) -> Result<u64, DataError> {
        self.store.ensure_open()?;
        Ok(self.raw.docs.len() as u64)
    }

    async fn count_where<F>(&self, predicate: F) -> Result<u64, DataError>
    where
        F: Fn(&T) -> bool + Send,
    {
        Ok(self.scan()?.into_iter().filter(|doc| predicate(doc)).count() as u64)
    }

    async fn insert(&self, entity: &T) -> Result<T, DataError> {
        self.store.ensure_open()?;
        let id = entity.id();
        let body = Self::encode(entity)?;
        match self.raw.docs.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DataError::Constraint(format!(
                "{} already contains a document with id {id}",
                T::COLLECTION
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(StoredDocument {
                    seq: self.store.next_seq(),
                    body,
                });
                debug!(collection = T::COLLECTION, %id, "document inserted");
                Ok(entity.clone())
            }
        }
    }

    async fn update(&self, id: &ObjectId, mut entity: T) -> Result<Option<T>, DataError> {
        self.store.ensure_open()?;
        entity.set_id(*id);
        let body = Self::encode(&entity)?;
        match self.raw.docs.get_mut(id) {
            Some(mut stored) => {
                stored.body = body;
                debug!(collection = T::COLLECTION, %id, "document updated");
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, DataError> {
        self.store.ensure_open()?;
        let removed = self.raw.docs.remove(id).is_some();
        if removed {
            debug!(collection = T::COLLECTION, %id, "document deleted");
        }
        Ok(removed)
    }
}
