//! Named fan-out/fan-in of independent read queries.
//!
//! A [`QuerySet`] collects futures under logical names and drives them all
//! concurrently on the current task. Every query runs to completion; when
//! one or more fail, the first failure (in completion order) is returned
//! and the other results are dropped.
//!
//! ```ignore
//! let mut results = QuerySet::new()
//!     .add("book", books.find_by_id(&id))
//!     .add("book_instances", instances.find_where(move |bi| bi.book == id))
//!     .run()
//!     .await?;
//! let book: Option<Book> = results.take("book")?;
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{FuturesUnordered, StreamExt};

type Erased = Box<dyn Any + Send>;
type NamedQuery<'a, E> = Pin<Box<dyn Future<Output = (&'static str, Result<Erased, E>)> + Send + 'a>>;

pub struct QuerySet<'a, E> {
    queries: Vec<(&'static str, NamedQuery<'a, E>)>,
}

impl<'a, E: Send + 'a> QuerySet<'a, E> {
    pub fn new() -> Self {
        Self {
            queries: Vec::new(),
        }
    }

    /// Register a query. Reusing a name replaces the earlier query.
    pub fn add<T, F>(mut self, name: &'static str, query: F) -> Self
    where
        T: Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        self.queries.retain(|(existing, _)| *existing != name);
        let fut = async move { (name, query.await.map(|value| Box::new(value) as Erased)) };
        self.queries.push((name, Box::pin(fut)));
        self
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Run every query concurrently and wait for all of them.
    pub async fn run(self) -> Result<QueryResults, E> {
        let mut pending: FuturesUnordered<_> =
            self.queries.into_iter().map(|(_, fut)| fut).collect();
        let mut values = HashMap::with_capacity(pending.len());
        let mut first_error = None;

        while let Some((name, outcome)) = pending.next().await {
            match outcome {
                Ok(value) => {
                    values.insert(name, value);
                }
                Err(err) => {
                    if first_error.is_none() {
                        tracing::debug!(query = name, "aggregated query failed");
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(QueryResults { values }),
        }
    }
}

impl<'a, E: Send + 'a> Default for QuerySet<'a, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of a successful [`QuerySet::run`], keyed by query name.
pub struct QueryResults {
    values: HashMap<&'static str, Erased>,
}

impl QueryResults {
    /// Remove and return the result stored under `name`.
    pub fn take<T: 'static>(&mut self, name: &str) -> Result<T, MissingResult> {
        let value = self
            .values
            .remove(name)
            .ok_or_else(|| MissingResult(name.to_string()))?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| MissingResult(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// No result of the requested type was stored under a query name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingResult(pub String);

impl std::fmt::Display for MissingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no result of the requested type for query '{}'", self.0)
    }
}

impl std::error::Error for MissingResult {}
