//! The injected query capability.

use std::future::Future;

use super::SeekQuery;
use crate::BoxedError;

/// Runs a [`SeekQuery`] against a backing store.
///
/// This is the engine's only collaborator. It is a capability passed to
/// every call, not a global handle: connections, transactions, timeouts and
/// retries all belong to the implementation.
pub trait QueryExecutor {
    /// Row type produced by the executor.
    type Node;

    /// Error type produced by the executor.
    type Error: Into<BoxedError>;

    /// Returns at most `query.limit` rows matching `query.filter`, in
    /// `query.order`.
    fn execute(
        &self,
        query: SeekQuery,
    ) -> impl Future<Output = Result<Vec<Self::Node>, Self::Error>> + Send;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    type Error = E::Error;
    type Node = E::Node;

    fn execute(
        &self,
        query: SeekQuery,
    ) -> impl Future<Output = Result<Vec<Self::Node>, Self::Error>> + Send {
        (**self).execute(query)
    }
}

/// A [`QueryExecutor`] backed by an async closure.
///
/// Created with [`executor_fn`].
#[derive(Clone, Copy)]
pub struct FnExecutor<F> {
    f: F,
}

/// Wraps an async closure as a [`QueryExecutor`].
///
/// ```rust
/// use seekpage_core::{SeekQuery, executor_fn};
///
/// let executor = executor_fn(|query: SeekQuery| async move {
///     let rows: Vec<serde_json::Value> = Vec::with_capacity(query.limit());
///     Ok::<_, std::io::Error>(rows)
/// });
/// # let _ = executor;
/// ```
pub fn executor_fn<F>(f: F) -> FnExecutor<F> {
    FnExecutor { f }
}

impl<F, Fut, N, E> QueryExecutor for FnExecutor<F>
where
    F: Fn(SeekQuery) -> Fut,
    Fut: Future<Output = Result<Vec<N>, E>> + Send,
    E: Into<BoxedError>,
{
    type Error = E;
    type Node = N;

    fn execute(&self, query: SeekQuery) -> impl Future<Output = Result<Vec<N>, E>> + Send {
        (self.f)(query)
    }
}

impl<F> std::fmt::Debug for FnExecutor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnExecutor").finish_non_exhaustive()
    }
}
