//! Executor that fails every query.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use seekpage_core::{QueryExecutor, SeekQuery};

use crate::TRACING_TARGET_MOCK;

/// Error returned by [`FailingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mock executor failure: {message}")]
pub struct MockError {
    /// Failure message.
    pub message: String,
}

/// Executor that fails every query with a [`MockError`].
///
/// Counts how many times it was called so tests can assert that a query
/// was, or was not, issued.
#[derive(Debug, Clone)]
pub struct FailingExecutor<N> {
    message: String,
    calls: Arc<AtomicUsize>,
    _node: std::marker::PhantomData<fn() -> N>,
}

impl<N> FailingExecutor<N> {
    /// Creates an executor failing with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            _node: std::marker::PhantomData,
        }
    }

    /// Returns how many queries were received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<N> QueryExecutor for FailingExecutor<N> {
    type Error = MockError;
    type Node = N;

    async fn execute(&self, query: SeekQuery) -> Result<Vec<N>, MockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(target: TRACING_TARGET_MOCK, limit = query.limit, "Failing mock query");

        Err(MockError {
            message: self.message.clone(),
        })
    }
}
