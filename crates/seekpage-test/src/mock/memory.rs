//! Executor that answers seek queries from rows held in memory.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use futures::future;
use seekpage_core::{CursorNode, Predicate, QueryExecutor, Scalar, SeekQuery, SortOrder};

use crate::TRACING_TARGET_MOCK;

/// In-memory stand-in for a database table.
///
/// Applies the query's predicate, ordering and limit exactly as a store
/// would, and records every query it receives.
#[derive(Debug, Default)]
pub struct MemoryExecutor<N> {
    rows: Vec<N>,
    scope: Option<Predicate>,
    queries: Mutex<Vec<SeekQuery>>,
}

impl<N> MemoryExecutor<N>
where
    N: CursorNode + Clone,
{
    /// Creates an executor over the given rows, in any order.
    pub fn new(rows: impl IntoIterator<Item = N>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            scope: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Restricts every query to rows matching `scope`.
    ///
    /// Models an executor bound to a parent record, such as the posts of
    /// one person.
    pub fn with_scope(mut self, scope: Predicate) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Returns the stored rows.
    pub fn rows(&self) -> &[N] {
        &self.rows
    }

    /// Returns every query received so far.
    pub fn queries(&self) -> Vec<SeekQuery> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent query.
    pub fn last_query(&self) -> Option<SeekQuery> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Returns how many queries were received.
    pub fn query_count(&self) -> usize {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Evaluates `query` against the stored rows.
    pub fn run(&self, query: &SeekQuery) -> Vec<N> {
        let mut matched: Vec<&N> = self
            .rows
            .iter()
            .filter(|row| {
                let lookup = |column: &str| row.cursor_field(column);
                let in_scope = self.scope.as_ref().is_none_or(|p| p.matches(&lookup));
                let in_range = query.filter.as_ref().is_none_or(|p| p.matches(&lookup));
                in_scope && in_range
            })
            .collect();

        matched.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|entry| {
                    let ordering = compare(
                        &a.cursor_field(entry.column()),
                        &b.cursor_field(entry.column()),
                    );
                    match entry.order() {
                        SortOrder::Asc => ordering,
                        SortOrder::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        matched
            .into_iter()
            .take(query.limit())
            .cloned()
            .collect()
    }
}

impl<N> QueryExecutor for MemoryExecutor<N>
where
    N: CursorNode + Clone + Send,
{
    type Error = Infallible;
    type Node = N;

    fn execute(
        &self,
        query: SeekQuery,
    ) -> impl Future<Output = Result<Vec<N>, Infallible>> + Send {
        let rows = self.run(&query);

        tracing::debug!(
            target: TRACING_TARGET_MOCK,
            limit = query.limit,
            returned = rows.len(),
            "Memory mock query"
        );

        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query);

        future::ready(Ok(rows))
    }
}

/// Orders scalars of the same kind naturally and different kinds by kind.
///
/// `Null` sorts after everything else, as PostgreSQL does for `ASC`.
fn compare(a: &Scalar, b: &Scalar) -> Ordering {
    fn rank(value: &Scalar) -> u8 {
        match value {
            Scalar::Bool(_) => 0,
            Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_) => 1,
            Scalar::Text(_) => 2,
            Scalar::Null => 3,
        }
    }

    a.partial_cmp(b)
        .unwrap_or_else(|| rank(a).cmp(&rank(b)))
}
