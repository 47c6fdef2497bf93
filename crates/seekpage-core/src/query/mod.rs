//! Seek queries handed to storage executors.

mod executor;
mod predicate;
mod seek_query;

pub use executor::{FnExecutor, QueryExecutor, executor_fn};
pub use predicate::{Comparison, ComparisonOp, CursorBound, Predicate};
pub use seek_query::{OrderBy, SeekQuery, SortOrder};
