#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for cursor encoding and decoding.
///
/// Use this target for logging malformed cursors and codec failures.
pub const TRACING_TARGET_CURSOR: &str = "seekpage_core::cursor";

/// Tracing target for seek-query planning, execution and page assembly.
pub const TRACING_TARGET_QUERY: &str = "seekpage_core::query";

/// Tracing target for pagination configuration.
pub const TRACING_TARGET_CONFIG: &str = "seekpage_core::config";

mod config;
mod error;
mod paginator;
pub mod prelude;
pub mod query;
pub mod types;

pub use crate::config::{
    ArgumentPolicy, DEFAULT_ID_COLUMN, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE, PageInfoMode,
    PaginationConfig,
};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::paginator::{Paginator, SeekPlan, connection_from_executor};
pub use crate::query::{
    Comparison, ComparisonOp, CursorBound, FnExecutor, OrderBy, Predicate, QueryExecutor,
    SeekQuery, SortOrder, executor_fn,
};
pub use crate::types::{
    Connection, Cursor, CursorNode, Edge, PageInfo, PaginationArgs, Position, Scalar,
};
