//! Commonly used items for fetching pages.
//!
//! ```rust
//! use seekpage_core::prelude::*;
//! ```

pub use crate::{
    Connection, Cursor, CursorNode, Edge, Error, PageInfo, PaginationArgs, PaginationConfig,
    Paginator, Position, QueryExecutor, Result, Scalar, SeekQuery, executor_fn,
};
