//! Pagination wire types: cursors, arguments, scalars and connections.

mod args;
mod connection;
mod cursor;
mod node;
mod scalar;

pub use args::PaginationArgs;
pub use connection::{Connection, Edge, PageInfo};
pub use cursor::{Cursor, Position};
pub use node::CursorNode;
pub use scalar::Scalar;
