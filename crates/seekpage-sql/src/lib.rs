#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for statement rendering.
pub const TRACING_TARGET_RENDER: &str = "seekpage_sql::render";

mod error;
mod identifier;
mod render;

pub use error::{RenderError, RenderResult};
pub use identifier::quote_identifier;
pub use render::{RenderedQuery, SqlRenderer, render_predicate};
