#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for mock executors.
pub const TRACING_TARGET_MOCK: &str = "seekpage_test::mock";

mod mock;
mod tracing_init;

pub use mock::{FailingExecutor, MemoryExecutor, MockError};
pub use tracing_init::init_tracing;
