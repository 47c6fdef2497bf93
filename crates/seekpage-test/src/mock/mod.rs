//! Mock query executors.

mod failing;
mod memory;

pub use failing::{FailingExecutor, MockError};
pub use memory::MemoryExecutor;
