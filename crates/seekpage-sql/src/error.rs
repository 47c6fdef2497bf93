//! Rendering errors.

/// Errors raised while rendering a seek query to SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "rendering errors should be handled appropriately"]
pub enum RenderError {
    /// A table or column name cannot be safely quoted.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The query limit was zero.
    #[error("Query limit must be greater than zero")]
    ZeroLimit,
}

/// Specialized [`Result`] type for rendering.
pub type RenderResult<T, E = RenderError> = Result<T, E>;

impl From<RenderError> for seekpage_core::Error {
    fn from(error: RenderError) -> Self {
        seekpage_core::Error::executor(error)
    }
}
