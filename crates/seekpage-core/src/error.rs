//! Error types for pagination operations.

use std::borrow::Cow;

use strum::{AsRefStr, IntoStaticStr};

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Executor failures are carried in this form so that any storage backend
/// error can be propagated without the engine knowing its concrete type.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Specialized [`Result`] type for pagination operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The cursor string did not decode to a position.
    MalformedCursor,
    /// The pagination arguments were rejected.
    InvalidArguments,
    /// The injected query executor failed.
    Executor,
    /// A fetched row has no usable cursor position.
    InvalidNode,
    /// The pagination configuration is invalid.
    Configuration,
}

/// Error type for all pagination operations.
///
/// A call either returns a full page (possibly empty) or exactly one of
/// these errors; there is no partial-result behaviour.
#[derive(Debug, thiserror::Error)]
#[must_use = "pagination errors should be handled appropriately"]
pub enum Error {
    /// A cursor string failed to decode into `{id, pivot}`.
    ///
    /// Raised before any query is issued.
    #[error("Malformed cursor: {reason}")]
    MalformedCursor {
        /// Short description of what was wrong with the cursor.
        reason: &'static str,
        /// Underlying decoding error, if any.
        #[source]
        source: Option<BoxedError>,
    },

    /// The pagination arguments are contradictory or out of range.
    ///
    /// Raised before any query is issued.
    #[error("Invalid pagination arguments: {0}")]
    InvalidArguments(Cow<'static, str>),

    /// The injected query executor failed.
    ///
    /// The source error is propagated unchanged and never retried.
    #[error("Query executor failed: {0}")]
    Executor(#[source] BoxedError),

    /// A fetched row has a null or non-finite id or pivot value.
    ///
    /// Such a row has no place in the `(pivot, id)` ordering, so no cursor
    /// can resume from it.
    #[error("Row cannot be paginated: {0}")]
    InvalidNode(Cow<'static, str>),

    /// The pagination configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(Cow<'static, str>),
}

impl Error {
    /// Creates a malformed cursor error without an underlying source.
    pub fn malformed_cursor(reason: &'static str) -> Self {
        Self::MalformedCursor {
            reason,
            source: None,
        }
    }

    /// Creates a malformed cursor error caused by `source`.
    pub fn malformed_cursor_with(reason: &'static str, source: impl Into<BoxedError>) -> Self {
        Self::MalformedCursor {
            reason,
            source: Some(source.into()),
        }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArguments(message.into())
    }

    /// Wraps an executor failure.
    pub fn executor(source: impl Into<BoxedError>) -> Self {
        Self::Executor(source.into())
    }

    /// Creates an invalid node error.
    pub fn invalid_node(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidNode(message.into())
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedCursor { .. } => ErrorKind::MalformedCursor,
            Self::InvalidArguments(_) => ErrorKind::InvalidArguments,
            Self::Executor(_) => ErrorKind::Executor,
            Self::InvalidNode(_) => ErrorKind::InvalidNode,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind().into()
    }

    /// Returns whether the error was caused by the caller's input.
    ///
    /// Client errors (bad cursors, contradictory arguments) should be
    /// reported back to the requester rather than logged as failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedCursor { .. } | Self::InvalidArguments(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_strings() {
        assert_eq!(
            Error::malformed_cursor("empty").kind_str(),
            "malformed_cursor"
        );
        assert_eq!(
            Error::invalid_arguments("both").kind_str(),
            "invalid_arguments"
        );
        assert_eq!(Error::invalid_node("null pivot").kind_str(), "invalid_node");
        assert_eq!(Error::Config("bad".into()).kind_str(), "configuration");
    }

    #[test]
    fn executor_error_keeps_source() {
        let io = std::io::Error::other("connection reset");
        let error = Error::executor(io);

        assert_eq!(error.kind(), ErrorKind::Executor);
        assert!(!error.is_client_error());
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("connection reset"));
    }

    #[test]
    fn client_errors() {
        assert!(Error::malformed_cursor("empty").is_client_error());
        assert!(Error::invalid_arguments("zero").is_client_error());
        assert!(!Error::invalid_node("null pivot").is_client_error());
        assert!(!Error::Config("bad".into()).is_client_error());
    }
}
