//! Relay-style connection arguments.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Cursor;

/// Connection arguments selecting a page relative to a cursor.
///
/// `first`/`after` page forward through the natural order, `last`/`before`
/// page backward. With no arguments at all the page starts at the beginning
/// of the natural order and uses the configured default page size.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PaginationArgs {
    /// Number of rows to return when paging forward.
    #[validate(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,

    /// Number of rows to return when paging backward.
    #[validate(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,

    /// Cursor of the row to resume after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Cursor>,

    /// Cursor of the row to resume before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Cursor>,
}

impl PaginationArgs {
    /// Returns arguments for the first `first` rows of the natural order.
    #[inline]
    pub fn forward(first: u32) -> Self {
        Self {
            first: Some(first),
            ..Self::default()
        }
    }

    /// Returns arguments for the last `last` rows, scanning backward.
    #[inline]
    pub fn backward(last: u32) -> Self {
        Self {
            last: Some(last),
            ..Self::default()
        }
    }

    /// Returns these arguments resuming after the given cursor.
    #[inline]
    pub fn with_after(mut self, cursor: impl Into<Cursor>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Returns these arguments resuming before the given cursor.
    #[inline]
    pub fn with_before(mut self, cursor: impl Into<Cursor>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Returns these arguments with the given forward count.
    #[inline]
    pub fn with_first(mut self, first: u32) -> Self {
        self.first = Some(first);
        self
    }

    /// Returns these arguments with the given backward count.
    #[inline]
    pub fn with_last(mut self, last: u32) -> Self {
        self.last = Some(last);
        self
    }

    /// Returns whether a resume cursor was supplied.
    #[inline]
    pub fn has_cursor(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn args_deserialize_from_relay_shape() {
        let args: PaginationArgs =
            serde_json::from_value(json!({ "first": 10, "after": "eyJpZCI6MX0" })).unwrap();

        assert_eq!(args.first, Some(10));
        assert_eq!(args.after, Some(Cursor::new("eyJpZCI6MX0")));
        assert!(args.last.is_none());
        assert!(args.before.is_none());
    }

    #[test]
    fn args_validation_rejects_zero() {
        assert!(PaginationArgs::forward(0).validate().is_err());
        assert!(PaginationArgs::backward(0).validate().is_err());
        assert!(PaginationArgs::forward(1).validate().is_ok());
        assert!(PaginationArgs::default().validate().is_ok());
    }

    #[test]
    fn args_builders() {
        let args = PaginationArgs::backward(3).with_before("abc");
        assert_eq!(args.last, Some(3));
        assert!(args.has_cursor());
        assert!(!PaginationArgs::forward(3).has_cursor());
    }
}
