//! Access to the cursor columns of fetched rows.

use std::rc::Rc;
use std::sync::Arc;

use super::Scalar;

/// A row that can report the values of its cursor columns.
///
/// The engine reads exactly two fields from every fetched row: the pivot
/// column and the id column. Missing fields read as [`Scalar::Null`].
///
/// ```rust
/// use seekpage_core::{CursorNode, Scalar};
///
/// struct Post {
///     id: i64,
///     created_at: String,
/// }
///
/// impl CursorNode for Post {
///     fn cursor_field(&self, column: &str) -> Scalar {
///         match column {
///             "id" => self.id.into(),
///             "createdAt" => self.created_at.as_str().into(),
///             _ => Scalar::Null,
///         }
///     }
/// }
/// ```
pub trait CursorNode {
    /// Returns the value of `column` for this row.
    fn cursor_field(&self, column: &str) -> Scalar;
}

impl CursorNode for serde_json::Map<String, serde_json::Value> {
    fn cursor_field(&self, column: &str) -> Scalar {
        self.get(column).map_or(Scalar::Null, Scalar::from_json)
    }
}

impl CursorNode for serde_json::Value {
    fn cursor_field(&self, column: &str) -> Scalar {
        self.as_object()
            .map_or(Scalar::Null, |object| object.cursor_field(column))
    }
}

impl<T: CursorNode + ?Sized> CursorNode for &T {
    fn cursor_field(&self, column: &str) -> Scalar {
        (**self).cursor_field(column)
    }
}

impl<T: CursorNode + ?Sized> CursorNode for Box<T> {
    fn cursor_field(&self, column: &str) -> Scalar {
        (**self).cursor_field(column)
    }
}

impl<T: CursorNode + ?Sized> CursorNode for Rc<T> {
    fn cursor_field(&self, column: &str) -> Scalar {
        (**self).cursor_field(column)
    }
}

impl<T: CursorNode + ?Sized> CursorNode for Arc<T> {
    fn cursor_field(&self, column: &str) -> Scalar {
        (**self).cursor_field(column)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_object_fields() {
        let row = json!({ "id": 1, "createdAt": "t1" });
        assert_eq!(row.cursor_field("id"), Scalar::Int(1));
        assert_eq!(row.cursor_field("createdAt"), Scalar::from("t1"));
        assert_eq!(row.cursor_field("missing"), Scalar::Null);
    }

    #[test]
    fn non_object_json_reads_null() {
        assert_eq!(json!([1, 2]).cursor_field("id"), Scalar::Null);
        assert_eq!(json!("id").cursor_field("id"), Scalar::Null);
    }

    #[test]
    fn smart_pointers_delegate() {
        let row = Arc::new(json!({ "id": 5 }));
        assert_eq!(row.cursor_field("id"), Scalar::Int(5));
        assert_eq!(Box::new(json!({ "id": 6 })).cursor_field("id"), Scalar::Int(6));
    }
}
