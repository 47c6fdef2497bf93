//! Bounded, ordered query descriptions.

use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Predicate;

/// Sort order direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending order (oldest first, smallest first).
    #[default]
    Asc,
    /// Descending order (newest first, largest first).
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword for the direction.
    #[inline]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Returns whether the sort order is ascending.
    #[inline]
    pub fn is_asc(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// Returns whether the sort order is descending.
    #[inline]
    pub fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One `[column, direction]` entry of an ordering.
///
/// Serializes as a two-element array, e.g. `["createdAt", "ASC"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OrderBy(pub String, pub SortOrder);

impl OrderBy {
    /// Creates a new ordering entry.
    #[inline]
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self(column.into(), order)
    }

    /// Returns the column name.
    #[inline]
    pub fn column(&self) -> &str {
        &self.0
    }

    /// Returns the direction.
    #[inline]
    pub fn order(&self) -> SortOrder {
        self.1
    }
}

/// A bounded seek query: at most `limit` rows matching `filter`, in `order`.
///
/// Executors must honor `limit` and `order` exactly; the engine never
/// re-sorts or re-limits what they return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SeekQuery {
    /// Maximum number of rows to return. Always greater than zero.
    pub limit: u32,
    /// Ordering as `(pivot, dir), (id, dir)`.
    pub order: Vec<OrderBy>,
    /// Seek predicate, or `None` for a scan from one end.
    #[serde(rename = "where")]
    pub filter: Option<Predicate>,
}

impl SeekQuery {
    /// Returns the direction of the primary ordering.
    pub fn direction(&self) -> SortOrder {
        self.order.first().map(OrderBy::order).unwrap_or_default()
    }

    /// Returns the limit as a `usize`.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit as usize
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn seek_query_wire_shape() {
        let query = SeekQuery {
            limit: 2,
            order: vec![
                OrderBy::new("createdAt", SortOrder::Asc),
                OrderBy::new("id", SortOrder::Asc),
            ],
            filter: None,
        };

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "limit": 2,
                "order": [["createdAt", "ASC"], ["id", "ASC"]],
                "where": null
            })
        );
        assert_eq!(query.direction(), SortOrder::Asc);
    }

    #[test]
    fn sort_order_sql() {
        assert_eq!(SortOrder::Desc.to_string(), "DESC");
        assert!(SortOrder::default().is_asc());
    }
}
