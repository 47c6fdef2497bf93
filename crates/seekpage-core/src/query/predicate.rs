//! Storage-agnostic comparison trees.
//!
//! Seek predicates are expressed as a small tree of comparisons joined by
//! `AND`/`OR`. Each storage adapter translates the tree into its own query
//! language; the engine never depends on a particular query builder.

use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{Position, Scalar};

/// Comparison operator of a [`Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    /// `column > value`
    Gt,
    /// `column < value`
    Lt,
    /// `column = value`
    Eq,
}

impl ComparisonOp {
    /// Returns the SQL spelling of the operator.
    #[inline]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Eq => "=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single `column op value` test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Comparison {
    /// Column name as understood by the executor.
    pub column: String,
    /// Comparison operator.
    pub op: ComparisonOp,
    /// Right-hand operand.
    pub value: Scalar,
}

/// Which side of a cursor a seek predicate selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorBound {
    /// Rows strictly after the cursor position.
    After,
    /// Rows strictly before the cursor position.
    Before,
}

impl CursorBound {
    /// Returns the strict comparison used for this bound.
    #[inline]
    pub fn op(self) -> ComparisonOp {
        match self {
            Self::After => ComparisonOp::Gt,
            Self::Before => ComparisonOp::Lt,
        }
    }
}

/// A comparison tree over named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// A single comparison.
    Comparison(Comparison),
    /// All children must hold. An empty list is always true.
    And(Vec<Predicate>),
    /// At least one child must hold. An empty list is always false.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Creates a `column op value` comparison.
    pub fn compare(column: impl Into<String>, op: ComparisonOp, value: impl Into<Scalar>) -> Self {
        Self::Comparison(Comparison {
            column: column.into(),
            op,
            value: value.into(),
        })
    }

    /// Creates a `column > value` comparison.
    #[inline]
    pub fn gt(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::compare(column, ComparisonOp::Gt, value)
    }

    /// Creates a `column < value` comparison.
    #[inline]
    pub fn lt(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::compare(column, ComparisonOp::Lt, value)
    }

    /// Creates a `column = value` comparison.
    #[inline]
    pub fn eq(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::compare(column, ComparisonOp::Eq, value)
    }

    /// Joins predicates with `AND`.
    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self::And(predicates.into_iter().collect())
    }

    /// Joins predicates with `OR`.
    pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self::Or(predicates.into_iter().collect())
    }

    /// Builds the keyset predicate selecting rows on one side of `position`.
    ///
    /// For [`CursorBound::After`] this is
    /// `pivot > p OR (pivot = p AND id > i)`; [`CursorBound::Before`] uses `<`.
    pub fn seek(pivot_column: &str, id_column: &str, position: &Position, bound: CursorBound) -> Self {
        let op = bound.op();

        Self::or([
            Self::compare(pivot_column, op, position.pivot.clone()),
            Self::and([
                Self::eq(pivot_column, position.pivot.clone()),
                Self::compare(id_column, op, position.id.clone()),
            ]),
        ])
    }

    /// Evaluates the predicate against a column lookup.
    ///
    /// Follows SQL comparison semantics: a comparison with `null` on either
    /// side is false, as is one between values of incompatible kinds.
    pub fn matches<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Scalar,
    {
        use std::cmp::Ordering;

        match self {
            Self::Comparison(cmp) => {
                let value = lookup(&cmp.column);
                if value.is_null() || cmp.value.is_null() {
                    return false;
                }

                let ordering = value.partial_cmp(&cmp.value);
                match cmp.op {
                    ComparisonOp::Gt => ordering == Some(Ordering::Greater),
                    ComparisonOp::Lt => ordering == Some(Ordering::Less),
                    ComparisonOp::Eq => ordering == Some(Ordering::Equal),
                }
            }
            Self::And(children) => children.iter().all(|child| child.matches(lookup)),
            Self::Or(children) => children.iter().any(|child| child.matches(lookup)),
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        let (children, joiner) = match self {
            Self::Comparison(cmp) => {
                return write!(f, "{} {} {}", cmp.column, cmp.op, cmp.value);
            }
            Self::And(children) if children.is_empty() => return f.write_str("TRUE"),
            Self::Or(children) if children.is_empty() => return f.write_str("FALSE"),
            Self::And(children) => (children, " AND "),
            Self::Or(children) => (children, " OR "),
        };

        if nested {
            f.write_str("(")?;
        }

        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            child.fmt_nested(f, true)?;
        }

        if nested {
            f.write_str(")")?;
        }

        Ok(())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, false)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn seek_after_shape() {
        let position = Position::new(2, "t2");
        let predicate = Predicate::seek("createdAt", "id", &position, CursorBound::After);

        assert_eq!(
            predicate,
            Predicate::Or(vec![
                Predicate::gt("createdAt", "t2"),
                Predicate::And(vec![
                    Predicate::eq("createdAt", "t2"),
                    Predicate::gt("id", 2),
                ]),
            ])
        );
        assert_eq!(
            predicate.to_string(),
            r#"createdAt > "t2" OR (createdAt = "t2" AND id > 2)"#
        );
    }

    #[test]
    fn seek_before_shape() {
        let position = Position::new(2, "t2");
        let predicate = Predicate::seek("createdAt", "id", &position, CursorBound::Before);

        assert_eq!(
            predicate.to_string(),
            r#"createdAt < "t2" OR (createdAt = "t2" AND id < 2)"#
        );
    }

    #[test]
    fn predicate_matches_rows() {
        let position = Position::new(2, "t2");
        let after = Predicate::seek("createdAt", "id", &position, CursorBound::After);

        let row = |id: i64, at: &str| {
            let row = json!({ "id": id, "createdAt": at });
            move |column: &str| Scalar::from_json(&row[column])
        };

        assert!(!after.matches(&row(1, "t1")));
        assert!(!after.matches(&row(2, "t2")));
        assert!(after.matches(&row(3, "t2")));
        assert!(after.matches(&row(1, "t3")));
    }

    #[test]
    fn null_comparisons_never_match() {
        let lookup = |column: &str| match column {
            "id" => Scalar::Int(1),
            _ => Scalar::Null,
        };

        assert!(!Predicate::eq("createdAt", Scalar::Null).matches(&lookup));
        assert!(!Predicate::gt("createdAt", "t1").matches(&lookup));
        assert!(!Predicate::lt("createdAt", "t1").matches(&lookup));
        assert!(!Predicate::eq("id", Scalar::Null).matches(&lookup));
        assert!(Predicate::eq("id", 1).matches(&lookup));
    }

    #[test]
    fn empty_junctions() {
        let lookup = |_: &str| Scalar::Null;
        assert!(Predicate::And(vec![]).matches(&lookup));
        assert!(!Predicate::Or(vec![]).matches(&lookup));
        assert_eq!(Predicate::And(vec![]).to_string(), "TRUE");
        assert_eq!(Predicate::Or(vec![]).to_string(), "FALSE");
    }

    #[test]
    fn predicate_serializes_as_tagged_tree() {
        let predicate = Predicate::gt("id", 2);
        assert_eq!(
            serde_json::to_value(&predicate).unwrap(),
            json!({ "comparison": { "column": "id", "op": "gt", "value": 2 } })
        );
    }
}
