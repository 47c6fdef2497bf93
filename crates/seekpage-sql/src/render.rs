//! Seek query to PostgreSQL statement rendering.

use std::fmt::Write as _;

use seekpage_core::{Predicate, Scalar, SeekQuery};

use crate::{RenderError, RenderResult, TRACING_TARGET_RENDER, quote_identifier};

/// A rendered statement and the values for its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    /// Statement text with `$1`, `$2`, ... placeholders.
    pub sql: String,
    /// Values for the placeholders, in placeholder order.
    pub binds: Vec<Scalar>,
}

/// Renders [`SeekQuery`] values against one table.
///
/// The renderer is immutable and can be shared between requests; a typical
/// executor holds one per table and renders each query it is handed.
#[derive(Debug, Clone)]
pub struct SqlRenderer {
    table: String,
    columns: Option<Vec<String>>,
    scope: Option<Predicate>,
}

impl SqlRenderer {
    /// Creates a renderer selecting every column of `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            scope: None,
        }
    }

    /// Selects only the given columns instead of `*`.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts every statement to rows matching `scope`.
    ///
    /// The scope is AND-ed with the seek predicate, e.g. `"personId" = $1`
    /// to page through the posts of one person.
    pub fn with_scope(mut self, scope: Predicate) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Returns the table name.
    #[inline]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Renders `query` into a `SELECT` statement.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidIdentifier`] for unquotable table or
    /// column names and [`RenderError::ZeroLimit`] for an empty limit.
    pub fn render(&self, query: &SeekQuery) -> RenderResult<RenderedQuery> {
        if query.limit == 0 {
            return Err(RenderError::ZeroLimit);
        }

        let mut binds = Vec::new();
        let mut sql = String::from("SELECT ");

        match &self.columns {
            Some(columns) if !columns.is_empty() => {
                let quoted = columns
                    .iter()
                    .map(|column| quote_identifier(column))
                    .collect::<RenderResult<Vec<_>>>()?;
                sql.push_str(&quoted.join(", "));
            }
            _ => sql.push('*'),
        }

        sql.push_str(" FROM ");
        sql.push_str(&quote_identifier(&self.table)?);

        let conditions: Vec<&Predicate> = self.scope.iter().chain(query.filter.as_ref()).collect();
        if !conditions.is_empty() {
            let rendered = conditions
                .into_iter()
                .map(|predicate| render_predicate(predicate, &mut binds))
                .collect::<RenderResult<Vec<_>>>()?;
            sql.push_str(" WHERE ");
            sql.push_str(&rendered.join(" AND "));
        }

        if !query.order.is_empty() {
            let order = query
                .order
                .iter()
                .map(|entry| Ok(format!("{} {}", quote_identifier(entry.column())?, entry.order())))
                .collect::<RenderResult<Vec<_>>>()?;
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        let _ = write!(sql, " LIMIT {}", query.limit);

        tracing::debug!(
            target: TRACING_TARGET_RENDER,
            table = %self.table,
            sql = %sql,
            binds = binds.len(),
            "Rendered seek query"
        );

        Ok(RenderedQuery { sql, binds })
    }
}

/// Renders a predicate tree, appending its values to `binds`.
///
/// Placeholders are numbered after the values already in `binds`. Compound
/// nodes are always parenthesized. Every value is bound, `null` included, so
/// a comparison against `null` never holds, matching
/// [`Predicate::matches`].
pub fn render_predicate(predicate: &Predicate, binds: &mut Vec<Scalar>) -> RenderResult<String> {
    let (children, joiner) = match predicate {
        Predicate::Comparison(cmp) => {
            let column = quote_identifier(&cmp.column)?;
            binds.push(cmp.value.clone());

            return Ok(format!("{column} {} ${}", cmp.op, binds.len()));
        }
        Predicate::And(children) if children.is_empty() => return Ok("TRUE".to_owned()),
        Predicate::Or(children) if children.is_empty() => return Ok("FALSE".to_owned()),
        Predicate::And(children) => (children, " AND "),
        Predicate::Or(children) => (children, " OR "),
    };

    let rendered = children
        .iter()
        .map(|child| render_predicate(child, binds))
        .collect::<RenderResult<Vec<_>>>()?;

    Ok(format!("({})", rendered.join(joiner)))
}

#[cfg(test)]
mod tests {
    use seekpage_core::{CursorBound, OrderBy, Position, SortOrder};

    use super::*;

    fn seek_query(limit: u32, order: SortOrder, filter: Option<Predicate>) -> SeekQuery {
        SeekQuery {
            limit,
            order: vec![OrderBy::new("createdAt", order), OrderBy::new("id", order)],
            filter,
        }
    }

    #[test]
    fn render_unfiltered_scan() {
        let rendered = SqlRenderer::new("posts")
            .render(&seek_query(2, SortOrder::Asc, None))
            .unwrap();

        assert_eq!(
            rendered.sql,
            r#"SELECT * FROM "posts" ORDER BY "createdAt" ASC, "id" ASC LIMIT 2"#
        );
        assert!(rendered.binds.is_empty());
    }

    #[test]
    fn render_after_cursor() {
        let position = Position::new(2, "t2");
        let filter = Predicate::seek("createdAt", "id", &position, CursorBound::After);
        let rendered = SqlRenderer::new("posts")
            .render(&seek_query(6, SortOrder::Asc, Some(filter)))
            .unwrap();

        assert_eq!(
            rendered.sql,
            concat!(
                r#"SELECT * FROM "posts" "#,
                r#"WHERE ("createdAt" > $1 OR ("createdAt" = $2 AND "id" > $3)) "#,
                r#"ORDER BY "createdAt" ASC, "id" ASC LIMIT 6"#
            )
        );
        assert_eq!(
            rendered.binds,
            vec![Scalar::from("t2"), Scalar::from("t2"), Scalar::Int(2)]
        );
    }

    #[test]
    fn render_scope_columns_and_descending() {
        let position = Position::new(9, "t9");
        let filter = Predicate::seek("createdAt", "id", &position, CursorBound::Before);
        let rendered = SqlRenderer::new("public.posts")
            .with_columns(["id", "title", "createdAt"])
            .with_scope(Predicate::eq("personId", 7))
            .render(&seek_query(10, SortOrder::Desc, Some(filter)))
            .unwrap();

        assert_eq!(
            rendered.sql,
            concat!(
                r#"SELECT "id", "title", "createdAt" FROM "public"."posts" "#,
                r#"WHERE "personId" = $1 AND ("createdAt" < $2 OR ("createdAt" = $3 AND "id" < $4)) "#,
                r#"ORDER BY "createdAt" DESC, "id" DESC LIMIT 10"#
            )
        );
        assert_eq!(rendered.binds.first(), Some(&Scalar::Int(7)));
        assert_eq!(rendered.binds.len(), 4);
    }

    #[test]
    fn render_binds_null_operands() {
        let mut binds = vec![Scalar::Int(4)];
        let predicate = Predicate::and([
            Predicate::eq("deletedAt", Scalar::Null),
            Predicate::lt("id", 9),
        ]);

        assert_eq!(
            render_predicate(&predicate, &mut binds).unwrap(),
            r#"("deletedAt" = $2 AND "id" < $3)"#
        );
        assert_eq!(binds, vec![Scalar::Int(4), Scalar::Null, Scalar::Int(9)]);
    }

    #[test]
    fn render_rejects_bad_input() {
        let renderer = SqlRenderer::new("posts");
        assert_eq!(
            renderer.render(&seek_query(0, SortOrder::Asc, None)),
            Err(RenderError::ZeroLimit)
        );

        let bad = SqlRenderer::new(r#"posts"; DROP TABLE posts; --"#);
        assert!(matches!(
            bad.render(&seek_query(1, SortOrder::Asc, None)),
            Err(RenderError::InvalidIdentifier(_))
        ));
    }
}
