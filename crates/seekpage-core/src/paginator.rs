//! Seek-query builder and page assembler.

use validator::Validate;

use crate::query::{CursorBound, OrderBy, Predicate, QueryExecutor, SeekQuery, SortOrder};
use crate::types::{Connection, CursorNode, Edge, PageInfo, PaginationArgs, Position};
use crate::{ArgumentPolicy, Error, PageInfoMode, PaginationConfig, Result, TRACING_TARGET_QUERY};

/// A planned seek query together with what is needed to assemble its page.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekPlan {
    query: SeekQuery,
    page_size: u32,
    pivot_column: String,
    id_column: String,
    page_info: PageInfoMode,
}

impl SeekPlan {
    /// Returns the query to hand to the executor.
    #[inline]
    pub fn query(&self) -> &SeekQuery {
        &self.query
    }

    /// Returns the number of edges the page may hold.
    ///
    /// With [`PageInfoMode::Lookahead`] the query limit is one larger.
    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the scan direction.
    #[inline]
    pub fn direction(&self) -> SortOrder {
        self.query.direction()
    }

    /// Wraps executor rows into edges and computes page info.
    ///
    /// Rows are kept in the order given; nothing is re-sorted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if any row, the lookahead row
    /// included, has a null or non-finite id or pivot value. The seek
    /// predicate never matches such a row, so paging past it would lose it.
    pub fn assemble<N: CursorNode>(&self, mut rows: Vec<N>) -> Result<Connection<N>> {
        let mut positions = rows
            .iter()
            .map(|node| self.position(node))
            .collect::<Result<Vec<_>>>()?;

        let has_more = match self.page_info {
            PageInfoMode::Lookahead => rows.len() > self.page_size as usize,
            PageInfoMode::Unchecked => false,
        };

        if has_more {
            rows.truncate(self.page_size as usize);
            positions.truncate(self.page_size as usize);
        }

        let edges: Vec<Edge<N>> = positions
            .iter()
            .zip(rows)
            .map(|(position, node)| Edge::new(position.encode(), node))
            .collect();

        let direction = self.direction();
        let page_info = PageInfo {
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
            has_previous_page: has_more && direction.is_desc(),
            has_next_page: has_more && direction.is_asc(),
        };

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            edges = edges.len(),
            has_previous_page = page_info.has_previous_page,
            has_next_page = page_info.has_next_page,
            "Assembled page"
        );

        Ok(Connection { edges, page_info })
    }

    fn position<N: CursorNode>(&self, node: &N) -> Result<Position> {
        let position = Position::from_node(node, &self.pivot_column, &self.id_column);
        if position.is_orderable() {
            return Ok(position);
        }

        tracing::warn!(
            target: TRACING_TARGET_QUERY,
            id = %position.id,
            pivot = %position.pivot,
            "Row has a null or non-finite cursor field"
        );

        Err(Error::invalid_node(format!(
            "`{}` or `{}` is null or not finite (id = {}, pivot = {})",
            self.id_column, self.pivot_column, position.id, position.pivot
        )))
    }
}

/// Keyset pagination engine.
///
/// Turns [`PaginationArgs`] into one bounded [`SeekQuery`], runs it through
/// an injected [`QueryExecutor`], and assembles a [`Connection`]. The
/// paginator holds only its configuration, so it can be cloned and shared
/// freely; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PaginationConfig,
}

impl Paginator {
    /// Creates a paginator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: PaginationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the paginator configuration.
    #[inline]
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Plans the seek query for `args` without executing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCursor`] if a cursor does not decode, and
    /// [`Error::InvalidArguments`] if the arguments are contradictory or a
    /// count is zero.
    pub fn plan(&self, pivot_column: &str, args: &PaginationArgs) -> Result<SeekPlan> {
        args.validate()
            .map_err(|err| Error::invalid_arguments(err.to_string()))?;

        if self.config.argument_policy == ArgumentPolicy::Strict {
            if args.first.is_some() && args.last.is_some() {
                return Err(Error::invalid_arguments(
                    "`first` and `last` cannot be combined",
                ));
            }
            if args.after.is_some() && args.before.is_some() {
                return Err(Error::invalid_arguments(
                    "`after` and `before` cannot be combined",
                ));
            }
        }

        let (direction, requested) = match (args.last, args.first) {
            (Some(last), _) => (SortOrder::Desc, last),
            (None, Some(first)) => (SortOrder::Asc, first),
            (None, None) => (SortOrder::Asc, self.config.default_page_size),
        };
        let page_size = requested.min(self.config.max_page_size);

        let id_column = self.config.id_column.as_str();
        let filter = match (&args.after, &args.before) {
            (Some(cursor), _) => Some((cursor, CursorBound::After)),
            (None, Some(cursor)) => Some((cursor, CursorBound::Before)),
            (None, None) => None,
        }
        .map(|(cursor, bound)| {
            cursor
                .position()
                .map(|position| Predicate::seek(pivot_column, id_column, &position, bound))
        })
        .transpose()?;

        let limit = match self.config.page_info {
            PageInfoMode::Lookahead => page_size.saturating_add(1),
            PageInfoMode::Unchecked => page_size,
        };

        let query = SeekQuery {
            limit,
            order: vec![
                OrderBy::new(pivot_column, direction),
                OrderBy::new(id_column, direction),
            ],
            filter,
        };

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            pivot_column,
            limit,
            direction = direction.as_sql(),
            filter = ?query.filter.as_ref().map(ToString::to_string),
            "Planned seek query"
        );

        Ok(SeekPlan {
            query,
            page_size,
            pivot_column: pivot_column.to_owned(),
            id_column: id_column.to_owned(),
            page_info: self.config.page_info,
        })
    }

    /// Fetches one page through `executor`.
    ///
    /// Decodes any cursor, issues exactly one query, and assembles the rows.
    ///
    /// # Errors
    ///
    /// Cursor and argument errors are returned before the executor is
    /// called. Executor failures are returned as [`Error::Executor`]
    /// unchanged. Rows without an orderable id or pivot are rejected with
    /// [`Error::InvalidNode`].
    #[tracing::instrument(
        skip(self, executor, args),
        target = TRACING_TARGET_QUERY,
        fields(first = ?args.first, last = ?args.last)
    )]
    pub async fn paginate<E>(
        &self,
        executor: &E,
        pivot_column: &str,
        args: &PaginationArgs,
    ) -> Result<Connection<E::Node>>
    where
        E: QueryExecutor + ?Sized,
        E::Node: CursorNode,
    {
        let plan = self.plan(pivot_column, args)?;

        let rows = executor.execute(plan.query().clone()).await.map_err(|err| {
            let err = Error::executor(err);
            tracing::warn!(target: TRACING_TARGET_QUERY, error = %err, "Seek query failed");
            err
        })?;

        plan.assemble(rows)
    }
}

/// Fetches one page with the default configuration.
///
/// Shorthand for [`Paginator::default`] followed by [`Paginator::paginate`].
pub async fn connection_from_executor<E>(
    executor: &E,
    pivot_column: &str,
    args: &PaginationArgs,
) -> Result<Connection<E::Node>>
where
    E: QueryExecutor + ?Sized,
    E::Node: CursorNode,
{
    Paginator::default()
        .paginate(executor, pivot_column, args)
        .await
}
