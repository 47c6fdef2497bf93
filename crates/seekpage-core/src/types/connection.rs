//! Pages of edges returned to the caller.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Cursor;

/// A fetched row paired with the cursor that resumes pagination at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Edge<N> {
    /// Cursor encoding the position of `node`.
    pub cursor: Cursor,
    /// The fetched row.
    pub node: N,
}

impl<N> Edge<N> {
    /// Creates a new edge.
    #[inline]
    pub fn new(cursor: Cursor, node: N) -> Self {
        Self { cursor, node }
    }

    /// Maps the node to a different type, keeping the cursor.
    pub fn map<U, F>(self, f: F) -> Edge<U>
    where
        F: FnOnce(N) -> U,
    {
        Edge {
            cursor: self.cursor,
            node: f(self.node),
        }
    }
}

/// Boundary metadata for a returned page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor of the first edge, or `None` for an empty page.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last edge, or `None` for an empty page.
    pub end_cursor: Option<Cursor>,
    /// Whether more rows exist before this page in the natural order.
    pub has_previous_page: bool,
    /// Whether more rows exist after this page in the natural order.
    pub has_next_page: bool,
}

/// A page of edges plus its page info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Connection<N> {
    /// Edges in the order the executor returned them.
    pub edges: Vec<Edge<N>>,
    /// Boundary metadata.
    pub page_info: PageInfo,
}

impl<N> Connection<N> {
    /// Creates an empty connection with null cursors and both flags unset.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }

    /// Returns the number of edges in the page.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the page has no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns an iterator over the nodes of the page.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Consumes the connection, returning its nodes.
    pub fn into_nodes(self) -> Vec<N> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// Maps the nodes to a different type, keeping cursors and page info.
    pub fn map<U, F>(self, mut f: F) -> Connection<U>
    where
        F: FnMut(N) -> U,
    {
        Connection {
            edges: self.edges.into_iter().map(|edge| edge.map(&mut f)).collect(),
            page_info: self.page_info,
        }
    }
}

impl<N> Default for Connection<N> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_connection_shape() {
        let connection: Connection<u32> = Connection::empty();
        assert!(connection.is_empty());

        assert_eq!(
            serde_json::to_value(&connection).unwrap(),
            json!({
                "edges": [],
                "pageInfo": {
                    "startCursor": null,
                    "endCursor": null,
                    "hasPreviousPage": false,
                    "hasNextPage": false
                }
            })
        );
    }

    #[test]
    fn connection_map_keeps_cursors() {
        let connection = Connection {
            edges: vec![
                Edge::new(Cursor::new("a"), 1),
                Edge::new(Cursor::new("b"), 2),
            ],
            page_info: PageInfo {
                start_cursor: Some(Cursor::new("a")),
                end_cursor: Some(Cursor::new("b")),
                has_previous_page: false,
                has_next_page: true,
            },
        };

        let mapped = connection.map(|n| n * 10);
        assert_eq!(mapped.nodes().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(mapped.edges[1].cursor, Cursor::new("b"));
        assert!(mapped.page_info.has_next_page);
        assert_eq!(mapped.into_nodes(), vec![10, 20]);
    }
}
