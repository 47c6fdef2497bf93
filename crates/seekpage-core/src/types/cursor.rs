//! Opaque cursors and the page positions they encode.
//!
//! A cursor is the URL-safe base64 encoding of a JSON object
//! `{"id": <scalar>, "pivot": <scalar>}`. The pair is the row's place in the
//! `(pivot, id)` ordering, so resuming from it never depends on offsets.

use base64::prelude::*;
use derive_more::{Display, From, Into};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CursorNode, Scalar};
use crate::{Error, Result, TRACING_TARGET_CURSOR};

/// A resumable position in a `(pivot, id)` ordered collection.
///
/// Because `id` is unique, two distinct rows never share a position, which
/// makes the ordering strict even when the pivot column has ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Position {
    /// Unique identifier of the row.
    pub id: Scalar,
    /// Value of the pivot column for the row at query time.
    pub pivot: Scalar,
}

impl Position {
    /// Creates a new position from an id and a pivot value.
    pub fn new(id: impl Into<Scalar>, pivot: impl Into<Scalar>) -> Self {
        Self {
            id: id.into(),
            pivot: pivot.into(),
        }
    }

    /// Reads the position of `node` for the given pivot and id columns.
    pub fn from_node<N>(node: &N, pivot_column: &str, id_column: &str) -> Self
    where
        N: CursorNode + ?Sized,
    {
        Self {
            id: node.cursor_field(id_column),
            pivot: node.cursor_field(pivot_column),
        }
    }

    /// Returns whether both `id` and `pivot` have a place in a total order.
    ///
    /// Only such positions decode back from a cursor.
    pub fn is_orderable(&self) -> bool {
        self.id.is_orderable() && self.pivot.is_orderable()
    }

    /// Encodes the position as an opaque cursor.
    ///
    /// Encoding is deterministic: equal positions produce equal cursors.
    /// Non-finite floats encode as `null`, and cursors carrying `null` are
    /// rejected by [`Position::decode`]; the paginator never encodes a
    /// position that is not [orderable](Position::is_orderable).
    pub fn encode(&self) -> Cursor {
        let mut object = serde_json::Map::new();
        object.insert("id".to_owned(), self.id.clone().into());
        object.insert("pivot".to_owned(), self.pivot.clone().into());

        let json = serde_json::Value::Object(object).to_string();
        Cursor(BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes()))
    }

    /// Decodes a position from a cursor string.
    ///
    /// Accepts URL-safe base64 as produced by [`Position::encode`] as well as
    /// standard padded base64. No semantic validation is performed; whether
    /// the position still refers to a row only matters to the query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCursor`] if the string is not base64, not
    /// JSON, not an object with scalar `id` and `pivot` fields, or if either
    /// field is `null`.
    pub fn decode(encoded: &str) -> Result<Self> {
        let trimmed = encoded.trim_end_matches('=');
        if trimmed.is_empty() {
            return Err(Error::malformed_cursor("cursor is empty"));
        }

        let bytes = BASE64_URL_SAFE_NO_PAD
            .decode(trimmed)
            .or_else(|_| BASE64_STANDARD_NO_PAD.decode(trimmed))
            .map_err(|err| {
                tracing::warn!(target: TRACING_TARGET_CURSOR, error = %err, "Cursor is not base64");
                Error::malformed_cursor_with("cursor is not valid base64", err)
            })?;

        let payload: serde_json::Value = serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(target: TRACING_TARGET_CURSOR, error = %err, "Cursor payload is not JSON");
            Error::malformed_cursor_with("cursor payload is not JSON", err)
        })?;

        // Serde would also accept a two-element array for the struct.
        if !payload.is_object() {
            tracing::warn!(target: TRACING_TARGET_CURSOR, "Cursor payload is not an object");
            return Err(Error::malformed_cursor("cursor payload is not an object"));
        }

        let position: Self = serde_json::from_value(payload).map_err(|err| {
            tracing::warn!(target: TRACING_TARGET_CURSOR, error = %err, "Cursor payload is not a position");
            Error::malformed_cursor_with("cursor does not encode an {id, pivot} object", err)
        })?;

        if !position.is_orderable() {
            tracing::warn!(target: TRACING_TARGET_CURSOR, "Cursor position has a null field");
            return Err(Error::malformed_cursor("cursor position has a null id or pivot"));
        }

        Ok(position)
    }
}

/// An opaque, transport-safe page position token.
///
/// Clients must treat the content as opaque; only [`Position::decode`]
/// gives it meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps an encoded cursor string received from a client.
    #[inline]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded cursor string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the position this cursor refers to.
    #[inline]
    pub fn position(&self) -> Result<Position> {
        Position::decode(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(encoded: &str) -> Self {
        Self(encoded.to_owned())
    }
}

impl From<&Position> for Cursor {
    fn from(position: &Position) -> Self {
        position.encode()
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
