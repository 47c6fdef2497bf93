//! Identifier quoting.

use crate::{RenderError, RenderResult};

/// Quotes a possibly schema-qualified identifier for PostgreSQL.
///
/// Each dot-separated part is wrapped in double quotes, so `public.posts`
/// becomes `"public"."posts"` and `createdAt` keeps its case.
///
/// # Errors
///
/// Returns [`RenderError::InvalidIdentifier`] for empty parts and for names
/// containing a double quote or NUL.
pub fn quote_identifier(name: &str) -> RenderResult<String> {
    let mut quoted = String::with_capacity(name.len() + 2);

    for (i, part) in name.split('.').enumerate() {
        if part.is_empty() || part.contains(['"', '\0']) {
            return Err(RenderError::InvalidIdentifier(name.to_owned()));
        }

        if i > 0 {
            quoted.push('.');
        }
        quoted.push('"');
        quoted.push_str(part);
        quoted.push('"');
    }

    Ok(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_simple_and_qualified() {
        assert_eq!(quote_identifier("createdAt").unwrap(), r#""createdAt""#);
        assert_eq!(quote_identifier("public.posts").unwrap(), r#""public"."posts""#);
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        for name in ["", "a..b", ".a", r#"x" OR 1=1 --"#, "nul\0"] {
            assert_eq!(
                quote_identifier(name),
                Err(RenderError::InvalidIdentifier(name.to_owned()))
            );
        }
    }
}
