//! Pagination configuration.
//!
//! The engine itself reads nothing from the environment; callers build a
//! [`PaginationConfig`] programmatically, deserialize it, or (with the
//! `config` feature) parse it from command-line arguments and `SEEKPAGE_*`
//! environment variables.

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};

use crate::{Error, Result, TRACING_TARGET_CONFIG};

/// Page size used when neither `first` nor `last` is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound applied to `first` and `last`.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Default name of the unique tie-breaking column.
pub const DEFAULT_ID_COLUMN: &str = "id";

/// How `hasPreviousPage` and `hasNextPage` are computed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PageInfoMode {
    /// Both flags are always `false` and exactly `limit` rows are requested.
    ///
    /// Matches legacy resolvers that never fetched an extra row; clients
    /// cannot tell the last page from a full one.
    Unchecked,
    /// One extra row is requested; its presence sets the flag for the scan
    /// direction and the row is dropped before edges are built.
    #[default]
    Lookahead,
}

/// How contradictory connection arguments are handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArgumentPolicy {
    /// `first` with `last`, or `after` with `before`, is rejected.
    #[default]
    Strict,
    /// `last` takes priority over `first`, and `after` over `before`.
    LastWins,
}

/// Configuration of a [`Paginator`].
///
/// [`Paginator`]: crate::Paginator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
#[must_use = "configurations must be used to create a paginator"]
pub struct PaginationConfig {
    /// Page size when neither `first` nor `last` is supplied
    #[cfg_attr(
        feature = "config",
        arg(
            long = "seekpage-default-page-size",
            env = "SEEKPAGE_DEFAULT_PAGE_SIZE",
            default_value = "10"
        )
    )]
    pub default_page_size: u32,

    /// Largest page a caller may request
    #[cfg_attr(
        feature = "config",
        arg(
            long = "seekpage-max-page-size",
            env = "SEEKPAGE_MAX_PAGE_SIZE",
            default_value = "100"
        )
    )]
    pub max_page_size: u32,

    /// How page existence flags are computed
    #[cfg_attr(
        feature = "config",
        arg(
            long = "seekpage-page-info",
            env = "SEEKPAGE_PAGE_INFO",
            value_enum,
            default_value = "lookahead"
        )
    )]
    pub page_info: PageInfoMode,

    /// How contradictory arguments are handled
    #[cfg_attr(
        feature = "config",
        arg(
            long = "seekpage-argument-policy",
            env = "SEEKPAGE_ARGUMENT_POLICY",
            value_enum,
            default_value = "strict"
        )
    )]
    pub argument_policy: ArgumentPolicy,

    /// Name of the unique tie-breaking column
    #[cfg_attr(
        feature = "config",
        arg(
            long = "seekpage-id-column",
            env = "SEEKPAGE_ID_COLUMN",
            default_value = "id"
        )
    )]
    pub id_column: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            page_info: PageInfoMode::default(),
            argument_policy: ArgumentPolicy::default(),
            id_column: DEFAULT_ID_COLUMN.to_owned(),
        }
    }
}

impl PaginationConfig {
    /// Creates a configuration that reproduces legacy resolver behaviour.
    ///
    /// Page flags are always `false` and `last`/`after` silently win over
    /// `first`/`before`.
    pub fn legacy() -> Self {
        Self {
            page_info: PageInfoMode::Unchecked,
            argument_policy: ArgumentPolicy::LastWins,
            ..Self::default()
        }
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, default_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self
    }

    /// Sets the largest page a caller may request.
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Sets how page existence flags are computed.
    pub fn with_page_info(mut self, page_info: PageInfoMode) -> Self {
        self.page_info = page_info;
        self
    }

    /// Sets how contradictory arguments are handled.
    pub fn with_argument_policy(mut self, argument_policy: ArgumentPolicy) -> Self {
        self.argument_policy = argument_policy;
        self
    }

    /// Sets the name of the unique tie-breaking column.
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a page size is zero, the default page
    /// size exceeds the maximum, or the id column is empty.
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(Error::Config("max page size must be at least 1".into()));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(Error::Config(
                format!(
                    "default page size must be between 1 and {}, got {}",
                    self.max_page_size, self.default_page_size
                )
                .into(),
            ));
        }

        if self.id_column.is_empty() {
            return Err(Error::Config("id column must not be empty".into()));
        }

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            default_page_size = self.default_page_size,
            max_page_size = self.max_page_size,
            page_info = self.page_info.as_ref(),
            argument_policy = self.argument_policy.as_ref(),
            id_column = %self.id_column,
            "Validated pagination configuration"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PaginationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.page_info, PageInfoMode::Lookahead);
        assert_eq!(config.argument_policy, ArgumentPolicy::Strict);
        assert_eq!(config.id_column, "id");
    }

    #[test]
    fn legacy_config() {
        let config = PaginationConfig::legacy();
        assert_eq!(config.page_info, PageInfoMode::Unchecked);
        assert_eq!(config.argument_policy, ArgumentPolicy::LastWins);
    }

    #[test]
    fn invalid_configs() {
        let cases = [
            PaginationConfig::default().with_max_page_size(0),
            PaginationConfig::default().with_default_page_size(0),
            PaginationConfig::default().with_default_page_size(101),
            PaginationConfig::default().with_id_column(""),
        ];

        for config in cases {
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::Configuration);
        }
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: PaginationConfig =
            serde_json::from_value(json!({ "page_info": "unchecked", "max_page_size": 50 }))
                .unwrap();

        assert_eq!(config.page_info, PageInfoMode::Unchecked);
        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.id_column, DEFAULT_ID_COLUMN);
    }
}
