//! Configuration builder trait
//!
//! Gives configuration structures a consistent API for defaults,
//! validation and environment loading.

use crate::error::Result;

/// Trait for configuration structures that support building and validation
///
/// # Example
///
/// ```rust,ignore
/// use response_parser::config::ConfigBuilder;
///
/// #[derive(Clone, Default)]
/// struct LimitConfig {
///     pub limit: usize,
/// }
///
/// impl ConfigBuilder for LimitConfig {
///     fn validate(&self) -> response_parser::error::Result<()> {
///         Ok(())
///     }
///
///     fn from_env(prefix: &str) -> response_parser::error::Result<Self> {
///         Ok(Self {
///             limit: get_env_parse_or(&build_env_key(prefix, "limit"), 10)?,
///         })
///     }
/// }
/// ```
pub trait ConfigBuilder: Default + Clone {
    /// Validate the configuration
    ///
    /// Returns an error if any value is out of range.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Load configuration from environment variables
    ///
    /// Variables follow the pattern `{PREFIX}{FIELD_NAME}` with the field
    /// name uppercased. Missing variables take the default value.
    fn from_env(prefix: &str) -> Result<Self>;

    /// Create, validate, and return the default configuration
    fn build() -> Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Load from environment and validate the result
    fn from_env_with_defaults(prefix: &str) -> Result<Self> {
        let config = Self::from_env(prefix)?;
        config.validate()?;
        Ok(config)
    }
}
