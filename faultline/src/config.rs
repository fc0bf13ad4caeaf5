//! Configuration of the error translation layer.
//!
//! The configuration is usually loaded from a TOML file:
//!
//! ```toml
//! [error_pages]
//! 404 = "/custom-404"
//! 500 = "https://status.example.com/"
//! ```
//!
//! Every entry maps an HTTP status code to the URL browsers are redirected
//! to when a [`ViewError`](crate::ViewError) with that status is raised.
//! Status codes without an entry (or with an empty one) fall back to the
//! default error page.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StatusCode;
use crate::registry::ErrorPageRegistry;

/// An error that occurs while loading the configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML or does not match the expected
    /// structure.
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The configuration of the error translation layer.
///
/// # Examples
///
/// ```
/// use faultline::StatusCode;
/// use faultline::config::{ErrorPagesConfig, FaultlineConfig};
///
/// let config = FaultlineConfig::builder()
///     .error_pages(ErrorPagesConfig::from_iter([(
///         StatusCode::NOT_FOUND,
///         "/custom-404",
///     )]))
///     .build();
///
/// assert_eq!(
///     config.error_pages.get(StatusCode::NOT_FOUND),
///     Some("/custom-404")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(build_fn(skip, error = std::convert::Infallible))]
#[serde(default)]
pub struct FaultlineConfig {
    /// Custom error pages, keyed by HTTP status code.
    #[builder(setter(into))]
    pub error_pages: ErrorPagesConfig,
}

impl FaultlineConfig {
    #[must_use]
    pub fn builder() -> FaultlineConfigBuilder {
        FaultlineConfigBuilder::default()
    }

    /// Parses the configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the string is not valid TOML, or if
    /// an error page is registered for something that is not an HTTP
    /// status code.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline::StatusCode;
    /// use faultline::config::FaultlineConfig;
    ///
    /// let config = FaultlineConfig::from_toml(
    ///     r#"
    ///     [error_pages]
    ///     404 = "/custom-404"
    ///     "#,
    /// )?;
    /// assert_eq!(
    ///     config.error_pages.get(StatusCode::NOT_FOUND),
    ///     Some("/custom-404")
    /// );
    /// # Ok::<(), faultline::config::ConfigError>(())
    /// ```
    pub fn from_toml(config: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(config)?)
    }

    /// Reads and parses the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&config)
    }

    /// Builds the registry of custom error pages.
    #[must_use]
    pub fn error_page_registry(&self) -> ErrorPageRegistry {
        ErrorPageRegistry::from(self.error_pages.pages.clone())
    }
}

impl FaultlineConfigBuilder {
    /// Builds the configuration.
    #[must_use]
    pub fn build(&self) -> FaultlineConfig {
        FaultlineConfig {
            error_pages: self.error_pages.clone().unwrap_or_default(),
        }
    }
}

/// Custom error pages, keyed by HTTP status code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPagesConfig {
    #[serde(with = "crate::serializers::status_code_map")]
    pages: HashMap<StatusCode, String>,
}

impl ErrorPagesConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the URL configured for the status code, as written in the
    /// configuration (it may be empty).
    #[must_use]
    pub fn get(&self, status_code: StatusCode) -> Option<&str> {
        self.pages.get(&status_code).map(String::as_str)
    }

    /// Registers a custom error page for the status code.
    pub fn insert<U: Into<String>>(&mut self, status_code: StatusCode, url: U) -> &mut Self {
        self.pages.insert(status_code, url.into());
        self
    }
}

impl<U: Into<String>> FromIterator<(StatusCode, U)> for ErrorPagesConfig {
    fn from_iter<T: IntoIterator<Item = (StatusCode, U)>>(iter: T) -> Self {
        Self {
            pages: iter
                .into_iter()
                .map(|(status_code, url)| (status_code, url.into()))
                .collect(),
        }
    }
}
