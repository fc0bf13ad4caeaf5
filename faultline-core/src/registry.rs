//! Mapping of HTTP status codes to custom error pages.

use std::collections::HashMap;

use crate::StatusCode;

/// An immutable mapping from HTTP status codes to redirect URLs.
///
/// The registry is built once at startup, typically from configuration, and
/// then shared read-only between all requests (usually behind an
/// [`Arc`](std::sync::Arc)). Lookups never fail: a status code without an
/// entry, or with an empty entry, simply has no custom error page.
///
/// # Examples
///
/// ```
/// use faultline_core::StatusCode;
/// use faultline_core::registry::ErrorPageRegistry;
///
/// let registry = ErrorPageRegistry::from_iter([
///     (StatusCode::NOT_FOUND, "/custom-404"),
///     (StatusCode::FORBIDDEN, ""),
/// ]);
///
/// assert_eq!(registry.redirect_url(StatusCode::NOT_FOUND), Some("/custom-404"));
/// assert_eq!(registry.redirect_url(StatusCode::FORBIDDEN), None);
/// assert_eq!(registry.redirect_url(StatusCode::BAD_REQUEST), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPageRegistry {
    pages: HashMap<StatusCode, String>,
}

impl ErrorPageRegistry {
    /// Creates an empty registry; every lookup falls back to the default
    /// error page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the redirect URL configured for the given status code.
    ///
    /// Unset and empty entries are both reported as [`None`].
    #[must_use]
    pub fn redirect_url(&self, status_code: StatusCode) -> Option<&str> {
        self.pages
            .get(&status_code)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Returns the number of entries, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over the registered status codes and their URLs.
    pub fn iter(&self) -> impl Iterator<Item = (StatusCode, &str)> {
        self.pages
            .iter()
            .map(|(status_code, url)| (*status_code, url.as_str()))
    }
}

impl<U: Into<String>> FromIterator<(StatusCode, U)> for ErrorPageRegistry {
    fn from_iter<T: IntoIterator<Item = (StatusCode, U)>>(iter: T) -> Self {
        Self {
            pages: iter
                .into_iter()
                .map(|(status_code, url)| (status_code, url.into()))
                .collect(),
        }
    }
}

impl From<HashMap<StatusCode, String>> for ErrorPageRegistry {
    fn from(pages: HashMap<StatusCode, String>) -> Self {
        Self { pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_no_pages() {
        let registry = ErrorPageRegistry::new();

        assert!(registry.is_empty());
        assert_eq!(registry.redirect_url(StatusCode::NOT_FOUND), None);
    }

    #[test]
    fn empty_url_is_not_found() {
        let registry = ErrorPageRegistry::from_iter([(StatusCode::NOT_FOUND, String::new())]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.redirect_url(StatusCode::NOT_FOUND), None);
    }

    #[test]
    fn from_hash_map() {
        let mut pages = HashMap::new();
        pages.insert(StatusCode::INTERNAL_SERVER_ERROR, "/oops".to_owned());
        let registry = ErrorPageRegistry::from(pages);

        assert_eq!(
            registry.redirect_url(StatusCode::INTERNAL_SERVER_ERROR),
            Some("/oops")
        );
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            vec![(StatusCode::INTERNAL_SERVER_ERROR, "/oops")]
        );
    }
}
