use std::any::type_name;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::StatusCode;

/// An error meant to be surfaced to a browser.
///
/// It carries the HTTP status code of the page that should be shown and an
/// optional message. A view error is turned either into a redirect to a
/// configured custom error page, or into a rendered default error page.
///
/// The default error page exposes the concrete type of the failure (see
/// [`ViewError::exception_type`]). A view error built with
/// [`ViewError::new`] reports its own type, while one built with
/// [`ViewError::wrap`] reports the type of the wrapped domain error.
///
/// # Examples
///
/// ```
/// use faultline_core::{StatusCode, ViewError};
///
/// let error = ViewError::new(StatusCode::FORBIDDEN).with_message("forbidden");
/// assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
/// assert_eq!(error.message(), Some("forbidden"));
/// assert!(error.exception_type().ends_with("ViewError"));
/// ```
#[derive(Debug, Clone)]
pub struct ViewError {
    status_code: StatusCode,
    message: Option<String>,
    kind: Option<Cow<'static, str>>,
    type_name: &'static str,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl ViewError {
    /// Creates a new view error with the given HTTP status code.
    #[must_use]
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            message: None,
            kind: None,
            type_name: type_name::<Self>(),
            source: None,
        }
    }

    /// Creates a view error out of a domain error.
    ///
    /// The domain error's message becomes the view error's message, and
    /// the domain error's type is reported as the exception type.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline_core::{StatusCode, ViewError};
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// #[error("article {0} is not published yet")]
    /// struct ArticleNotPublished(u32);
    ///
    /// let error = ViewError::wrap(StatusCode::NOT_FOUND, ArticleNotPublished(12));
    /// assert_eq!(error.message(), Some("article 12 is not published yet"));
    /// assert!(error.exception_type().ends_with("ArticleNotPublished"));
    /// ```
    #[must_use]
    pub fn wrap<E>(status_code: StatusCode, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            status_code,
            message: Some(error.to_string()),
            kind: None,
            type_name: type_name::<E>(),
            source: Some(Arc::new(error)),
        }
    }

    /// Sets the message shown on the error page.
    #[must_use]
    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets a discriminant used for finer classification of the error.
    #[must_use]
    pub fn with_kind<K: Into<Cow<'static, str>>>(mut self, kind: K) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Attaches the underlying cause of this error. Unlike
    /// [`ViewError::wrap`], this does not change the reported exception type.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Returns the HTTP status code of the error page.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// Returns the message, if any was set. The message may be empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the discriminant set with [`ViewError::with_kind`].
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns the fully-qualified name of the concrete error type.
    #[must_use]
    pub fn exception_type(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn non_empty_message(&self) -> Option<&str> {
        self.message().filter(|message| !message.is_empty())
    }
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.non_empty_message() {
            Some(message) => write!(f, "{}: {message}", self.status_code),
            None => Display::fmt(&self.status_code, f),
        }
    }
}

impl StdError for ViewError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn StdError + 'static))
    }
}
