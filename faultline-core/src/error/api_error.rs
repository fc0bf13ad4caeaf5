use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde_json::Value;

use crate::StatusDescriptor;

/// An error meant to be surfaced to a programmatic (API) client.
///
/// It carries a [`StatusDescriptor`], an optional message meant for the
/// client and an optional payload. An optional `kind` allows finer
/// classification without introducing new error types.
///
/// # Examples
///
/// ```
/// use faultline_core::{ApiError, StatusDescriptor};
/// use serde_json::json;
///
/// let error = ApiError::new(StatusDescriptor::CONFLICT)
///     .with_message("username already taken")
///     .with_data(json!({"field": "username"}))
///     .with_kind("duplicate_username");
///
/// assert_eq!(error.status(), &StatusDescriptor::CONFLICT);
/// assert_eq!(error.message(), Some("username already taken"));
/// assert_eq!(error.kind(), Some("duplicate_username"));
/// assert_eq!(error.to_string(), "Conflict:username already taken");
/// ```
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusDescriptor,
    message: Option<String>,
    data: Option<Value>,
    kind: Option<Cow<'static, str>>,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl ApiError {
    /// Creates a new API error with the given status and no message.
    #[must_use]
    pub fn new(status: StatusDescriptor) -> Self {
        Self {
            status,
            message: None,
            data: None,
            kind: None,
            source: None,
        }
    }

    /// Sets the message meant for the client.
    #[must_use]
    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the payload returned to the client along with the error.
    #[must_use]
    pub fn with_data<D: Into<Value>>(mut self, data: D) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets a discriminant used for finer classification of the error.
    #[must_use]
    pub fn with_kind<K: Into<Cow<'static, str>>>(mut self, kind: K) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Attaches the underlying cause of this error.
    ///
    /// The cause is only used for diagnostics (logs); it is never exposed to
    /// the client.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Returns the status descriptor reported to the client.
    #[must_use]
    pub fn status(&self) -> &StatusDescriptor {
        &self.status
    }

    /// Returns the message, if any was set. The message may be empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the payload returned to the client, if any.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Returns the discriminant set with [`ApiError::with_kind`].
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns the message if it is present and not empty.
    pub(crate) fn non_empty_message(&self) -> Option<&str> {
        self.message().filter(|message| !message.is_empty())
    }

    /// Returns the label-prefixed message used in logs:
    /// `"<label>:<message>"`, or only the label when there is no message.
    #[must_use]
    pub fn composed_message(&self) -> String {
        match self.non_empty_message() {
            Some(message) => format!("{}:{message}", self.status.label()),
            None => self.status.label().to_owned(),
        }
    }

    pub(crate) fn into_parts(self) -> (StatusDescriptor, Option<String>, Option<Value>) {
        (self.status, self.message, self.data)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.composed_message())
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn composed_message_with_message() {
        let error = ApiError::new(StatusDescriptor::BAD_REQUEST).with_message("missing field");
        assert_eq!(error.composed_message(), "BadRequest:missing field");
    }

    #[test]
    fn composed_message_without_message() {
        let error = ApiError::new(StatusDescriptor::SERVER_ERROR);
        assert_eq!(error.composed_message(), "ServerError");

        let error = ApiError::new(StatusDescriptor::SERVER_ERROR).with_message("");
        assert_eq!(error.composed_message(), "ServerError");
    }

    #[test]
    fn composed_message_with_empty_label() {
        let error = ApiError::new(StatusDescriptor::new(418, "")).with_message("teapot");
        assert_eq!(error.composed_message(), ":teapot");

        let error = ApiError::new(StatusDescriptor::new(418, ""));
        assert_eq!(error.composed_message(), "");
    }

    #[test]
    fn source_is_exposed() {
        let error = ApiError::new(StatusDescriptor::SERVER_ERROR)
            .with_source(std::io::Error::other("connection reset"));

        let source = StdError::source(&error).unwrap();
        assert_eq!(source.to_string(), "connection reset");
    }

    #[test]
    fn clone_shares_data() {
        let error = ApiError::new(StatusDescriptor::OK).with_data(json!({"id": 7}));
        let cloned = error.clone();

        assert_eq!(cloned.data(), Some(&json!({"id": 7})));
        assert_eq!(cloned.status(), error.status());
    }
}
