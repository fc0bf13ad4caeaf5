//! The response body returned to API clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StatusDescriptor;

/// A structured result sent to programmatic clients.
///
/// It serializes as
/// `{"status": {"code": .., "label": ..}, "data": .., "message": ..}`, with
/// missing data serialized as `null`.
///
/// # Examples
///
/// ```
/// use faultline_core::{StatusDescriptor, StructuredResult};
/// use serde_json::json;
///
/// let result = StructuredResult::new(StatusDescriptor::NOT_FOUND, None, "no such user");
/// assert_eq!(
///     serde_json::to_value(&result).unwrap(),
///     json!({
///         "status": {"code": 404, "label": "NotFound"},
///         "data": null,
///         "message": "no such user",
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResult {
    status: StatusDescriptor,
    data: Option<Value>,
    message: String,
}

impl StructuredResult {
    /// Creates a result from its three parts.
    #[must_use]
    pub fn new<M: Into<String>>(status: StatusDescriptor, data: Option<Value>, message: M) -> Self {
        Self {
            status,
            data,
            message: message.into(),
        }
    }

    /// Returns the status descriptor of the failure.
    #[must_use]
    pub fn status(&self) -> &StatusDescriptor {
        &self.status
    }

    /// Returns the payload, or [`None`] when the error carried none.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Returns the raw message; empty when the error had none.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
