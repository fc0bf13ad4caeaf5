//! Instructions for browser-facing error responses.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// The name of the view rendered when no custom error page is configured.
pub const ERROR_VIEW: &str = "error";

/// The message shown on the default error page when the error has none.
pub const NO_MESSAGE_AVAILABLE: &str = "No message available";

/// What a browser should be shown for a view error.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewInstruction {
    /// Redirect the browser to a custom error page.
    Redirect {
        /// The target of the redirect.
        url: String,
    },
    /// Render a view with the given model.
    Render {
        /// The name of the view; [`ERROR_VIEW`] for the default error page.
        view_name: Cow<'static, str>,
        /// The values made available to the view.
        model: ErrorModel,
    },
}

impl ViewInstruction {
    #[must_use]
    pub fn redirect<U: Into<String>>(url: U) -> Self {
        Self::Redirect { url: url.into() }
    }

    /// Creates an instruction to render the default [`ERROR_VIEW`].
    #[must_use]
    pub fn render_error(model: ErrorModel) -> Self {
        Self::Render {
            view_name: Cow::Borrowed(ERROR_VIEW),
            model,
        }
    }
}

/// The model of the default error view.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use faultline_core::ErrorModel;
/// use serde_json::json;
///
/// let model = ErrorModel {
///     exception: "app::NotFound".to_owned(),
///     status: 404,
///     message: "No message available".to_owned(),
///     timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
/// };
///
/// let map = model.to_map();
/// assert_eq!(map.len(), 4);
/// assert_eq!(map["status"], json!(404));
/// assert_eq!(map["timestamp"], json!("2024-05-01T12:00:00Z"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorModel {
    /// Fully-qualified name of the concrete error type.
    pub exception: String,
    /// The numeric HTTP status code.
    pub status: u16,
    pub message: String,
    /// When the error was handled.
    pub timestamp: DateTime<Utc>,
}

impl ErrorModel {
    /// Flattens the model into a string-keyed map, for renderers that work
    /// with untyped models.
    ///
    /// The timestamp is formatted the same way as when the model is
    /// serialized.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("exception".to_owned(), Value::from(self.exception.as_str()));
        map.insert("status".to_owned(), Value::from(self.status));
        map.insert("message".to_owned(), Value::from(self.message.as_str()));
        map.insert(
            "timestamp".to_owned(),
            Value::from(self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn map_matches_serialized_model() {
        let model = ErrorModel {
            exception: "app::Gone".to_owned(),
            status: 410,
            message: "archived".to_owned(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + Duration::microseconds(250_001),
        };

        let serialized = serde_json::to_value(&model).unwrap();

        assert_eq!(Value::Object(model.to_map()), serialized);
        assert_eq!(model.to_map()["timestamp"], "2024-05-01T12:00:00.250001Z");
    }
}
