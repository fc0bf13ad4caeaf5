//! HTML content returned from handlers and renderers.

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, Display, From};
use http::HeaderValue;
use http::header::CONTENT_TYPE;

use crate::headers::HTML_CONTENT_TYPE;

/// A type that represents HTML content as a string.
///
/// Note that this is just a newtype wrapper around a string and does not
/// provide any content validation or escaping.
///
/// # Examples
///
/// ```
/// use faultline::html::Html;
///
/// let html = Html::new("<h1>Not found</h1>");
/// assert_eq!(html.as_str(), "<h1>Not found</h1>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deref, From, Display)]
pub struct Html(pub String);

impl Html {
    #[must_use]
    pub fn new<T: Into<String>>(html: T) -> Self {
        Self(html.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl AsRef<str> for Html {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl IntoResponse for Html {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.0));
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE));
        response
    }
}
