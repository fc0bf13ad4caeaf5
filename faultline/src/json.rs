//! JSON content returned from handlers.

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use serde::Serialize;
use tracing::error;

use crate::headers::JSON_CONTENT_TYPE;

/// A type that represents JSON content.
///
/// Note that this is just a newtype wrapper around data and does not
/// provide any content validation.
///
/// # Examples
///
/// ```
/// use faultline::json::Json;
///
/// let Json(data) = Json("content");
/// assert_eq!(data, "content");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Json<D>(pub D);

impl<D: Serialize> IntoResponse for Json<D> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => {
                let mut response = Response::new(Body::from(body));
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                response
            }
            Err(error) => {
                error!(%error, "could not serialize JSON response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
