//! HTTP responses for translated errors.

use axum::response::{IntoResponse, Response};
use http::header::LOCATION;
use http::{HeaderValue, StatusCode};
use tracing::error;

use crate::json::Json;
use crate::render::ViewRenderer;
use crate::{StructuredResult, ViewInstruction};

/// Builds the JSON response for a structured result.
///
/// The HTTP status is derived from the result's status descriptor (see
/// [`StatusDescriptor::http_status`](crate::StatusDescriptor::http_status)).
///
/// # Examples
///
/// ```
/// use faultline::response::api_response;
/// use faultline::{StatusCode, StatusDescriptor, StructuredResult};
///
/// let response = api_response(StructuredResult::new(
///     StatusDescriptor::BAD_REQUEST,
///     None,
///     "missing field",
/// ));
/// assert_eq!(response.status(), StatusCode::BAD_REQUEST);
/// ```
#[must_use]
pub fn api_response(result: StructuredResult) -> Response {
    let status = result.status().http_status();
    (status, Json(result)).into_response()
}

/// Builds the browser response for a view instruction.
///
/// Redirects are answered with `302 Found`. Rendered views are answered with
/// the model's status code; if rendering fails, the failure is logged and an
/// empty response with that status code is returned.
#[must_use]
pub fn view_response(instruction: ViewInstruction, renderer: &dyn ViewRenderer) -> Response {
    match instruction {
        ViewInstruction::Redirect { url } => redirect(&url),
        ViewInstruction::Render { view_name, model } => {
            let status =
                StatusCode::from_u16(model.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            match renderer.render(&view_name, &model) {
                Ok(html) => (status, html).into_response(),
                Err(error) => {
                    error!(%error, view = %view_name, "could not render error view");
                    status.into_response()
                }
            }
        }
    }
}

fn redirect(url: &str) -> Response {
    match HeaderValue::try_from(url) {
        Ok(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
        Err(error) => {
            error!(%error, url, "invalid error page URL");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
