use std::error::Error as StdError;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use derive_more::with_trait::Debug;

use crate::{ApiError, BoxError, StatusCode, ViewError};

/// An error returned by request handlers.
///
/// This is a thin wrapper around any error type. Errors wrapping an
/// [`ApiError`] or a [`ViewError`] are translated by the
/// [`ErrorTranslationLayer`](crate::middleware::ErrorTranslationLayer);
/// everything else is left to the default handling.
///
/// # Examples
///
/// ```
/// use faultline::{ApiError, Error, StatusCode, StatusDescriptor, ViewError};
///
/// let error = Error::from(ApiError::new(StatusDescriptor::NOT_FOUND));
/// assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
///
/// let error = Error::from(ViewError::new(StatusCode::FORBIDDEN));
/// assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
///
/// let error = Error::new(std::io::Error::other("disk full"));
/// assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
/// ```
pub struct Error {
    inner: BoxError,
}

impl Error {
    /// Wraps an arbitrary error.
    ///
    /// Wrapping a `faultline::Error` again returns it unchanged.
    #[must_use]
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        let error: BoxError = error.into();
        match error.downcast::<Self>() {
            Ok(error) => *error,
            Err(inner) => Self { inner },
        }
    }

    /// Returns the HTTP status code the error would be answered with if it
    /// was not translated.
    ///
    /// This is the status of the first [`ApiError`] or [`ViewError`] found in
    /// the error or its chain of sources, or `500 Internal Server Error`.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match classify(&*self.inner) {
            Some(Classified::Api(error)) => error.status().http_status(),
            Some(Classified::View(error)) => error.status_code(),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` if the error is, or is caused by, an [`ApiError`] or a
    /// [`ViewError`].
    #[must_use]
    pub fn is_translatable(&self) -> bool {
        classify(&*self.inner).is_some()
    }

    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl Deref for Error {
    type Target = dyn StdError + Send + Sync;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl From<ApiError> for Error {
    fn from(error: ApiError) -> Self {
        Self::new(error)
    }
}

impl From<ViewError> for Error {
    fn from(error: ViewError) -> Self {
        Self::new(error)
    }
}

/// Stashes the error in the response extensions, where the
/// [`ErrorTranslationLayer`](crate::middleware::ErrorTranslationLayer) picks
/// it up. Without the layer, the client gets an empty response with
/// [`Error::status_code`].
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = self.status_code();
        response.extensions_mut().insert(RaisedError::new(self));
        response
    }
}

/// Implements `From<$error_ty>` for [`faultline::Error`](Error).
///
/// With only a type, the error is wrapped as is and gets the default
/// handling. With a status code name, the error is wrapped in a
/// [`ViewError`] with that status, so that it is shown on an error page
/// reporting the domain error's own type.
///
/// # Examples
///
/// ```
/// use faultline::{Error, StatusCode, impl_into_faultline_error};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("order {0} does not exist")]
/// struct OrderNotFound(u64);
/// impl_into_faultline_error!(OrderNotFound, NOT_FOUND);
///
/// let error = Error::from(OrderNotFound(3));
/// assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
/// assert!(error.is_translatable());
/// ```
#[macro_export]
macro_rules! impl_into_faultline_error {
    ($error_ty:ty) => {
        impl From<$error_ty> for $crate::Error {
            fn from(err: $error_ty) -> Self {
                $crate::Error::new(err)
            }
        }
    };
    ($error_ty:ty, $status_code:ident) => {
        impl From<$error_ty> for $crate::Error {
            fn from(err: $error_ty) -> Self {
                $crate::Error::from($crate::ViewError::wrap(
                    $crate::StatusCode::$status_code,
                    err,
                ))
            }
        }
    };
}

/// The translated error family an error belongs to.
pub(crate) enum Classified<'a> {
    Api(&'a ApiError),
    View(&'a ViewError),
}

/// Finds the first [`ApiError`] or [`ViewError`] in the error and its chain
/// of sources, looking inside any [`faultline::Error`](Error) on the way.
pub(crate) fn classify<'a>(error: &'a (dyn StdError + 'static)) -> Option<Classified<'a>> {
    let mut current = Some(error);
    while let Some(error) = current {
        if let Some(api_error) = error.downcast_ref::<ApiError>() {
            return Some(Classified::Api(api_error));
        }
        if let Some(view_error) = error.downcast_ref::<ViewError>() {
            return Some(Classified::View(view_error));
        }
        current = match error.downcast_ref::<Error>() {
            Some(wrapped) => Some(&*wrapped.inner as &(dyn StdError + 'static)),
            None => error.source(),
        };
    }
    None
}

/// An error raised by a request handler, carried in the response
/// extensions until it is translated.
///
/// It is a separate, private type to make sure the user cannot accidentally
/// interact with it by using response extensions directly.
#[derive(Debug, Clone)]
pub(crate) struct RaisedError(#[debug("..")] Arc<Mutex<Option<Error>>>);

impl RaisedError {
    #[must_use]
    pub(crate) fn new(error: Error) -> Self {
        Self(Arc::new(Mutex::new(Some(error))))
    }

    /// Takes the error out; returns [`None`] if it was already taken.
    pub(crate) fn take(&self) -> Option<Error> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatusDescriptor;
    use std::fmt::Debug;

    #[test]
    fn new_does_not_double_wrap() {
        let error = Error::from(ApiError::new(StatusDescriptor::CONFLICT));
        let rewrapped = Error::new(error);

        assert!(rewrapped.is_translatable());
        assert_eq!(rewrapped.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn non_http_api_status_maps_to_internal_server_error() {
        let error = Error::from(ApiError::new(StatusDescriptor::new(4005, "InvalidParam")));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn display_forwards_to_inner() {
        let error = Error::from(ViewError::new(StatusCode::GONE).with_message("archived"));
        assert_eq!(error.to_string(), "410 Gone: archived");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("could not reserve stock")]
    struct ReservationFailed(#[source] Error);

    #[test]
    fn classifies_errors_found_in_sources() {
        let cause = Error::from(ApiError::new(StatusDescriptor::CONFLICT).with_message("stale"));
        let error = Error::new(ReservationFailed(cause));

        assert!(error.is_translatable());
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn unclassified_error_is_not_translatable() {
        let error = Error::new(std::io::Error::other("disk full"));

        assert!(!error.is_translatable());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn into_response_stashes_error() {
        let response = Error::from(ViewError::new(StatusCode::FORBIDDEN)).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let raised = response.extensions().get::<RaisedError>().unwrap();
        let error = raised.take().unwrap();
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
        assert!(raised.take().is_none());
    }
}
