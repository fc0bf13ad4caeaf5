//! Classification of raised errors into the two translated families.

use std::sync::Arc;

use axum::response::Response;
use faultline_core::error::ErrorChain;
use tracing::debug;

use crate::config::FaultlineConfig;
use crate::error::{Classified, classify};
use crate::handler::{ApiErrorHandler, ViewErrorHandler};
use crate::registry::ErrorPageRegistry;
use crate::render::ViewRenderer;
use crate::response::{api_response, view_response};
use crate::{ApiError, Error, StructuredResult, ViewError, ViewInstruction};

/// The outcome of translating an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// The error was an [`ApiError`].
    Api(StructuredResult),
    /// The error was a [`ViewError`].
    View(ViewInstruction),
}

impl Translation {
    /// Builds the HTTP response for this translation, rendering views with
    /// the given renderer.
    #[must_use]
    pub fn into_response(self, renderer: &dyn ViewRenderer) -> Response {
        match self {
            Self::Api(result) => api_response(result),
            Self::View(instruction) => view_response(instruction, renderer),
        }
    }
}

/// Routes raised errors to the [`ApiErrorHandler`] or the
/// [`ViewErrorHandler`].
///
/// An error is translated if it is an [`ApiError`] or a [`ViewError`], or if
/// one of them appears in its chain of sources. Anything else is handed back
/// to the caller.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use faultline::registry::ErrorPageRegistry;
/// use faultline::{Error, ErrorTranslator, StatusCode, Translation, ViewError, ViewInstruction};
///
/// let registry = ErrorPageRegistry::from_iter([(StatusCode::NOT_FOUND, "/custom-404")]);
/// let translator = ErrorTranslator::new(Arc::new(registry));
///
/// let translation = translator
///     .translate(Error::from(ViewError::new(StatusCode::NOT_FOUND)))
///     .unwrap();
/// assert_eq!(
///     translation,
///     Translation::View(ViewInstruction::redirect("/custom-404"))
/// );
///
/// let unhandled = translator.translate(Error::new(std::io::Error::other("disk full")));
/// assert!(unhandled.is_err());
/// ```
#[derive(Debug)]
pub struct ErrorTranslator {
    api: ApiErrorHandler,
    view: ViewErrorHandler,
}

impl ErrorTranslator {
    #[must_use]
    pub fn new(registry: Arc<ErrorPageRegistry>) -> Self {
        Self::with_handlers(ApiErrorHandler::new(), ViewErrorHandler::new(registry))
    }

    #[must_use]
    pub fn with_handlers(api: ApiErrorHandler, view: ViewErrorHandler) -> Self {
        Self { api, view }
    }

    #[must_use]
    pub fn from_config(config: &FaultlineConfig) -> Self {
        Self::new(Arc::new(config.error_page_registry()))
    }

    /// Translates the error.
    ///
    /// # Errors
    ///
    /// Returns the original error if it is neither an [`ApiError`] nor a
    /// [`ViewError`].
    pub fn translate(&self, error: Error) -> Result<Translation, Error> {
        let error = match error.into_inner().downcast::<ApiError>() {
            Ok(error) => return Ok(Translation::Api(self.api.handle(*error))),
            Err(error) => error,
        };
        let error = match error.downcast::<ViewError>() {
            Ok(error) => return Ok(Translation::View(self.view.handle(*error))),
            Err(error) => error,
        };

        let translation = match classify(&*error) {
            Some(classified) => {
                debug!(
                    error = %ErrorChain(&*error),
                    "translating an error found in the sources of the raised error",
                );
                Some(match classified {
                    Classified::Api(api_error) => {
                        Translation::Api(self.api.handle(api_error.clone()))
                    }
                    Classified::View(view_error) => {
                        Translation::View(self.view.handle(view_error.clone()))
                    }
                })
            }
            None => None,
        };

        translation.ok_or_else(|| {
            debug!(%error, "error is neither an API nor a view error");
            Error::new(error)
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::{StatusCode, StatusDescriptor};

    #[derive(Debug, thiserror::Error)]
    #[error("checkout failed")]
    struct CheckoutFailed(#[source] ApiError);

    fn translator() -> ErrorTranslator {
        ErrorTranslator::new(Arc::new(ErrorPageRegistry::from_iter([(
            StatusCode::NOT_FOUND,
            "/custom-404",
        )])))
    }

    #[test]
    fn translates_api_error() {
        let error = ApiError::new(StatusDescriptor::BAD_REQUEST)
            .with_message("missing field")
            .with_data(json!({"field": "email"}));

        let translation = translator().translate(error.into()).unwrap();

        assert_eq!(
            translation,
            Translation::Api(StructuredResult::new(
                StatusDescriptor::BAD_REQUEST,
                Some(json!({"field": "email"})),
                "missing field",
            ))
        );
    }

    #[test]
    fn translates_view_error() {
        let translation = translator()
            .translate(ViewError::new(StatusCode::FORBIDDEN).into())
            .unwrap();

        let Translation::View(ViewInstruction::Render { model, .. }) = translation else {
            panic!("expected the default error view");
        };
        assert_eq!(model.status, 403);
    }

    #[test]
    fn translates_error_found_in_sources() {
        let error = CheckoutFailed(
            ApiError::new(StatusDescriptor::SERVICE_UNAVAILABLE).with_message("try again later"),
        );

        let translation = translator().translate(Error::new(error)).unwrap();

        let Translation::Api(result) = translation else {
            panic!("expected an API result");
        };
        assert_eq!(result.status(), &StatusDescriptor::SERVICE_UNAVAILABLE);
        assert_eq!(result.message(), "try again later");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("could not reserve stock")]
    struct ReservationFailed(#[source] Error);

    #[test]
    #[traced_test]
    fn translates_error_wrapped_in_faultline_error_in_sources() {
        let cause = Error::from(ApiError::new(StatusDescriptor::CONFLICT).with_message("stale"));
        let error = Error::new(ReservationFailed(cause));

        let translation = translator().translate(error).unwrap();

        let Translation::Api(result) = translation else {
            panic!("expected an API result");
        };
        assert_eq!(result.status(), &StatusDescriptor::CONFLICT);
        assert_eq!(result.message(), "stale");
        assert!(logs_contain("could not reserve stock: Conflict:stale"));
    }

    #[test]
    fn translates_view_error_wrapped_in_faultline_error_in_sources() {
        let cause = Error::from(ViewError::new(StatusCode::NOT_FOUND));
        let error = Error::new(ReservationFailed(cause));

        let translation = translator().translate(error).unwrap();

        assert_eq!(
            translation,
            Translation::View(ViewInstruction::redirect("/custom-404"))
        );
    }

    #[test]
    fn hands_back_unclassified_error() {
        let error = Error::new(std::io::Error::other("disk full"));

        let error = translator().translate(error).unwrap_err();

        assert_eq!(error.to_string(), "disk full");
        assert!(!error.is_translatable());
    }
}
