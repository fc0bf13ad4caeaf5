//! Handlers turning errors into client-facing values.
//!
//! Both handlers log the error at the error level before building their
//! output, and neither of them can fail.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SubsecRound, Utc};
use tracing::error;

use crate::clock::{Clock, SystemClock};
use crate::error::ErrorChain;
use crate::registry::ErrorPageRegistry;
use crate::view::NO_MESSAGE_AVAILABLE;
use crate::{ApiError, ErrorModel, StructuredResult, ViewError, ViewInstruction};

/// Converts [`ApiError`]s into [`StructuredResult`]s.
///
/// The log record gets the label-prefixed message (`"<label>:<message>"`),
/// while the result only carries the raw message, or an empty string.
///
/// # Examples
///
/// ```
/// use faultline_core::handler::ApiErrorHandler;
/// use faultline_core::{ApiError, StatusDescriptor};
///
/// let handler = ApiErrorHandler::new();
/// let result = handler.handle(ApiError::new(StatusDescriptor::SERVER_ERROR));
///
/// assert_eq!(result.status(), &StatusDescriptor::SERVER_ERROR);
/// assert_eq!(result.message(), "");
/// assert_eq!(result.data(), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiErrorHandler;

impl ApiErrorHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Logs the error and converts it into a structured result.
    #[must_use]
    pub fn handle(&self, error: ApiError) -> StructuredResult {
        let composed = error.composed_message();
        error!(
            code = error.status().code(),
            kind = error.kind(),
            error = %ErrorChain(&error),
            "API error <== code: {}, message: {composed}",
            error.status().code(),
        );

        let (status, message, data) = error.into_parts();
        StructuredResult::new(status, data, message.unwrap_or_default())
    }
}

/// Converts [`ViewError`]s into [`ViewInstruction`]s.
///
/// If the [`ErrorPageRegistry`] has a custom page for the error's status
/// code, the browser is redirected there. Otherwise the default
/// [`ERROR_VIEW`](crate::view::ERROR_VIEW) is rendered with an
/// [`ErrorModel`].
///
/// Timestamps put into error models never decrease between calls on the
/// same handler, even if the underlying clock goes backwards.
#[derive(Debug)]
pub struct ViewErrorHandler {
    registry: Arc<ErrorPageRegistry>,
    clock: Arc<dyn Clock>,
    last_timestamp_micros: AtomicI64,
}

impl ViewErrorHandler {
    /// Creates a handler using the system clock.
    #[must_use]
    pub fn new(registry: Arc<ErrorPageRegistry>) -> Self {
        Self::with_clock(registry, Arc::new(SystemClock))
    }

    /// Creates a handler using a custom clock.
    #[must_use]
    pub fn with_clock(registry: Arc<ErrorPageRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            clock,
            last_timestamp_micros: AtomicI64::new(i64::MIN),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ErrorPageRegistry {
        &self.registry
    }

    /// Logs the error and decides how it should be shown to the browser.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use faultline_core::handler::ViewErrorHandler;
    /// use faultline_core::registry::ErrorPageRegistry;
    /// use faultline_core::{StatusCode, ViewError, ViewInstruction};
    ///
    /// let handler = ViewErrorHandler::new(Arc::new(ErrorPageRegistry::new()));
    /// let instruction = handler.handle(ViewError::new(StatusCode::FORBIDDEN));
    ///
    /// let ViewInstruction::Render { view_name, model } = instruction else {
    ///     panic!("expected the default error view");
    /// };
    /// assert_eq!(view_name, "error");
    /// assert_eq!(model.status, 403);
    /// assert_eq!(model.message, "No message available");
    /// ```
    #[must_use]
    pub fn handle(&self, error: ViewError) -> ViewInstruction {
        error!(
            status = error.status_code().as_u16(),
            exception = error.exception_type(),
            kind = error.kind(),
            error = %ErrorChain(&error),
            "view error <== {}",
            error.status_code(),
        );

        if let Some(url) = self.registry.redirect_url(error.status_code()) {
            return ViewInstruction::redirect(url);
        }

        let model = ErrorModel {
            exception: error.exception_type().to_owned(),
            status: error.status_code().as_u16(),
            message: error
                .non_empty_message()
                .unwrap_or(NO_MESSAGE_AVAILABLE)
                .to_owned(),
            timestamp: self.timestamp(),
        };
        ViewInstruction::render_error(model)
    }

    /// Returns the current time at microsecond precision, never earlier than
    /// a timestamp this handler returned before.
    fn timestamp(&self) -> DateTime<Utc> {
        let now = self.clock.now().trunc_subsecs(6);
        let now_micros = now.timestamp_micros();
        let previous = self
            .last_timestamp_micros
            .fetch_max(now_micros, Ordering::Relaxed);

        if previous > now_micros {
            DateTime::from_timestamp_micros(previous).unwrap_or(now)
        } else {
            now
        }
    }
}
