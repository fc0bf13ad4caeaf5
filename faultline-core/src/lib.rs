//! Core of the faultline error translation layer.
//!
//! This crate turns application-raised failures into client-facing values
//! without depending on any HTTP runtime:
//!
//! * [`ApiError`]s become a [`StructuredResult`] for programmatic clients,
//! * [`ViewError`]s become a [`ViewInstruction`] for browsers: either a
//!   redirect to a configured error page, or a request to render the
//!   `"error"` view with an [`ErrorModel`].
//!
//! Turning those values into actual HTTP responses is left to the
//! `faultline` crate.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use faultline_core::handler::{ApiErrorHandler, ViewErrorHandler};
//! use faultline_core::registry::ErrorPageRegistry;
//! use faultline_core::{ApiError, StatusCode, StatusDescriptor, ViewError, ViewInstruction};
//!
//! let result = ApiErrorHandler::new()
//!     .handle(ApiError::new(StatusDescriptor::BAD_REQUEST).with_message("missing field"));
//! assert_eq!(result.message(), "missing field");
//!
//! let registry = Arc::new(ErrorPageRegistry::from_iter([(
//!     StatusCode::NOT_FOUND,
//!     "/custom-404",
//! )]));
//! let instruction = ViewErrorHandler::new(registry).handle(ViewError::new(StatusCode::NOT_FOUND));
//! assert_eq!(instruction, ViewInstruction::redirect("/custom-404"));
//! ```

pub mod clock;
pub mod error;
pub mod handler;
pub mod registry;
pub mod result;
pub mod status;
pub mod view;

pub use error::{ApiError, ViewError};
pub use result::StructuredResult;
pub use status::StatusDescriptor;
pub use view::{ErrorModel, ViewInstruction};

/// A type alias for a type-erased error that can be sent across threads.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A type alias for an HTTP status code.
pub type StatusCode = http::StatusCode;
