//! Centralized error translation for `axum` services.
//!
//! Request handlers return [`faultline::Result`](Result). When they fail
//! with an [`ApiError`], the client receives a JSON
//! [`StructuredResult`]; when they fail with a [`ViewError`], the browser is
//! either redirected to a configured custom error page or shown the default
//! error page. Any other error is left to the host's default handling.
//!
//! The translation is performed by [`ErrorTranslator`], and plugged into an
//! `axum` router with [`ErrorTranslationLayer`].
//!
//! # Examples
//!
//! ```
//! use axum::Router;
//! use axum::routing::get;
//! use faultline::config::FaultlineConfig;
//! use faultline::html::Html;
//! use faultline::middleware::ErrorTranslationLayer;
//! use faultline::{ApiError, StatusDescriptor};
//!
//! async fn profile() -> faultline::Result<Html> {
//!     Err(ApiError::new(StatusDescriptor::UNAUTHORIZED)
//!         .with_message("log in first")
//!         .into())
//! }
//!
//! # fn main() -> Result<(), faultline::config::ConfigError> {
//! let config = FaultlineConfig::from_toml(
//!     r#"
//!     [error_pages]
//!     404 = "/not-found"
//!     "#,
//! )?;
//!
//! let app: Router = Router::new()
//!     .route("/profile", get(profile))
//!     .layer(ErrorTranslationLayer::from_config(&config));
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
mod headers;
pub mod html;
pub mod json;
pub mod middleware;
pub mod render;
pub mod response;
mod serializers;
mod translator;

pub use error::Error;
#[doc(inline)]
pub use faultline_core::{
    ApiError, BoxError, ErrorModel, StatusCode, StatusDescriptor, StructuredResult, ViewError,
    ViewInstruction, clock, handler, registry, view,
};
pub use translator::{ErrorTranslator, Translation};

/// A type alias for a result that can return a [`faultline::Error`](Error).
pub type Result<T> = std::result::Result<T, Error>;
