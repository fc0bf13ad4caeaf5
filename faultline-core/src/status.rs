//! Status descriptors carried by API errors and structured results.

use std::borrow::Cow;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::StatusCode;

/// A numeric status code paired with a human-readable label.
///
/// Descriptors have no identity beyond their value. A set of well-known
/// descriptors is available as associated constants, and custom ones can be
/// created with [`StatusDescriptor::new`].
///
/// # Examples
///
/// ```
/// use faultline_core::StatusDescriptor;
///
/// let status = StatusDescriptor::new(4220, "ValidationFailed");
/// assert_eq!(status.code(), 4220);
/// assert_eq!(status.label(), "ValidationFailed");
/// assert_eq!(StatusDescriptor::BAD_REQUEST, StatusDescriptor::new(400, "BadRequest"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{code} {label}")]
pub struct StatusDescriptor {
    code: i32,
    label: Cow<'static, str>,
}

impl StatusDescriptor {
    /// The operation succeeded.
    pub const OK: Self = Self::from_static(0, "OK");
    /// The request was malformed or failed validation.
    pub const BAD_REQUEST: Self = Self::from_static(400, "BadRequest");
    /// The caller is not authenticated.
    pub const UNAUTHORIZED: Self = Self::from_static(401, "Unauthorized");
    /// The caller is authenticated but not allowed to perform the operation.
    pub const FORBIDDEN: Self = Self::from_static(403, "Forbidden");
    /// The requested resource does not exist.
    pub const NOT_FOUND: Self = Self::from_static(404, "NotFound");
    /// The operation conflicts with the current state of the resource.
    pub const CONFLICT: Self = Self::from_static(409, "Conflict");
    /// The operation failed because of a server-side problem.
    pub const SERVER_ERROR: Self = Self::from_static(500, "ServerError");
    /// A dependency of the service is temporarily unavailable.
    pub const SERVICE_UNAVAILABLE: Self = Self::from_static(503, "ServiceUnavailable");

    /// Creates a new status descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline_core::StatusDescriptor;
    ///
    /// let status = StatusDescriptor::new(1001, format!("Quota{}", "Exceeded"));
    /// assert_eq!(status.label(), "QuotaExceeded");
    /// ```
    #[must_use]
    pub fn new<L: Into<Cow<'static, str>>>(code: i32, label: L) -> Self {
        Self {
            code,
            label: label.into(),
        }
    }

    const fn from_static(code: i32, label: &'static str) -> Self {
        Self {
            code,
            label: Cow::Borrowed(label),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` for the success class of codes: `0` and `2xx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline_core::StatusDescriptor;
    ///
    /// assert!(StatusDescriptor::OK.is_success());
    /// assert!(!StatusDescriptor::NOT_FOUND.is_success());
    /// ```
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == 0 || (200..300).contains(&self.code)
    }

    /// Returns the HTTP status code a transport layer should use for this
    /// descriptor.
    ///
    /// Codes that are valid HTTP status codes are used verbatim, `0` maps
    /// to `200 OK` and everything else maps to `500 Internal Server Error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline_core::{StatusCode, StatusDescriptor};
    ///
    /// assert_eq!(StatusDescriptor::OK.http_status(), StatusCode::OK);
    /// assert_eq!(
    ///     StatusDescriptor::FORBIDDEN.http_status(),
    ///     StatusCode::FORBIDDEN
    /// );
    /// assert_eq!(
    ///     StatusDescriptor::new(4005, "InvalidParam").http_status(),
    ///     StatusCode::INTERNAL_SERVER_ERROR
    /// );
    /// ```
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        if self.code == 0 {
            return StatusCode::OK;
        }

        u16::try_from(self.code)
            .ok()
            .filter(|code| (100..600).contains(code))
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
