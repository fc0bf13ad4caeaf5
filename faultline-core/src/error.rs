//! The two families of errors translated by this crate.
//!
//! [`ApiError`] is meant for programmatic clients and is turned into a
//! [`StructuredResult`](crate::StructuredResult); [`ViewError`] is meant for
//! browsers and is turned into a [`ViewInstruction`](crate::ViewInstruction).
//! Any other error type is outside of this crate's responsibility.

mod api_error;
mod view_error;

use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

pub use api_error::ApiError;
pub use view_error::ViewError;

/// Displays an error followed by its chain of sources, separated by `: `.
///
/// A source whose message is identical to the previous one is skipped, so
/// wrapping errors that forward their inner message are not repeated.
///
/// # Examples
///
/// ```
/// use faultline_core::error::ErrorChain;
/// use faultline_core::{ApiError, StatusDescriptor};
///
/// let io_error = std::io::Error::other("disk full");
/// let error = ApiError::new(StatusDescriptor::SERVER_ERROR)
///     .with_message("could not save")
///     .with_source(io_error);
///
/// assert_eq!(
///     ErrorChain(&error).to_string(),
///     "ServerError:could not save: disk full"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ErrorChain<'a>(pub &'a (dyn StdError + 'static));

impl Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut previous = self.0.to_string();
        f.write_str(&previous)?;

        let mut source = self.0.source();
        while let Some(error) = source {
            let current = error.to_string();
            if current != previous {
                write!(f, ": {current}")?;
            }
            previous = current;
            source = error.source();
        }

        Ok(())
    }
}
