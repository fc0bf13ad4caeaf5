//! Rendering of error views.
//!
//! A [`ViewRenderer`] turns a view name and an [`ErrorModel`] into HTML. The
//! [`TemplateRenderer`] is used by default; it knows a single view,
//! [`ERROR_VIEW`], backed by the `error.html` template.

use std::fmt::Debug;

use askama::Template;
use thiserror::Error;

use crate::ErrorModel;
use crate::html::Html;
use crate::view::ERROR_VIEW;

/// An error that occurs while rendering an error view.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The renderer does not know the requested view.
    #[error("unknown view `{0}`")]
    UnknownView(String),
    /// The template could not be rendered.
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
}

/// Renders views for the browser-facing error responses.
///
/// # Examples
///
/// ```
/// use faultline::ErrorModel;
/// use faultline::html::Html;
/// use faultline::render::{RenderError, ViewRenderer};
///
/// #[derive(Debug)]
/// struct PlainRenderer;
///
/// impl ViewRenderer for PlainRenderer {
///     fn render(&self, view_name: &str, model: &ErrorModel) -> Result<Html, RenderError> {
///         Ok(Html::new(format!("{view_name}: {}", model.status)))
///     }
/// }
/// ```
pub trait ViewRenderer: Debug + Send + Sync {
    /// Renders the view with the given model.
    ///
    /// # Errors
    ///
    /// Returns an error if the view does not exist or cannot be rendered.
    fn render(&self, view_name: &str, model: &ErrorModel) -> Result<Html, RenderError>;
}

/// The default renderer, backed by `askama` templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

#[derive(Debug, Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    model: &'a ErrorModel,
}

impl ViewRenderer for TemplateRenderer {
    fn render(&self, view_name: &str, model: &ErrorModel) -> Result<Html, RenderError> {
        if view_name != ERROR_VIEW {
            return Err(RenderError::UnknownView(view_name.to_owned()));
        }

        Ok(Html::new(ErrorTemplate { model }.render()?))
    }
}
