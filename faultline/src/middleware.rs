//! Middleware translating errors raised by request handlers.
//!
//! Request handlers returning [`faultline::Result`](crate::Result) put their
//! error into the response extensions (see
//! [`Error`](crate::Error)'s `IntoResponse` implementation). The
//! [`ErrorTranslationLayer`] picks the error up and replaces the response
//! with the translated one:
//!
//! * [`ApiError`](crate::ApiError)s become JSON responses,
//! * [`ViewError`](crate::ViewError)s become redirects to custom error pages
//!   or rendered default error pages,
//! * other errors keep the response produced by the handler.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::Response;
use faultline_core::error::ErrorChain;
use tower::{Layer, Service};
use tracing::error;

use crate::config::FaultlineConfig;
use crate::error::RaisedError;
use crate::render::{TemplateRenderer, ViewRenderer};
use crate::translator::ErrorTranslator;

/// A [`Layer`] that applies [`ErrorTranslationService`] to a service.
///
/// # Examples
///
/// ```
/// use axum::Router;
/// use axum::routing::get;
/// use faultline::config::FaultlineConfig;
/// use faultline::middleware::ErrorTranslationLayer;
/// use faultline::{StatusCode, ViewError};
///
/// async fn admin() -> faultline::Result<()> {
///     Err(ViewError::new(StatusCode::FORBIDDEN).into())
/// }
///
/// let app: Router = Router::new()
///     .route("/admin", get(admin))
///     .layer(ErrorTranslationLayer::from_config(&FaultlineConfig::default()));
/// ```
#[derive(Debug, Clone)]
pub struct ErrorTranslationLayer {
    translator: Arc<ErrorTranslator>,
    renderer: Arc<dyn ViewRenderer>,
}

impl ErrorTranslationLayer {
    /// Creates a new layer rendering the default error page with the
    /// [`TemplateRenderer`].
    #[must_use]
    pub fn new(translator: ErrorTranslator) -> Self {
        Self {
            translator: Arc::new(translator),
            renderer: Arc::new(TemplateRenderer),
        }
    }

    #[must_use]
    pub fn from_config(config: &FaultlineConfig) -> Self {
        Self::new(ErrorTranslator::from_config(config))
    }

    /// Replaces the renderer used for the default error page.
    #[must_use]
    pub fn with_renderer<R>(mut self, renderer: R) -> Self
    where
        R: ViewRenderer + 'static,
    {
        self.renderer = Arc::new(renderer);
        self
    }
}

impl<S> Layer<S> for ErrorTranslationLayer {
    type Service = ErrorTranslationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorTranslationService {
            inner,
            translator: Arc::clone(&self.translator),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

/// A service translating the errors raised by the inner service.
///
/// Created with [`ErrorTranslationLayer`].
#[derive(Debug, Clone)]
pub struct ErrorTranslationService<S> {
    inner: S,
    translator: Arc<ErrorTranslator>,
    renderer: Arc<dyn ViewRenderer>,
}

impl<S> Service<Request> for ErrorTranslationService<S>
where
    S: Service<Request, Response = Response>,
    S::Future: Send + 'static,
    S::Error: 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);
        let translator = Arc::clone(&self.translator);
        let renderer = Arc::clone(&self.renderer);

        Box::pin(async move {
            let response = future.await?;
            Ok(translate_response(&translator, renderer.as_ref(), response))
        })
    }
}

fn translate_response(
    translator: &ErrorTranslator,
    renderer: &dyn ViewRenderer,
    mut response: Response,
) -> Response {
    let Some(error) = response
        .extensions_mut()
        .remove::<RaisedError>()
        .and_then(|raised| raised.take())
    else {
        return response;
    };

    match translator.translate(error) {
        Ok(translation) => translation.into_response(renderer),
        Err(error) => {
            error!(
                error = %ErrorChain(&error),
                "unhandled error; responding with {}",
                response.status(),
            );
            response
        }
    }
}
