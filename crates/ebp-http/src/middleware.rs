// SPDX-License-Identifier: MIT OR Apache-2.0
//! axum middleware: error observation, locale resolution, response rendering.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use ebp_core::{Error, localized, parse_accept_language};
use http::HeaderMap;
use http::header::ACCEPT_LANGUAGE;

use crate::problem::{problem_response, to_problem_detail};

type LocaleFn = Arc<dyn Fn(&HeaderMap) -> String + Send + Sync>;

/// A handler error that renders as a Problem Details response.
///
/// Handlers return `Result<_, ErrorResponse>`; the wrapped [`Error`] is
/// also stored in the response extensions so [`ErrorMiddleware`] can
/// re-render it with a localized message.
///
/// ```
/// use ebp_core::{Code, Error};
/// use ebp_http::ErrorResponse;
///
/// async fn find_user() -> Result<String, ErrorResponse> {
///     Err(Error::new("user not found").with_code(Code::NOT_FOUND).into())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ErrorResponse(pub Error);

impl From<Error> for ErrorResponse {
    fn from(err: Error) -> Self {
        ErrorResponse(err)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let mut resp = problem_response(&to_problem_detail(&self.0));
        resp.extensions_mut().insert(self.0);
        resp
    }
}

/// Middleware that observes handler errors and emits Problem Details
/// responses with locale-aware localized messages.
///
/// Wire it with [`axum::middleware::from_fn`]:
///
/// ```no_run
/// use axum::extract::Request;
/// use axum::middleware::Next;
/// use axum::{Router, middleware, routing::get};
/// use ebp_http::{ErrorMiddleware, ErrorResponse};
///
/// async fn handler() -> Result<&'static str, ErrorResponse> { Ok("ok") }
///
/// let errors = ErrorMiddleware::new().with_default_locale("en");
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .layer(middleware::from_fn(move |req: Request, next: Next| {
///         errors.clone().handle(req, next)
///     }));
/// ```
#[derive(Clone)]
pub struct ErrorMiddleware {
    locale_fn: LocaleFn,
    default_locale: Option<String>,
}

impl Default for ErrorMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorMiddleware {
    /// Creates a middleware with the default locale extraction: the
    /// request's `Accept-Language` header, negotiated by quality value.
    pub fn new() -> Self {
        ErrorMiddleware {
            locale_fn: Arc::new(default_locale_fn),
            default_locale: None,
        }
    }

    /// Replaces the locale extraction function.
    pub fn with_locale_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&HeaderMap) -> String + Send + Sync + 'static,
    {
        self.locale_fn = Arc::new(f);
        self
    }

    /// Sets a fallback locale used when extraction yields an empty string.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// The middleware entry point; pass to [`axum::middleware::from_fn`].
    pub async fn handle(self, req: Request, next: Next) -> Response {
        let locale = self.resolve_locale(req.headers());
        let resp = next.run(req).await;
        self.finish(&locale, resp)
    }

    fn resolve_locale(&self, headers: &HeaderMap) -> String {
        let locale = (self.locale_fn)(headers);
        if locale.is_empty() {
            self.default_locale.clone().unwrap_or_default()
        } else {
            locale
        }
    }

    fn finish(&self, locale: &str, mut resp: Response) -> Response {
        let Some(err) = resp.extensions_mut().remove::<Error>() else {
            return resp;
        };
        let err = localized(&err, locale).unwrap_or(err);
        let problem = to_problem_detail(&err);
        let log = ebp_core::telemetry::log_value(&err);
        tracing::error!(
            http.status = problem.status,
            error.code = %problem.code,
            error = %log,
            "request failed"
        );
        problem_response(&problem)
    }
}

fn default_locale_fn(headers: &HeaderMap) -> String {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default()
}
