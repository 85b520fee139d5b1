// SPDX-License-Identifier: MIT OR Apache-2.0
//! Locale-aware error conversion for JSON-RPC method handlers.

use std::future::Future;
use std::sync::Arc;

use ebp_core::{Error, localized, parse_accept_language};
use http::HeaderMap;
use http::header::ACCEPT_LANGUAGE;
use jsonrpsee_types::ErrorObjectOwned;

use crate::object::to_error_object;

type LocaleFn = Arc<dyn Fn(&HeaderMap) -> String + Send + Sync>;

/// Converts handler errors to JSON-RPC error objects, injecting a
/// localized message when the error chain carries the capability.
///
/// JSON-RPC servers in this ecosystem run over HTTP, so locale extraction
/// reads the transport [`HeaderMap`], defaulting to `Accept-Language`
/// negotiation.
#[derive(Clone)]
pub struct RpcErrorHandler {
    locale_fn: LocaleFn,
    default_locale: Option<String>,
}

impl Default for RpcErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcErrorHandler {
    /// Creates a handler with the default `Accept-Language` extraction.
    pub fn new() -> Self {
        RpcErrorHandler {
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

    /// Converts an error using the locale carried by `headers`.
    pub fn convert(&self, headers: &HeaderMap, err: &Error) -> ErrorObjectOwned {
        self.finish(&self.resolve_locale(headers), err)
    }

    /// Runs a method handler and converts its error.
    pub async fn call<T, F, Fut>(
        &self,
        headers: &HeaderMap,
        handler: F,
    ) -> Result<T, ErrorObjectOwned>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let locale = self.resolve_locale(headers);
        handler().await.map_err(|err| self.finish(&locale, &err))
    }

    fn resolve_locale(&self, headers: &HeaderMap) -> String {
        let locale = (self.locale_fn)(headers);
        if locale.is_empty() {
            self.default_locale.clone().unwrap_or_default()
        } else {
            locale
        }
    }

    fn finish(&self, locale: &str, err: &Error) -> ErrorObjectOwned {
        let err = localized(err, locale).unwrap_or_else(|| err.clone());
        let object = to_error_object(&err);
        let code = object.code();
        let log = ebp_core::telemetry::log_value(&err);
        tracing::error!(rpc.code = code, error = %log, "request failed");
        object
    }
}

fn default_locale_fn(headers: &HeaderMap) -> String {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default()
}
