// SPDX-License-Identifier: MIT OR Apache-2.0
//! Locale-aware error interception for tonic services.

use std::future::Future;
use std::sync::Arc;

use ebp_core::{Error, localized, parse_accept_language};
use tonic::metadata::MetadataMap;

use crate::status::to_status;

type LocaleFn = Arc<dyn Fn(&MetadataMap) -> String + Send + Sync>;

/// Converts handler errors to [`tonic::Status`] responses, injecting a
/// localized message when the error chain carries the capability and the
/// request metadata names a locale.
///
/// ```no_run
/// use ebp_core::{Code, Error};
/// use ebp_grpc::ErrorInterceptor;
///
/// # async fn example(request: tonic::Request<()>) -> Result<tonic::Response<()>, tonic::Status> {
/// let errors = ErrorInterceptor::new().with_default_locale("en");
/// errors
///     .unary(request, |_req| async {
///         Err::<tonic::Response<()>, _>(Error::new("user not found").with_code(Code::NOT_FOUND))
///     })
///     .await
/// # }
/// ```
#[derive(Clone)]
pub struct ErrorInterceptor {
    locale_fn: LocaleFn,
    default_locale: Option<String>,
}

impl Default for ErrorInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorInterceptor {
    /// Creates an interceptor with the default locale extraction: the
    /// `accept-language` metadata entry, negotiated by quality value.
    pub fn new() -> Self {
        ErrorInterceptor {
            locale_fn: Arc::new(default_locale_fn),
            default_locale: None,
        }
    }

    /// Replaces the locale extraction function.
    pub fn with_locale_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&MetadataMap) -> String + Send + Sync + 'static,
    {
        self.locale_fn = Arc::new(f);
        self
    }

    /// Sets a fallback locale used when extraction yields an empty string.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Converts an error using the locale carried by `metadata`.
    pub fn convert(&self, metadata: &MetadataMap, err: &Error) -> tonic::Status {
        self.finish(&self.resolve_locale(metadata), err)
    }

    /// Maps the error branch of a handler result to a [`tonic::Status`].
    pub fn intercept<T>(
        &self,
        metadata: &MetadataMap,
        result: Result<T, Error>,
    ) -> Result<T, tonic::Status> {
        let locale = self.resolve_locale(metadata);
        result.map_err(|err| self.finish(&locale, &err))
    }

    /// Runs a unary handler and converts its error, the shape a service
    /// implementation wraps around each method body.
    pub async fn unary<ReqT, ResT, F, Fut>(
        &self,
        request: tonic::Request<ReqT>,
        handler: F,
    ) -> Result<tonic::Response<ResT>, tonic::Status>
    where
        F: FnOnce(tonic::Request<ReqT>) -> Fut,
        Fut: Future<Output = Result<tonic::Response<ResT>, Error>>,
    {
        let locale = self.resolve_locale(request.metadata());
        handler(request).await.map_err(|err| self.finish(&locale, &err))
    }

    fn resolve_locale(&self, metadata: &MetadataMap) -> String {
        let locale = (self.locale_fn)(metadata);
        if locale.is_empty() {
            self.default_locale.clone().unwrap_or_default()
        } else {
            locale
        }
    }

    fn finish(&self, locale: &str, err: &Error) -> tonic::Status {
        let err = localized(err, locale).unwrap_or_else(|| err.clone());
        let status = to_status(&err);
        let code = status.code();
        let log = ebp_core::telemetry::log_value(&err);
        tracing::error!(grpc.code = %code, error = %log, "request failed");
        status
    }
}

fn default_locale_fn(metadata: &MetadataMap) -> String {
    metadata
        .get("accept-language")
        .and_then(|value| value.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebp_core::{Code, Detail};

    use crate::status::from_status;

    fn localizable_error() -> Error {
        Error::new("user not found")
            .with_code(Code::NOT_FOUND)
            .with_localizer(|locale: &str| {
                (locale == "ja").then(|| "ユーザーが見つかりません".to_string())
            })
    }

    fn request_with_locale(locale: &str) -> tonic::Request<()> {
        let mut request = tonic::Request::new(());
        request
            .metadata_mut()
            .insert("accept-language", locale.parse().unwrap());
        request
    }

    #[tokio::test]
    async fn unary_converts_errors() {
        let interceptor = ErrorInterceptor::new();
        let out: Result<tonic::Response<()>, _> = interceptor
            .unary(tonic::Request::new(()), |_req| async {
                Err(localizable_error())
            })
            .await;
        let status = out.unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "user not found");
    }

    #[tokio::test]
    async fn unary_passes_successes_through() {
        let interceptor = ErrorInterceptor::new();
        let out = interceptor
            .unary(tonic::Request::new(()), |_req| async {
                Ok(tonic::Response::new(7u32))
            })
            .await;
        assert_eq!(out.unwrap().into_inner(), 7);
    }

    #[tokio::test]
    async fn metadata_locale_injects_a_localized_detail() {
        let interceptor = ErrorInterceptor::new();
        let out: Result<tonic::Response<()>, _> = interceptor
            .unary(request_with_locale("ja,en;q=0.8"), |_req| async {
                Err(localizable_error())
            })
            .await;
        let status = out.unwrap_err();
        let back = from_status(&status).expect("error");
        match back.details() {
            [Detail::LocalizedMessage(lm)] => {
                assert_eq!(lm.locale, "ja");
                assert_eq!(lm.message, "ユーザーが見つかりません");
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn intercept_respects_the_default_locale() {
        let interceptor = ErrorInterceptor::new().with_default_locale("ja");
        let out: Result<(), _> =
            interceptor.intercept(&MetadataMap::new(), Err(localizable_error()));
        let back = from_status(&out.unwrap_err()).expect("error");
        assert_eq!(back.details().len(), 1);
    }

    #[test]
    fn no_capability_means_no_detail() {
        let interceptor = ErrorInterceptor::new();
        let mut metadata = MetadataMap::new();
        metadata.insert("accept-language", "ja".parse().unwrap());
        let err = Error::new("plain").with_code(Code::INTERNAL);
        let status = interceptor.convert(&metadata, &err);
        let back = from_status(&status).expect("error");
        assert!(back.details().is_empty());
    }
}
