// SPDX-License-Identifier: MIT OR Apache-2.0
//! RFC 9457 Problem Details conversion and response rendering.

use std::error::Error as StdError;

use axum::body::Body;
use axum::response::Response;
use ebp_core::{Code, Detail, Error, LocalizedMessage, code_of, details_of};
use http::{StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::code::{to_code, to_http_status};

/// Media type of a Problem Details response body.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Body written when the real problem body fails to serialize.
const FALLBACK_BODY: &str = r#"{"type":"about:blank","title":"Internal Server Error","status":500}"#;

/// An RFC 9457 Problem Details object.
///
/// Standard members (`type`, `title`, `status`, `detail`, `instance`)
/// follow the RFC; the extension members (`code`, `errors`,
/// `localized_message`) carry backplane-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetail {
    /// Problem type URI; `"about:blank"` when the problem has no
    /// dedicated documentation.
    #[serde(rename = "type")]
    pub type_uri: String,
    /// Short human-readable summary, the status reason phrase.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Human-readable explanation specific to this occurrence.
    pub detail: String,
    /// URI identifying this specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance: Option<String>,
    /// Backplane classification code.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub code: String,
    /// Converted detail objects, each tagged with a `type` discriminator.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<serde_json::Value>,
    /// Locale-specific message, when locale resolution produced one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub localized_message: Option<LocalizedMessage>,
}

impl ProblemDetail {
    /// Sets the problem `type` URI.
    pub fn with_type_uri(mut self, uri: impl Into<String>) -> Self {
        self.type_uri = uri.into();
        self
    }

    /// Sets the problem `instance` URI.
    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    /// Parses a received Problem Details body.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ProblemParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Failure to parse a received Problem Details body.
#[derive(Debug, thiserror::Error)]
pub enum ProblemParseError {
    /// The body is not a valid Problem Details JSON object.
    #[error("invalid problem details body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Converts an error to a Problem Details object.
///
/// The status comes from the code table; the `title` is the status reason
/// phrase, falling back to the code string for non-standard statuses such
/// as 499; the `code` extension falls back to `"unknown"` when the chain
/// carries no code.
pub fn to_problem_detail(err: &(dyn StdError + 'static)) -> ProblemDetail {
    let code = code_of(err);
    let status = to_http_status(&code);

    let code = if code.is_unset() { Code::UNKNOWN } else { code };
    let title = status
        .canonical_reason()
        .unwrap_or(code.as_str())
        .to_string();

    let mut problem = ProblemDetail {
        type_uri: "about:blank".to_string(),
        title,
        status: status.as_u16(),
        detail: err.to_string(),
        instance: None,
        code: code.as_str().to_string(),
        errors: Vec::new(),
        localized_message: None,
    };

    for detail in details_of(err) {
        if let Detail::LocalizedMessage(lm) = &detail {
            problem.localized_message.get_or_insert(lm.clone());
            continue;
        }
        if let Some(value) = detail.to_json() {
            problem.errors.push(value);
        }
    }

    problem
}

/// Reconstructs an [`Error`] from a received Problem Details object.
///
/// The verbatim `code` extension wins when present; otherwise the status
/// is mapped through the reverse table. Recognized `errors` entries and
/// the `localized_message` member are restored as details.
pub fn from_problem_detail(problem: &ProblemDetail) -> Error {
    let code = if problem.code.is_empty() {
        match StatusCode::from_u16(problem.status) {
            Ok(status) => to_code(status),
            Err(_) => Code::UNKNOWN,
        }
    } else {
        Code::new(problem.code.clone())
    };

    let mut details: Vec<Detail> = problem
        .errors
        .iter()
        .cloned()
        .map(Detail::from_json)
        .collect();
    if let Some(lm) = &problem.localized_message {
        details.push(Detail::LocalizedMessage(lm.clone()));
    }

    Error::new(problem.detail.clone())
        .with_code(code)
        .with_details(details)
}

/// Renders a Problem Details object as an HTTP response with
/// `application/problem+json` content type.
///
/// A body that fails to serialize degrades to the fixed minimal 500 body;
/// this path never errors.
pub fn problem_response(problem: &ProblemDetail) -> Response {
    match serde_json::to_vec(problem) {
        Ok(body) => {
            let status = StatusCode::from_u16(problem.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            response_with(status, body)
        }
        Err(_) => response_with(
            StatusCode::INTERNAL_SERVER_ERROR,
            FALLBACK_BODY.as_bytes().to_vec(),
        ),
    }
}

/// Converts an error and writes it as a Problem Details response.
pub fn write_error(err: &(dyn StdError + 'static)) -> Response {
    problem_response(&to_problem_detail(err))
}

fn response_with(status: StatusCode, body: Vec<u8>) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, PROBLEM_JSON)
        .body(Body::from(body))
        .expect("static response parts are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebp_core::field_violation;
    use serde_json::json;

    #[test]
    fn coded_error_maps_exactly() {
        let err = Error::new("user not found").with_code(Code::NOT_FOUND);
        let p = to_problem_detail(&err);
        assert_eq!(p.type_uri, "about:blank");
        assert_eq!(p.title, "Not Found");
        assert_eq!(p.status, 404);
        assert_eq!(p.detail, "user not found");
        assert_eq!(p.code, "not_found");
        assert!(p.errors.is_empty());
        assert!(p.localized_message.is_none());
    }

    #[test]
    fn non_standard_status_title_falls_back_to_code() {
        let err = Error::new("client closed").with_code(Code::CANCELED);
        let p = to_problem_detail(&err);
        assert_eq!(p.status, 499);
        assert_eq!(p.title, "canceled");
    }

    #[test]
    fn plain_error_degrades_to_unknown() {
        let io = std::io::Error::other("something went wrong");
        let p = to_problem_detail(&io);
        assert_eq!(p.code, "unknown");
        assert_eq!(p.status, 500);
        assert_eq!(p.detail, "something went wrong");
    }

    #[test]
    fn custom_code_string_is_preserved() {
        let err = Error::new("pay up").with_code(Code::from_static("billing_overdue"));
        let p = to_problem_detail(&err);
        assert_eq!(p.code, "billing_overdue");
        assert_eq!(p.status, 500);
        let back = from_problem_detail(&p);
        assert_eq!(back.code(), Code::from_static("billing_overdue"));
    }

    #[test]
    fn details_become_tagged_errors() {
        let err = Error::new("bad input")
            .with_code(Code::INVALID_ARGUMENT)
            .with_details([field_violation("email", "invalid format")]);
        let p = to_problem_detail(&err);
        assert_eq!(
            p.errors,
            vec![json!({
                "type": "BadRequest",
                "violations": [{"field": "email", "description": "invalid format"}],
            })]
        );
    }

    #[test]
    fn localized_message_detail_becomes_the_extension_member() {
        let err = Error::new("not found")
            .with_code(Code::NOT_FOUND)
            .with_details([Detail::LocalizedMessage(LocalizedMessage {
                locale: "ja".into(),
                message: "見つかりません".into(),
            })]);
        let p = to_problem_detail(&err);
        assert!(p.errors.is_empty());
        let lm = p.localized_message.expect("localized message");
        assert_eq!(lm.locale, "ja");
    }

    #[test]
    fn round_trip_preserves_code_message_and_details() {
        let err = Error::new("bad input")
            .with_code(Code::INVALID_ARGUMENT)
            .with_details([field_violation("email", "required")]);
        let back = from_problem_detail(&to_problem_detail(&err));
        assert_eq!(back.code(), Code::INVALID_ARGUMENT);
        assert_eq!(back.to_string(), "bad input");
        assert_eq!(back.details().len(), 1);
    }

    #[test]
    fn second_conversion_is_idempotent() {
        let err = Error::new("conflict").with_code(Code::ALREADY_EXISTS);
        let first = to_problem_detail(&err);
        let second = to_problem_detail(&from_problem_detail(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn status_without_code_maps_through_reverse_table() {
        let p = ProblemDetail {
            type_uri: "about:blank".into(),
            title: "Not Found".into(),
            status: 404,
            detail: "gone".into(),
            instance: None,
            code: String::new(),
            errors: Vec::new(),
            localized_message: None,
        };
        assert_eq!(from_problem_detail(&p).code(), Code::NOT_FOUND);
    }

    #[test]
    fn serialized_shape_omits_empty_members() {
        let err = Error::new("user not found").with_code(Code::NOT_FOUND);
        let value = serde_json::to_value(to_problem_detail(&err)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "about:blank",
                "title": "Not Found",
                "status": 404,
                "detail": "user not found",
                "code": "not_found",
            })
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ProblemDetail::from_json_slice(b"not json").is_err());
        let ok = ProblemDetail::from_json_slice(
            br#"{"type":"about:blank","title":"Not Found","status":404,"detail":"x"}"#,
        )
        .unwrap();
        assert_eq!(ok.status, 404);
        assert!(ok.code.is_empty());
    }

    #[test]
    fn response_carries_problem_content_type() {
        let err = Error::new("nope").with_code(Code::PERMISSION_DENIED);
        let resp = write_error(&err);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_JSON
        );
    }
}
