// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # ebp-http
//!
//! RFC 9457 Problem Details adapter for the Error Backplane.
//!
//! Converts [`ebp_core::Error`] chains to and from Problem Details bodies
//! and provides an axum middleware that localizes and renders handler
//! errors as `application/problem+json` responses.
//!
//! Custom codes survive the HTTP round trip verbatim through the `code`
//! extension member — unlike the status-enum transports, where they
//! degrade to `unknown`.

mod code;
mod middleware;
mod problem;

pub use code::{STATUS_CLIENT_CLOSED_REQUEST, register_code, to_code, to_http_status};
pub use middleware::{ErrorMiddleware, ErrorResponse};
pub use problem::{
    PROBLEM_JSON, ProblemDetail, ProblemParseError, from_problem_detail, problem_response,
    to_problem_detail, write_error,
};
