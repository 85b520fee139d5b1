// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # ebp-core
//!
//! Transport-agnostic structured errors for the Error Backplane.
//!
//! Application code raises an [`Error`] carrying a stable classification
//! [`Code`], structured fields, opaque [`Detail`] payloads, and an optional
//! captured [`Stack`]; the transport adapter crates (`ebp-http`, `ebp-grpc`,
//! `ebp-jsonrpc`) translate it losslessly into their wire formats and back.
//!
//! Errors are immutable values: every builder returns a new node sharing
//! the same cause, so published errors are safe to share across tasks.
//!
//! ```
//! use ebp_core::{Code, Error};
//!
//! let err = Error::new("user not found")
//!     .with_code(Code::NOT_FOUND)
//!     .with("user_id", 42)
//!     .with_field_violation("user_id", "no such user");
//!
//! assert_eq!(err.code(), Code::NOT_FOUND);
//! assert_eq!(ebp_core::details_of(&err).len(), 1);
//! ```

mod code;
mod details;
mod error;
mod locale;
mod sentinel;
mod stack;
pub mod telemetry;

pub use code::{Code, code_of, is_code};
pub use details::{
    BadRequest, Detail, ErrorInfo, FieldViolation, LocalizedMessage, PreconditionFailure,
    PreconditionViolation, ProtoAny, ResourceInfo, bad_request, error_info, field_violation,
    precondition_failure, resource_info,
};
pub use error::{Error, Field, details_of, fields_of};
pub use locale::{Localize, localize_of, localized, parse_accept_language};
pub use sentinel::{Sentinel, is_sentinel};
pub use stack::{Frame, Stack, stack_of};
