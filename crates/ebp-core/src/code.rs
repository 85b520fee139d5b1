// SPDX-License-Identifier: MIT OR Apache-2.0
//! Open string-based error classification codes.
//!
//! A [`Code`] is a machine-readable tag that survives transport boundaries.
//! The well-known codes map one-to-one onto the gRPC status vocabulary;
//! callers are free to mint their own codes with [`Code::from_static`] or
//! [`Code::new`] — no registration is required to *carry* a custom code,
//! only to *map* it (see the transport adapter crates).

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sentinel::Sentinel;

/// String-based error classification.
///
/// The empty code means "unset" and is distinct from every defined code,
/// including [`Code::UNKNOWN`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(Cow<'static, str>);

impl Code {
    /// The unset code. Never emitted on the wire; stands for "no
    /// classification anywhere in the chain".
    pub const UNSET: Code = Code::from_static("");

    /// The operation was cancelled, typically by the caller.
    pub const CANCELED: Code = Code::from_static("canceled");
    /// Unknown error, the catch-all classification.
    pub const UNKNOWN: Code = Code::from_static("unknown");
    /// The client specified an invalid argument.
    pub const INVALID_ARGUMENT: Code = Code::from_static("invalid_argument");
    /// The deadline expired before the operation could complete.
    pub const DEADLINE_EXCEEDED: Code = Code::from_static("deadline_exceeded");
    /// A requested entity was not found.
    pub const NOT_FOUND: Code = Code::from_static("not_found");
    /// The entity a client attempted to create already exists.
    pub const ALREADY_EXISTS: Code = Code::from_static("already_exists");
    /// The caller does not have permission to execute the operation.
    pub const PERMISSION_DENIED: Code = Code::from_static("permission_denied");
    /// Some resource has been exhausted (quota, rate limit, disk).
    pub const RESOURCE_EXHAUSTED: Code = Code::from_static("resource_exhausted");
    /// The system is not in a state required for the operation.
    pub const FAILED_PRECONDITION: Code = Code::from_static("failed_precondition");
    /// The operation was aborted, typically a concurrency conflict.
    pub const ABORTED: Code = Code::from_static("aborted");
    /// The operation was attempted past the valid range.
    pub const OUT_OF_RANGE: Code = Code::from_static("out_of_range");
    /// The operation is not implemented or not supported.
    pub const UNIMPLEMENTED: Code = Code::from_static("unimplemented");
    /// Internal error: an invariant expected by the system was broken.
    pub const INTERNAL: Code = Code::from_static("internal");
    /// The service is currently unavailable.
    pub const UNAVAILABLE: Code = Code::from_static("unavailable");
    /// Unrecoverable data loss or corruption.
    pub const DATA_LOSS: Code = Code::from_static("data_loss");
    /// The request does not have valid authentication credentials.
    pub const UNAUTHENTICATED: Code = Code::from_static("unauthenticated");

    /// Every well-known code, in gRPC enumeration order.
    pub const WELL_KNOWN: &'static [Code] = &[
        Code::CANCELED,
        Code::UNKNOWN,
        Code::INVALID_ARGUMENT,
        Code::DEADLINE_EXCEEDED,
        Code::NOT_FOUND,
        Code::ALREADY_EXISTS,
        Code::PERMISSION_DENIED,
        Code::RESOURCE_EXHAUSTED,
        Code::FAILED_PRECONDITION,
        Code::ABORTED,
        Code::OUT_OF_RANGE,
        Code::UNIMPLEMENTED,
        Code::INTERNAL,
        Code::UNAVAILABLE,
        Code::DATA_LOSS,
        Code::UNAUTHENTICATED,
    ];

    /// Creates a code from a static string without allocating.
    pub const fn from_static(code: &'static str) -> Self {
        Code(Cow::Borrowed(code))
    }

    /// Creates a code from an arbitrary string.
    pub fn new(code: impl Into<String>) -> Self {
        Code(Cow::Owned(code.into()))
    }

    /// The string representation of this code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the unset code.
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({:?})", self.0)
    }
}

impl From<&'static str> for Code {
    fn from(code: &'static str) -> Self {
        Code::from_static(code)
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        Code(Cow::Owned(code))
    }
}

/// Extracts the first non-unset code found in the error chain.
///
/// Walks `source()` links, so codes are found even behind foreign wrapper
/// errors. Returns [`Code::UNSET`] if no node in the chain carries a code.
pub fn code_of(err: &(dyn StdError + 'static)) -> Code {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = cur {
        if let Some(ex) = e.downcast_ref::<Error>() {
            if !ex.own_code().is_unset() {
                return ex.own_code().clone();
            }
        } else if let Some(s) = e.downcast_ref::<Sentinel>() {
            if !s.code().is_unset() {
                return s.code().clone();
            }
        }
        cur = e.source();
    }
    Code::UNSET
}

/// Reports whether the error chain resolves to the given code.
pub fn is_code(err: &(dyn StdError + 'static), code: &Code) -> bool {
    code_of(err) == *code
}
