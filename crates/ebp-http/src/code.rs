// SPDX-License-Identifier: MIT OR Apache-2.0
//! Code ↔ HTTP status mapping tables.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use ebp_core::Code;
use http::StatusCode;

/// Non-standard but conventionally reserved status for client cancellation.
/// Round-trips [`Code::CANCELED`] exactly.
pub const STATUS_CLIENT_CLOSED_REQUEST: u16 = 499;

struct Tables {
    to_status: HashMap<Code, StatusCode>,
    to_code: HashMap<StatusCode, Code>,
}

static TABLES: LazyLock<RwLock<Tables>> = LazyLock::new(|| RwLock::new(Tables::builtin()));

impl Tables {
    fn builtin() -> Self {
        let status_499 =
            StatusCode::from_u16(STATUS_CLIENT_CLOSED_REQUEST).expect("499 is in range");

        let to_status = HashMap::from([
            (Code::INVALID_ARGUMENT, StatusCode::BAD_REQUEST),
            (Code::OUT_OF_RANGE, StatusCode::BAD_REQUEST),
            (Code::UNAUTHENTICATED, StatusCode::UNAUTHORIZED),
            (Code::PERMISSION_DENIED, StatusCode::FORBIDDEN),
            (Code::NOT_FOUND, StatusCode::NOT_FOUND),
            (Code::ALREADY_EXISTS, StatusCode::CONFLICT),
            (Code::ABORTED, StatusCode::CONFLICT),
            (Code::FAILED_PRECONDITION, StatusCode::PRECONDITION_FAILED),
            (Code::RESOURCE_EXHAUSTED, StatusCode::TOO_MANY_REQUESTS),
            (Code::CANCELED, status_499),
            (Code::INTERNAL, StatusCode::INTERNAL_SERVER_ERROR),
            (Code::UNKNOWN, StatusCode::INTERNAL_SERVER_ERROR),
            (Code::DATA_LOSS, StatusCode::INTERNAL_SERVER_ERROR),
            (Code::UNIMPLEMENTED, StatusCode::NOT_IMPLEMENTED),
            (Code::UNAVAILABLE, StatusCode::SERVICE_UNAVAILABLE),
            (Code::DEADLINE_EXCEEDED, StatusCode::GATEWAY_TIMEOUT),
        ]);

        let to_code = HashMap::from([
            (StatusCode::BAD_REQUEST, Code::INVALID_ARGUMENT),
            (StatusCode::UNAUTHORIZED, Code::UNAUTHENTICATED),
            (StatusCode::FORBIDDEN, Code::PERMISSION_DENIED),
            (StatusCode::NOT_FOUND, Code::NOT_FOUND),
            (StatusCode::CONFLICT, Code::ALREADY_EXISTS),
            (StatusCode::PRECONDITION_FAILED, Code::FAILED_PRECONDITION),
            (StatusCode::TOO_MANY_REQUESTS, Code::RESOURCE_EXHAUSTED),
            (status_499, Code::CANCELED),
            (StatusCode::INTERNAL_SERVER_ERROR, Code::INTERNAL),
            (StatusCode::NOT_IMPLEMENTED, Code::UNIMPLEMENTED),
            (StatusCode::SERVICE_UNAVAILABLE, Code::UNAVAILABLE),
            (StatusCode::GATEWAY_TIMEOUT, Code::DEADLINE_EXCEEDED),
        ]);

        Tables { to_status, to_code }
    }
}

/// Registers a custom mapping between a [`Code`] and an HTTP status, in
/// both directions.
///
/// Call during single-threaded initialization, before serving traffic;
/// lookups made while a registration is in flight will block briefly on
/// the table lock.
pub fn register_code(code: Code, status: StatusCode) {
    let mut tables = TABLES
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    tables.to_status.insert(code.clone(), status);
    tables.to_code.insert(status, code);
}

/// Maps a [`Code`] to an HTTP status.
///
/// Unknown and unregistered custom codes map to 500.
pub fn to_http_status(code: &Code) -> StatusCode {
    TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_status
        .get(code)
        .copied()
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Maps an HTTP status to a [`Code`].
///
/// Unmapped statuses return [`Code::UNKNOWN`].
pub fn to_code(status: StatusCode) -> Code {
    TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_code
        .get(&status)
        .cloned()
        .unwrap_or(Code::UNKNOWN)
}
