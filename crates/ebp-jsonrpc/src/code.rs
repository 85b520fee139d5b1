// SPDX-License-Identifier: MIT OR Apache-2.0
//! Code ↔ JSON-RPC error code mapping tables.
//!
//! JSON-RPC reserves `-32700..=-32600` for protocol failures and defines
//! `-32602` (invalid params), `-32601` (method not found), and `-32603`
//! (internal error); those map naturally onto `invalid_argument`,
//! `unimplemented`, and `internal`. The remaining well-known codes live in
//! the implementation-defined server range `-32000..=-32099`.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use ebp_core::Code;

/// JSON-RPC error code for `invalid_argument` (reserved: invalid params).
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC error code for `unimplemented` (reserved: method not found).
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC error code for `internal` (reserved: internal error).
pub const INTERNAL_ERROR: i32 = -32603;
/// Server-range code for `unknown`, also the fallback for unmapped codes.
pub const UNKNOWN_ERROR: i32 = -32000;

const BUILTIN: &[(Code, i32)] = &[
    (Code::UNKNOWN, UNKNOWN_ERROR),
    (Code::CANCELED, -32001),
    (Code::DEADLINE_EXCEEDED, -32002),
    (Code::NOT_FOUND, -32003),
    (Code::ALREADY_EXISTS, -32004),
    (Code::PERMISSION_DENIED, -32005),
    (Code::RESOURCE_EXHAUSTED, -32006),
    (Code::FAILED_PRECONDITION, -32007),
    (Code::ABORTED, -32008),
    (Code::OUT_OF_RANGE, -32009),
    (Code::UNAVAILABLE, -32010),
    (Code::DATA_LOSS, -32011),
    (Code::UNAUTHENTICATED, -32012),
    (Code::INVALID_ARGUMENT, INVALID_PARAMS),
    (Code::UNIMPLEMENTED, METHOD_NOT_FOUND),
    (Code::INTERNAL, INTERNAL_ERROR),
];

struct Tables {
    to_rpc: HashMap<Code, i32>,
    to_code: HashMap<i32, Code>,
}

static TABLES: LazyLock<RwLock<Tables>> = LazyLock::new(|| {
    let mut to_rpc = HashMap::with_capacity(BUILTIN.len());
    let mut to_code = HashMap::with_capacity(BUILTIN.len());
    for (code, rpc) in BUILTIN {
        to_rpc.insert(code.clone(), *rpc);
        to_code.insert(*rpc, code.clone());
    }
    RwLock::new(Tables { to_rpc, to_code })
});

/// Registers a custom mapping between a [`Code`] and a JSON-RPC error
/// code, in both directions.
///
/// Call during single-threaded initialization, before serving traffic.
pub fn register_code(code: Code, rpc: i32) {
    let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
    tables.to_rpc.insert(code.clone(), rpc);
    tables.to_code.insert(rpc, code);
}

/// Maps a [`Code`] to a JSON-RPC error code.
///
/// Unknown and unregistered custom codes map to [`UNKNOWN_ERROR`].
pub fn to_rpc_code(code: &Code) -> i32 {
    TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_rpc
        .get(code)
        .copied()
        .unwrap_or(UNKNOWN_ERROR)
}

/// Maps a JSON-RPC error code to a [`Code`].
///
/// Unmapped codes return [`Code::UNKNOWN`].
pub fn to_code(rpc: i32) -> Code {
    TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_code
        .get(&rpc)
        .cloned()
        .unwrap_or(Code::UNKNOWN)
}
