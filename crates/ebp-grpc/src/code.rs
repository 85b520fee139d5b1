// SPDX-License-Identifier: MIT OR Apache-2.0
//! Code ↔ gRPC status code mapping tables.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use ebp_core::Code;

struct Tables {
    to_grpc: HashMap<Code, tonic::Code>,
    to_code: HashMap<i32, Code>,
}

static TABLES: LazyLock<RwLock<Tables>> = LazyLock::new(|| RwLock::new(Tables::builtin()));

impl Tables {
    fn builtin() -> Self {
        let pairs = [
            (Code::CANCELED, tonic::Code::Cancelled),
            (Code::UNKNOWN, tonic::Code::Unknown),
            (Code::INVALID_ARGUMENT, tonic::Code::InvalidArgument),
            (Code::DEADLINE_EXCEEDED, tonic::Code::DeadlineExceeded),
            (Code::NOT_FOUND, tonic::Code::NotFound),
            (Code::ALREADY_EXISTS, tonic::Code::AlreadyExists),
            (Code::PERMISSION_DENIED, tonic::Code::PermissionDenied),
            (Code::RESOURCE_EXHAUSTED, tonic::Code::ResourceExhausted),
            (Code::FAILED_PRECONDITION, tonic::Code::FailedPrecondition),
            (Code::ABORTED, tonic::Code::Aborted),
            (Code::OUT_OF_RANGE, tonic::Code::OutOfRange),
            (Code::UNIMPLEMENTED, tonic::Code::Unimplemented),
            (Code::INTERNAL, tonic::Code::Internal),
            (Code::UNAVAILABLE, tonic::Code::Unavailable),
            (Code::DATA_LOSS, tonic::Code::DataLoss),
            (Code::UNAUTHENTICATED, tonic::Code::Unauthenticated),
        ];

        let mut to_grpc = HashMap::with_capacity(pairs.len());
        let mut to_code = HashMap::with_capacity(pairs.len() + 1);
        to_code.insert(tonic::Code::Ok as i32, Code::UNSET);
        for (code, grpc) in pairs {
            to_grpc.insert(code.clone(), grpc);
            to_code.insert(grpc as i32, code);
        }
        Tables { to_grpc, to_code }
    }
}

/// Registers a custom mapping between a [`Code`] and a gRPC status code,
/// in both directions.
///
/// Call during single-threaded initialization, before serving traffic.
pub fn register_code(code: Code, grpc: tonic::Code) {
    let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
    tables.to_grpc.insert(code.clone(), grpc);
    tables.to_code.insert(grpc as i32, code);
}

/// Maps a [`Code`] to a gRPC status code.
///
/// Unknown and unregistered custom codes map to [`tonic::Code::Unknown`].
pub fn to_grpc_code(code: &Code) -> tonic::Code {
    TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_grpc
        .get(code)
        .copied()
        .unwrap_or(tonic::Code::Unknown)
}

/// Maps a gRPC status code to a [`Code`].
///
/// [`tonic::Code::Ok`] maps to [`Code::UNSET`]; anything unmapped returns
/// [`Code::UNKNOWN`].
pub fn to_code(grpc: tonic::Code) -> Code {
    TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_code
        .get(&(grpc as i32))
        .cloned()
        .unwrap_or(Code::UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_codes_round_trip() {
        for code in Code::WELL_KNOWN {
            let grpc = to_grpc_code(code);
            assert_eq!(&to_code(grpc), code, "round trip for {code}");
        }
    }

    #[test]
    fn custom_codes_degrade_to_unknown() {
        let custom = Code::from_static("billing_overdue");
        assert_eq!(to_grpc_code(&custom), tonic::Code::Unknown);
    }

    #[test]
    fn ok_maps_to_unset() {
        assert_eq!(to_code(tonic::Code::Ok), Code::UNSET);
    }
}
