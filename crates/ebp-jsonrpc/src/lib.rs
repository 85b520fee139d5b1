// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # ebp-jsonrpc
//!
//! JSON-RPC 2.0 error-object adapter for the Error Backplane.
//!
//! Converts [`ebp_core::Error`] chains to and from
//! [`jsonrpsee_types::ErrorObject`] values. The classification code maps
//! onto an integer code space (reserved JSON-RPC codes where they fit,
//! the `-32000` server range otherwise); details ride in the `data`
//! member using the same tagged-JSON shape as the HTTP adapter. Like
//! gRPC, the wire carries only the mapped code, so custom codes degrade
//! to `unknown` on the reverse leg.

mod code;
mod handler;
mod object;

pub use code::{
    INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, UNKNOWN_ERROR, register_code, to_code,
    to_rpc_code,
};
pub use handler::RpcErrorHandler;
pub use object::{ErrorData, from_error_object, to_error_object};
