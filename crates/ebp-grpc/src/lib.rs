// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # ebp-grpc
//!
//! tonic status adapter for the Error Backplane.
//!
//! Converts [`ebp_core::Error`] chains to and from [`tonic::Status`],
//! packing canonical details into the `google.rpc.Status` payload that
//! rides in `grpc-status-details-bin`. gRPC carries only the mapped status
//! enum, so custom classification codes degrade to `Unknown` on the
//! reverse leg — the HTTP adapter is the transport that preserves code
//! strings verbatim.

mod code;
pub mod details;
mod interceptor;
pub mod pb;
mod status;

pub use code::{register_code, to_code, to_grpc_code};
pub use interceptor::ErrorInterceptor;
pub use status::{ErrorExt, from_status, to_status};
