// SPDX-License-Identifier: MIT OR Apache-2.0
//! Vendored `google.rpc` message definitions.
//!
//! Hand-written prost structs matching the published
//! `google/rpc/status.proto` and `google/rpc/error_details.proto` field
//! layouts, so the crate needs no protoc build step. Only the messages the
//! backplane carries are defined.

use std::collections::HashMap;

/// `google.rpc.Status`: the wire payload carried in the
/// `grpc-status-details-bin` metadata entry.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    /// Status code, a `google.rpc.Code` enum value.
    #[prost(int32, tag = "1")]
    pub code: i32,
    /// Developer-facing error message.
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    /// Detail payloads, each a packed `google.protobuf.Any`.
    #[prost(message, repeated, tag = "3")]
    pub details: ::prost::alloc::vec::Vec<::prost_types::Any>,
}

/// `google.rpc.BadRequest`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BadRequest {
    /// All violations in the request.
    #[prost(message, repeated, tag = "1")]
    pub field_violations: ::prost::alloc::vec::Vec<FieldViolation>,
}

/// `google.rpc.BadRequest.FieldViolation`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldViolation {
    /// Path to the offending field.
    #[prost(string, tag = "1")]
    pub field: ::prost::alloc::string::String,
    /// Why the field is invalid.
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
}

/// `google.rpc.PreconditionFailure`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PreconditionFailure {
    /// All failed preconditions.
    #[prost(message, repeated, tag = "1")]
    pub violations: ::prost::alloc::vec::Vec<PreconditionViolation>,
}

/// `google.rpc.PreconditionFailure.Violation`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PreconditionViolation {
    /// Service-defined violation type.
    #[prost(string, tag = "1")]
    pub r#type: ::prost::alloc::string::String,
    /// Subject the precondition applies to.
    #[prost(string, tag = "2")]
    pub subject: ::prost::alloc::string::String,
    /// Human-readable description.
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
}

/// `google.rpc.ResourceInfo`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceInfo {
    /// Type of the resource.
    #[prost(string, tag = "1")]
    pub resource_type: ::prost::alloc::string::String,
    /// Name of the resource.
    #[prost(string, tag = "2")]
    pub resource_name: ::prost::alloc::string::String,
    /// Owner of the resource.
    #[prost(string, tag = "3")]
    pub owner: ::prost::alloc::string::String,
    /// What went wrong.
    #[prost(string, tag = "4")]
    pub description: ::prost::alloc::string::String,
}

/// `google.rpc.ErrorInfo`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorInfo {
    /// Stable reason identifier.
    #[prost(string, tag = "1")]
    pub reason: ::prost::alloc::string::String,
    /// Logical grouping, typically a service name.
    #[prost(string, tag = "2")]
    pub domain: ::prost::alloc::string::String,
    /// Additional structured context.
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<
        ::prost::alloc::string::String,
        ::prost::alloc::string::String,
    >,
}

/// `google.rpc.QuotaFailure`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QuotaFailure {
    /// All quota violations.
    #[prost(message, repeated, tag = "1")]
    pub violations: ::prost::alloc::vec::Vec<QuotaViolation>,
}

/// `google.rpc.QuotaFailure.Violation`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QuotaViolation {
    /// Subject on which the quota check failed.
    #[prost(string, tag = "1")]
    pub subject: ::prost::alloc::string::String,
    /// Why the quota check failed.
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
}

/// `google.rpc.RetryInfo`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RetryInfo {
    /// How long clients should wait before retrying.
    #[prost(message, optional, tag = "1")]
    pub retry_delay: ::core::option::Option<::prost_types::Duration>,
}

/// `google.rpc.DebugInfo`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DebugInfo {
    /// Stack trace entries.
    #[prost(string, repeated, tag = "1")]
    pub stack_entries: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Additional debugging information.
    #[prost(string, tag = "2")]
    pub detail: ::prost::alloc::string::String,
}

/// `google.rpc.LocalizedMessage`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LocalizedMessage {
    /// BCP 47 locale tag.
    #[prost(string, tag = "1")]
    pub locale: ::prost::alloc::string::String,
    /// The localized message.
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}

/// Type-URL prefix used when packing messages into `Any`.
pub(crate) const TYPE_URL_PREFIX: &str = "type.googleapis.com/google.rpc.";

/// Packs a message into a `google.protobuf.Any` under its `google.rpc`
/// type name.
pub(crate) fn pack<M: prost::Message>(type_name: &str, message: &M) -> ::prost_types::Any {
    ::prost_types::Any {
        type_url: format!("{TYPE_URL_PREFIX}{type_name}"),
        value: message.encode_to_vec(),
    }
}
