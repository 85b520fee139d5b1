// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical detail kinds and the type-erased detail bag.
//!
//! Details are structured payloads attached to an error beyond its message.
//! The canonical kinds travel across every transport; payloads native to one
//! protocol ride along as passthrough variants and are dropped by adapters
//! that cannot represent them. Conversion is always best-effort: a detail
//! that cannot be represented is omitted, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single field-level violation inside a [`BadRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Path to the offending request field.
    pub field: String,
    /// Why the field is invalid.
    pub description: String,
}

/// Describes violations in a client request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadRequest {
    /// All field violations, in the order the caller supplied them.
    pub violations: Vec<FieldViolation>,
}

/// A single precondition that was not met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreconditionViolation {
    /// Short service-defined violation type, e.g. `"TOS"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The subject the precondition applies to.
    pub subject: String,
    /// Human-readable description.
    pub description: String,
}

/// Describes which preconditions failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreconditionFailure {
    /// All precondition violations.
    pub violations: Vec<PreconditionViolation>,
}

/// Describes the resource being accessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    /// Type of the resource, e.g. `"user"`.
    pub resource_type: String,
    /// Name/identifier of the resource.
    pub resource_name: String,
    /// Owner of the resource, if relevant.
    pub owner: String,
    /// What went wrong with the resource.
    pub description: String,
}

/// Structured cause information: a stable reason within a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable, UPPER_SNAKE_CASE reason identifier.
    pub reason: String,
    /// Logical grouping, typically a service name.
    pub domain: String,
    /// Additional structured context.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// A message localized for a specific locale.
///
/// Produced by the locale-resolution pipeline in the transport adapters;
/// ordinary application code has no reason to construct one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedMessage {
    /// BCP 47 locale tag.
    pub locale: String,
    /// The localized message.
    pub message: String,
}

/// An opaque protobuf payload (`google.protobuf.Any` shape) passed through
/// by the protobuf-based transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoAny {
    /// Fully qualified type URL.
    pub type_url: String,
    /// Serialized message bytes.
    pub value: Vec<u8>,
}

/// A type-erased detail object.
///
/// Matching over details is total: each adapter converts the kinds it can
/// represent and drops the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    /// Field violations in a client request.
    BadRequest(BadRequest),
    /// Failed preconditions.
    PreconditionFailure(PreconditionFailure),
    /// Information about the accessed resource.
    ResourceInfo(ResourceInfo),
    /// Structured reason/domain/metadata.
    ErrorInfo(ErrorInfo),
    /// Locale-specific message, produced by locale resolution.
    LocalizedMessage(LocalizedMessage),
    /// Protobuf-native passthrough for the gRPC-family transports.
    Proto(ProtoAny),
    /// JSON-native passthrough for the HTTP-family transports.
    Json(Value),
}

/// Creates a [`Detail::BadRequest`] with a single field violation.
pub fn field_violation(field: impl Into<String>, description: impl Into<String>) -> Detail {
    Detail::BadRequest(BadRequest {
        violations: vec![FieldViolation {
            field: field.into(),
            description: description.into(),
        }],
    })
}

/// Creates a [`Detail::BadRequest`] with the given violations.
pub fn bad_request(violations: impl IntoIterator<Item = FieldViolation>) -> Detail {
    Detail::BadRequest(BadRequest {
        violations: violations.into_iter().collect(),
    })
}

/// Creates a [`Detail::PreconditionFailure`] with the given violations.
pub fn precondition_failure(violations: impl IntoIterator<Item = PreconditionViolation>) -> Detail {
    Detail::PreconditionFailure(PreconditionFailure {
        violations: violations.into_iter().collect(),
    })
}

/// Creates a [`Detail::ResourceInfo`].
pub fn resource_info(
    resource_type: impl Into<String>,
    resource_name: impl Into<String>,
    owner: impl Into<String>,
    description: impl Into<String>,
) -> Detail {
    Detail::ResourceInfo(ResourceInfo {
        resource_type: resource_type.into(),
        resource_name: resource_name.into(),
        owner: owner.into(),
        description: description.into(),
    })
}

/// Creates a [`Detail::ErrorInfo`].
pub fn error_info(
    reason: impl Into<String>,
    domain: impl Into<String>,
    metadata: BTreeMap<String, String>,
) -> Detail {
    Detail::ErrorInfo(ErrorInfo {
        reason: reason.into(),
        domain: domain.into(),
        metadata,
    })
}

/// JSON `type` discriminator values for the canonical record kinds.
const TAG_BAD_REQUEST: &str = "BadRequest";
const TAG_PRECONDITION_FAILURE: &str = "PreconditionFailure";
const TAG_RESOURCE_INFO: &str = "ResourceInfo";
const TAG_ERROR_INFO: &str = "ErrorInfo";

impl Detail {
    /// Renders this detail as a `type`-tagged JSON object, the shape shared
    /// by the HTTP `errors` array and the JSON-RPC `data` member.
    ///
    /// Returns `None` for kinds the JSON transports do not carry:
    /// [`Detail::Proto`] payloads, non-object [`Detail::Json`] values, and
    /// [`Detail::LocalizedMessage`] (which the adapters emit through a
    /// dedicated member instead).
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Detail::BadRequest(d) => tagged(TAG_BAD_REQUEST, d),
            Detail::PreconditionFailure(d) => tagged(TAG_PRECONDITION_FAILURE, d),
            Detail::ResourceInfo(d) => tagged(TAG_RESOURCE_INFO, d),
            Detail::ErrorInfo(d) => tagged(TAG_ERROR_INFO, d),
            Detail::Json(v @ Value::Object(_)) => Some(v.clone()),
            Detail::LocalizedMessage(_) | Detail::Proto(_) | Detail::Json(_) => None,
        }
    }

    /// Recovers a detail from a received JSON object.
    ///
    /// Objects carrying a recognized `type` tag decode into their canonical
    /// kind; everything else is kept verbatim as [`Detail::Json`].
    pub fn from_json(value: Value) -> Detail {
        let tag = value.get("type").and_then(Value::as_str);
        let decoded = match tag {
            Some(TAG_BAD_REQUEST) => serde_json::from_value(value.clone())
                .ok()
                .map(Detail::BadRequest),
            Some(TAG_PRECONDITION_FAILURE) => serde_json::from_value(value.clone())
                .ok()
                .map(Detail::PreconditionFailure),
            Some(TAG_RESOURCE_INFO) => serde_json::from_value(value.clone())
                .ok()
                .map(Detail::ResourceInfo),
            Some(TAG_ERROR_INFO) => serde_json::from_value(value.clone())
                .ok()
                .map(Detail::ErrorInfo),
            _ => None,
        };
        decoded.unwrap_or(Detail::Json(value))
    }
}

fn tagged<T: Serialize>(tag: &str, payload: &T) -> Option<Value> {
    let mut value = serde_json::to_value(payload).ok()?;
    value.as_object_mut()?.insert("type".into(), tag.into());
    Some(value)
}
