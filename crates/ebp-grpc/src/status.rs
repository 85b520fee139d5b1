// SPDX-License-Identifier: MIT OR Apache-2.0
//! `tonic::Status` round-trip conversion.

use std::error::Error as StdError;

use ebp_core::{Code, Detail, Error, ProtoAny, code_of, details_of};
use prost::Message;

use crate::code::{to_code, to_grpc_code};
use crate::pb;

/// Converts an error to a [`tonic::Status`].
///
/// The chain's code is mapped through the gRPC table (custom codes degrade
/// to [`tonic::Code::Unknown`] — gRPC carries only the status enum, not the
/// code string); the message is the chain's rendering; canonical details
/// and protobuf passthrough payloads are packed into the encoded
/// `google.rpc.Status`. JSON passthrough details are dropped here.
pub fn to_status(err: &(dyn StdError + 'static)) -> tonic::Status {
    let grpc_code = to_grpc_code(&code_of(err));
    let message = err.to_string();

    let details: Vec<prost_types::Any> = details_of(err).iter().filter_map(to_any).collect();
    if details.is_empty() {
        return tonic::Status::new(grpc_code, message);
    }

    let payload = pb::Status {
        code: grpc_code as i32,
        message: message.clone(),
        details,
    };
    tonic::Status::with_details(grpc_code, message, payload.encode_to_vec().into())
}

/// Reconstructs an [`Error`] from a received [`tonic::Status`].
///
/// Returns `None` for [`tonic::Code::Ok`]. Recognized `google.rpc` detail
/// payloads decode into canonical kinds; unrecognized payloads are kept as
/// [`Detail::Proto`] passthrough.
pub fn from_status(status: &tonic::Status) -> Option<Error> {
    if status.code() == tonic::Code::Ok {
        return None;
    }
    let mut err = Error::new(status.message()).with_code(to_code(status.code()));

    let bytes = status.details();
    if !bytes.is_empty() {
        if let Ok(payload) = pb::Status::decode(bytes) {
            let details: Vec<Detail> = payload.details.into_iter().map(from_any).collect();
            if !details.is_empty() {
                err = err.with_details(details);
            }
        }
    }
    Some(err)
}

/// Conversion sugar for handler code.
pub trait ErrorExt {
    /// Converts this error into a [`tonic::Status`] via [`to_status`].
    fn to_status(&self) -> tonic::Status;
}

impl ErrorExt for Error {
    fn to_status(&self) -> tonic::Status {
        to_status(self)
    }
}

fn to_any(detail: &Detail) -> Option<prost_types::Any> {
    match detail {
        Detail::BadRequest(d) => Some(pb::pack(
            "BadRequest",
            &pb::BadRequest {
                field_violations: d
                    .violations
                    .iter()
                    .map(|v| pb::FieldViolation {
                        field: v.field.clone(),
                        description: v.description.clone(),
                    })
                    .collect(),
            },
        )),
        Detail::PreconditionFailure(d) => Some(pb::pack(
            "PreconditionFailure",
            &pb::PreconditionFailure {
                violations: d
                    .violations
                    .iter()
                    .map(|v| pb::PreconditionViolation {
                        r#type: v.kind.clone(),
                        subject: v.subject.clone(),
                        description: v.description.clone(),
                    })
                    .collect(),
            },
        )),
        Detail::ResourceInfo(d) => Some(pb::pack(
            "ResourceInfo",
            &pb::ResourceInfo {
                resource_type: d.resource_type.clone(),
                resource_name: d.resource_name.clone(),
                owner: d.owner.clone(),
                description: d.description.clone(),
            },
        )),
        Detail::ErrorInfo(d) => Some(pb::pack(
            "ErrorInfo",
            &pb::ErrorInfo {
                reason: d.reason.clone(),
                domain: d.domain.clone(),
                metadata: d
                    .metadata
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            },
        )),
        Detail::LocalizedMessage(d) => Some(pb::pack(
            "LocalizedMessage",
            &pb::LocalizedMessage {
                locale: d.locale.clone(),
                message: d.message.clone(),
            },
        )),
        Detail::Proto(any) => Some(prost_types::Any {
            type_url: any.type_url.clone(),
            value: any.value.clone(),
        }),
        Detail::Json(_) => None,
    }
}

fn from_any(any: prost_types::Any) -> Detail {
    let type_name = any.type_url.rsplit('/').next().unwrap_or_default();
    let value = any.value.as_slice();
    let decoded = match type_name {
        "google.rpc.BadRequest" => pb::BadRequest::decode(value).ok().map(|d| {
            Detail::BadRequest(ebp_core::BadRequest {
                violations: d
                    .field_violations
                    .into_iter()
                    .map(|v| ebp_core::FieldViolation {
                        field: v.field,
                        description: v.description,
                    })
                    .collect(),
            })
        }),
        "google.rpc.PreconditionFailure" => pb::PreconditionFailure::decode(value).ok().map(|d| {
            Detail::PreconditionFailure(ebp_core::PreconditionFailure {
                violations: d
                    .violations
                    .into_iter()
                    .map(|v| ebp_core::PreconditionViolation {
                        kind: v.r#type,
                        subject: v.subject,
                        description: v.description,
                    })
                    .collect(),
            })
        }),
        "google.rpc.ResourceInfo" => pb::ResourceInfo::decode(value).ok().map(|d| {
            Detail::ResourceInfo(ebp_core::ResourceInfo {
                resource_type: d.resource_type,
                resource_name: d.resource_name,
                owner: d.owner,
                description: d.description,
            })
        }),
        "google.rpc.ErrorInfo" => pb::ErrorInfo::decode(value).ok().map(|d| {
            Detail::ErrorInfo(ebp_core::ErrorInfo {
                reason: d.reason,
                domain: d.domain,
                metadata: d.metadata.into_iter().collect(),
            })
        }),
        "google.rpc.LocalizedMessage" => pb::LocalizedMessage::decode(value).ok().map(|d| {
            Detail::LocalizedMessage(ebp_core::LocalizedMessage {
                locale: d.locale,
                message: d.message,
            })
        }),
        _ => None,
    };
    decoded.unwrap_or(Detail::Proto(ProtoAny {
        type_url: any.type_url,
        value: any.value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebp_core::field_violation;

    #[test]
    fn nil_like_ok_status_is_none() {
        let ok = tonic::Status::new(tonic::Code::Ok, "");
        assert!(from_status(&ok).is_none());
    }

    #[test]
    fn coded_error_round_trips() {
        let err = Error::new("user not found").with_code(Code::NOT_FOUND);
        let status = to_status(&err);
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "user not found");

        let back = from_status(&status).expect("error");
        assert_eq!(back.code(), Code::NOT_FOUND);
        assert_eq!(back.to_string(), "user not found");
    }

    #[test]
    fn details_survive_the_round_trip() {
        let err = Error::new("bad input")
            .with_code(Code::INVALID_ARGUMENT)
            .with_details([field_violation("email", "invalid format")]);
        let status = to_status(&err);
        let back = from_status(&status).expect("error");
        match back.details() {
            [Detail::BadRequest(br)] => {
                assert_eq!(br.violations.len(), 1);
                assert_eq!(br.violations[0].field, "email");
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn foreign_proto_details_pass_through() {
        let err = Error::new("x").with_code(Code::INTERNAL).with_details([
            Detail::Proto(ProtoAny {
                type_url: "type.googleapis.com/example.Custom".into(),
                value: vec![8, 1],
            }),
        ]);
        let back = from_status(&to_status(&err)).expect("error");
        match back.details() {
            [Detail::Proto(any)] => {
                assert_eq!(any.type_url, "type.googleapis.com/example.Custom");
                assert_eq!(any.value, vec![8, 1]);
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn json_details_are_dropped() {
        let err = Error::new("x")
            .with_code(Code::INTERNAL)
            .with_details([Detail::Json(serde_json::json!({"a": 1}))]);
        let back = from_status(&to_status(&err)).expect("error");
        assert!(back.details().is_empty());
    }

    #[test]
    fn custom_codes_degrade_to_unknown() {
        let err = Error::new("pay up").with_code(Code::from_static("billing_overdue"));
        let status = to_status(&err);
        assert_eq!(status.code(), tonic::Code::Unknown);
        let back = from_status(&status).expect("error");
        assert_eq!(back.code(), Code::UNKNOWN);
    }

    #[test]
    fn plain_foreign_errors_map_to_unknown() {
        let io = std::io::Error::other("disk");
        let status = to_status(&io);
        assert_eq!(status.code(), tonic::Code::Unknown);
        assert_eq!(status.message(), "disk");
    }

    #[test]
    fn second_conversion_is_idempotent() {
        let err = Error::new("bad input")
            .with_code(Code::INVALID_ARGUMENT)
            .with_details([field_violation("email", "required")]);
        let first = to_status(&err);
        let recovered = from_status(&first).expect("error");
        let second = to_status(&recovered);
        assert_eq!(first.code(), second.code());
        assert_eq!(first.message(), second.message());
        assert_eq!(first.details(), second.details());
    }

    #[test]
    fn all_well_known_codes_round_trip() {
        for code in Code::WELL_KNOWN {
            assert_eq!(&to_code(to_grpc_code(code)), code, "code {code}");
        }
    }
}
