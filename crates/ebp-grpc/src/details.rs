// SPDX-License-Identifier: MIT OR Apache-2.0
//! Direct-use constructors for infrastructure detail payloads.
//!
//! These cover the `google.rpc` kinds the conversion pipeline does not
//! populate from canonical details — quota, retry, and debug payloads are
//! attached explicitly by infrastructure code and travel as protobuf
//! passthrough details. For field violations, preconditions, resources, and
//! error info, use the canonical constructors in `ebp_core` instead; those
//! convert on every transport.

use std::time::Duration;

use ebp_core::Detail;

use crate::pb;

/// A quota violation for [`quota_failure`].
pub fn quota_violation(
    subject: impl Into<String>,
    description: impl Into<String>,
) -> pb::QuotaViolation {
    pb::QuotaViolation {
        subject: subject.into(),
        description: description.into(),
    }
}

/// Creates a packed `google.rpc.QuotaFailure` detail.
pub fn quota_failure(violations: impl IntoIterator<Item = pb::QuotaViolation>) -> Detail {
    packed(
        "QuotaFailure",
        &pb::QuotaFailure {
            violations: violations.into_iter().collect(),
        },
    )
}

/// Creates a packed `google.rpc.RetryInfo` detail with the given delay.
pub fn retry_info(retry_delay: Duration) -> Detail {
    packed(
        "RetryInfo",
        &pb::RetryInfo {
            retry_delay: Some(prost_types::Duration {
                seconds: retry_delay.as_secs() as i64,
                nanos: retry_delay.subsec_nanos() as i32,
            }),
        },
    )
}

/// Creates a packed `google.rpc.DebugInfo` detail.
pub fn debug_info(
    stack_entries: impl IntoIterator<Item = String>,
    detail: impl Into<String>,
) -> Detail {
    packed(
        "DebugInfo",
        &pb::DebugInfo {
            stack_entries: stack_entries.into_iter().collect(),
            detail: detail.into(),
        },
    )
}

/// Creates a `google.rpc.LocalizedMessage` detail.
///
/// Normally the interceptors produce localized messages via locale
/// resolution; this constructor exists for callers that manage their own
/// translations.
pub fn localized_message(locale: impl Into<String>, message: impl Into<String>) -> Detail {
    Detail::LocalizedMessage(ebp_core::LocalizedMessage {
        locale: locale.into(),
        message: message.into(),
    })
}

fn packed<M: prost::Message>(type_name: &str, message: &M) -> Detail {
    let any = pb::pack(type_name, message);
    Detail::Proto(ebp_core::ProtoAny {
        type_url: any.type_url,
        value: any.value,
    })
}
