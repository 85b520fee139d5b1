// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end scenarios across all three transport adapters.
//!
//! Exercises the contracts the backplane guarantees uniformly: code
//! mapping, message preservation, detail conversion, sentinel identity,
//! and idempotent re-conversion of recovered errors.

use ebp_core::{Code, Detail, Error, Sentinel, field_violation, is_sentinel};

// ── Scenario 1: HTTP problem details ─────────────────────────────────────

#[test]
fn not_found_error_becomes_a_problem_detail() {
    let err = Error::new("user not found").with_code(Code::NOT_FOUND);
    let p = ebp_http::to_problem_detail(&err);
    assert_eq!(p.type_uri, "about:blank");
    assert_eq!(p.title, "Not Found");
    assert_eq!(p.status, 404);
    assert_eq!(p.detail, "user not found");
    assert_eq!(p.code, "not_found");
}

#[test]
fn problem_detail_serializes_to_the_documented_shape() {
    let err = Error::new("user not found").with_code(Code::NOT_FOUND);
    let body = serde_json::to_value(ebp_http::to_problem_detail(&err)).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "type": "about:blank",
            "title": "Not Found",
            "status": 404,
            "detail": "user not found",
            "code": "not_found",
        })
    );
}

// ── Scenario 2: gRPC status with a BadRequest detail ─────────────────────

#[test]
fn invalid_argument_with_field_violation_over_grpc() {
    let err = Error::new("invalid email")
        .with_code(Code::INVALID_ARGUMENT)
        .with_details([field_violation("email", "invalid")]);

    let status = ebp_grpc::to_status(&err);
    assert_eq!(status.code(), tonic::Code::InvalidArgument);

    let back = ebp_grpc::from_status(&status).expect("error");
    match back.details() {
        [Detail::BadRequest(br)] => {
            assert_eq!(br.violations.len(), 1);
            assert_eq!(br.violations[0].field, "email");
            assert_eq!(br.violations[0].description, "invalid");
        }
        other => panic!("expected exactly one BadRequest detail, got {other:?}"),
    }
}

// ── Scenario 3: sentinel identity through deep wrapping ──────────────────

static USER_NOT_FOUND: Sentinel = Sentinel::new("user not found", Code::NOT_FOUND);

#[test]
fn sentinel_survives_three_wraps() {
    let err = Error::wrap_msg(
        Error::wrap(Error::wrap(USER_NOT_FOUND.clone()).with("user_id", 42)),
        "handling request",
    );
    assert!(is_sentinel(&err, &USER_NOT_FOUND));
    assert_eq!(err.code(), Code::NOT_FOUND);
}

// ── Code inheritance ─────────────────────────────────────────────────────

#[test]
fn wrapping_inherits_the_innermost_code() {
    let err = Error::wrap(Error::new("inner").with_code(Code::ABORTED));
    assert_eq!(err.code(), Code::ABORTED);
}

#[test]
fn outer_code_overrides() {
    let err = Error::wrap(Error::new("inner").with_code(Code::ABORTED))
        .with_code(Code::UNAVAILABLE);
    assert_eq!(err.code(), Code::UNAVAILABLE);
}

// ── Round-trip fidelity for well-known codes ─────────────────────────────

#[test]
fn http_round_trip_preserves_code_and_message() {
    for code in Code::WELL_KNOWN {
        let err = Error::new("message under test").with_code(code.clone());
        let back = ebp_http::from_problem_detail(&ebp_http::to_problem_detail(&err));
        assert_eq!(&back.code(), code, "http round trip for {code}");
        assert_eq!(back.to_string(), "message under test");
    }
}

#[test]
fn grpc_round_trip_preserves_code_and_message() {
    for code in Code::WELL_KNOWN {
        let err = Error::new("message under test").with_code(code.clone());
        let back = ebp_grpc::from_status(&ebp_grpc::to_status(&err)).expect("error");
        assert_eq!(&back.code(), code, "grpc round trip for {code}");
        assert_eq!(back.to_string(), "message under test");
    }
}

#[test]
fn jsonrpc_round_trip_preserves_code_and_message() {
    for code in Code::WELL_KNOWN {
        let err = Error::new("message under test").with_code(code.clone());
        let back = ebp_jsonrpc::from_error_object(&ebp_jsonrpc::to_error_object(&err));
        assert_eq!(&back.code(), code, "jsonrpc round trip for {code}");
        assert_eq!(back.to_string(), "message under test");
    }
}

// ── Custom-code asymmetry ────────────────────────────────────────────────

#[test]
fn http_preserves_custom_codes_verbatim() {
    let err = Error::new("pay up").with_code(Code::from_static("billing_overdue"));
    let back = ebp_http::from_problem_detail(&ebp_http::to_problem_detail(&err));
    assert_eq!(back.code(), Code::from_static("billing_overdue"));
}

#[test]
fn status_enum_transports_degrade_custom_codes() {
    let err = Error::new("pay up").with_code(Code::from_static("billing_overdue"));
    let grpc = ebp_grpc::from_status(&ebp_grpc::to_status(&err)).expect("error");
    assert_eq!(grpc.code(), Code::UNKNOWN);
    let rpc = ebp_jsonrpc::from_error_object(&ebp_jsonrpc::to_error_object(&err));
    assert_eq!(rpc.code(), Code::UNKNOWN);
}

// ── Idempotence ──────────────────────────────────────────────────────────

#[test]
fn recovered_errors_convert_identically_on_http() {
    let err = Error::new("bad input")
        .with_code(Code::INVALID_ARGUMENT)
        .with_details([field_violation("email", "required")]);
    let first = ebp_http::to_problem_detail(&err);
    let second = ebp_http::to_problem_detail(&ebp_http::from_problem_detail(&first));
    assert_eq!(first, second);
}

#[test]
fn recovered_errors_convert_identically_on_grpc() {
    let err = Error::new("bad input")
        .with_code(Code::INVALID_ARGUMENT)
        .with_details([field_violation("email", "required")]);
    let first = ebp_grpc::to_status(&err);
    let recovered = ebp_grpc::from_status(&first).expect("error");
    let second = ebp_grpc::to_status(&recovered);
    assert_eq!(first.code(), second.code());
    assert_eq!(first.message(), second.message());
    assert_eq!(first.details(), second.details());
}

#[test]
fn recovered_errors_convert_identically_on_jsonrpc() {
    let err = Error::new("bad input")
        .with_code(Code::INVALID_ARGUMENT)
        .with_details([field_violation("email", "required")]);
    let first = ebp_jsonrpc::to_error_object(&err);
    let second = ebp_jsonrpc::to_error_object(&ebp_jsonrpc::from_error_object(&first));
    assert_eq!(first.code(), second.code());
    assert_eq!(first.message(), second.message());
    assert_eq!(
        first.data().map(|d| d.get().to_string()),
        second.data().map(|d| d.get().to_string())
    );
}

// ── Detail fan-out across transports ─────────────────────────────────────

#[test]
fn one_error_serializes_consistently_everywhere() {
    let err = Error::new("conflict on save")
        .with_code(Code::ALREADY_EXISTS)
        .with_details([
            field_violation("name", "already taken"),
            ebp_core::resource_info("user", "users/7", "auth", "exists"),
        ]);

    let p = ebp_http::to_problem_detail(&err);
    assert_eq!(p.status, 409);
    assert_eq!(p.errors.len(), 2);

    let grpc_back = ebp_grpc::from_status(&ebp_grpc::to_status(&err)).expect("error");
    assert_eq!(grpc_back.details().len(), 2);

    let rpc_back = ebp_jsonrpc::from_error_object(&ebp_jsonrpc::to_error_object(&err));
    assert_eq!(rpc_back.details().len(), 2);
}
