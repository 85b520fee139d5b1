// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structured-log rendering of error chains.

use std::error::Error as StdError;

use serde_json::{Map, Value, json};

use crate::code::code_of;
use crate::error::fields_of;
use crate::stack::stack_of;

/// Renders an error chain as a single structured JSON value suitable for a
/// `tracing` field or any structured sink.
///
/// The object carries the rendered message, the resolved code (when set),
/// the chain-flattened fields (outermost wins on duplicate keys), and the
/// caller frame of the outermost captured stack.
///
/// ```
/// use ebp_core::{Code, Error, telemetry::log_value};
///
/// let err = Error::new("user not found")
///     .with_code(Code::NOT_FOUND)
///     .with("user_id", 42);
/// let value = log_value(&err);
/// assert_eq!(value["msg"], "user not found");
/// assert_eq!(value["code"], "not_found");
/// assert_eq!(value["user_id"], 42);
/// ```
pub fn log_value(err: &(dyn StdError + 'static)) -> Value {
    let mut obj = Map::new();
    obj.insert("msg".into(), Value::String(err.to_string()));

    let code = code_of(err);
    if !code.is_unset() {
        obj.insert("code".into(), Value::String(code.as_str().to_string()));
    }

    for field in fields_of(err) {
        // Outermost-first flattening means the first occurrence wins.
        obj.entry(field.key).or_insert(field.value);
    }

    if let Some(frame) = stack_of(err).and_then(|s| s.frames().first()) {
        obj.insert(
            "caller".into(),
            json!({
                "function": frame.function,
                "file": frame.file,
                "line": frame.line,
            }),
        );
    }

    Value::Object(obj)
}

/// Emits the error chain as a `tracing` error event.
pub fn report(err: &(dyn StdError + 'static)) {
    tracing::error!(error = %log_value(err), "error reported");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Code;
    use crate::error::Error;

    #[test]
    fn renders_message_and_code() {
        let err = Error::new("boom").with_code(Code::INTERNAL);
        let v = log_value(&err);
        assert_eq!(v["msg"], "boom");
        assert_eq!(v["code"], "internal");
    }

    #[test]
    fn omits_unset_code() {
        let v = log_value(&Error::new("plain"));
        assert!(v.get("code").is_none());
    }

    #[test]
    fn outermost_field_wins_on_duplicates() {
        let inner = Error::new("inner").with("k", "inner_v");
        let outer = Error::wrap(inner).with("k", "outer_v");
        let v = log_value(&outer);
        assert_eq!(v["k"], "outer_v");
    }

    #[test]
    fn caller_comes_from_the_captured_stack() {
        let err = Error::new("fail").with_stack();
        let v = log_value(&err);
        let caller = v.get("caller").expect("caller");
        assert!(caller.get("function").is_some());
        assert!(caller.get("line").is_some());
    }

    #[test]
    fn renders_the_full_chain_message() {
        let err = Error::wrap_msg(Error::new("inner"), "outer");
        assert_eq!(log_value(&err)["msg"], "outer: inner");
    }

    #[test]
    fn works_on_foreign_errors() {
        let io = std::io::Error::other("disk full");
        let v = log_value(&io);
        assert_eq!(v["msg"], "disk full");
        assert!(v.get("code").is_none());
    }
}
