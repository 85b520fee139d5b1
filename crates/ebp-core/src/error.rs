// SPDX-License-Identifier: MIT OR Apache-2.0
//! The structured error chain.
//!
//! An [`Error`] is an immutable value: every `with_*` builder takes `&self`
//! and returns a fresh node that shares the same cause. Published nodes are
//! never mutated, so they can be stored in statics, cloned across tasks, and
//! read concurrently without synchronization.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::code::{Code, code_of};
use crate::details::Detail;
use crate::locale::Localize;
use crate::stack::Stack;

/// A single structured key/value pair attached to an error.
///
/// Fields form an ordered sequence; duplicate keys are preserved and
/// flattened outermost-first by [`fields_of`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Field name.
    pub key: String,
    /// Field value, serialized at attachment time.
    pub value: Value,
}

/// A structured error carrying a message, an optional cause, a
/// classification [`Code`], ordered fields, opaque detail objects, and an
/// optional captured stack.
///
/// # Builder usage
///
/// ```
/// use ebp_core::{Code, Error};
///
/// let err = Error::new("user not found")
///     .with_code(Code::NOT_FOUND)
///     .with("user_id", 42);
/// assert_eq!(err.code(), Code::NOT_FOUND);
/// assert_eq!(err.to_string(), "user not found");
/// ```
#[derive(Clone)]
pub struct Error {
    message: String,
    cause: Option<Arc<dyn StdError + Send + Sync + 'static>>,
    code: Code,
    fields: Vec<Field>,
    details: Vec<Detail>,
    stack: Option<Arc<Stack>>,
    localizer: Option<Arc<dyn Localize + Send + Sync>>,
}

impl Error {
    /// Creates a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Error {
            message: message.into(),
            cause: None,
            code: Code::UNSET,
            fields: Vec::new(),
            details: Vec::new(),
            stack: None,
            localizer: None,
        }
    }

    /// Wraps an existing error without adding a message of its own.
    ///
    /// The wrapper renders exactly like its cause and inherits the cause's
    /// code until [`with_code`](Error::with_code) overrides it.
    pub fn wrap<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut err = Error::new("");
        err.cause = Some(Arc::new(cause));
        err
    }

    /// Wraps an existing error with an additional message layer.
    ///
    /// ```
    /// use ebp_core::Error;
    ///
    /// let inner = Error::new("row missing");
    /// let outer = Error::wrap_msg(inner, format!("load user {id}", id = 7));
    /// assert_eq!(outer.to_string(), "load user 7: row missing");
    /// ```
    pub fn wrap_msg<E>(cause: E, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut err = Error::new(message);
        err.cause = Some(Arc::new(cause));
        err
    }

    /// Wraps a cause that implements [`Localize`], carrying its localization
    /// capability into the chain so transport interceptors can discover it.
    pub fn wrap_localizable<E>(cause: E) -> Self
    where
        E: StdError + Localize + Send + Sync + 'static,
    {
        let shared = Arc::new(cause);
        let localizer: Arc<dyn Localize + Send + Sync> = shared.clone();
        let mut err = Error::new("");
        err.cause = Some(shared);
        err.localizer = Some(localizer);
        err
    }

    /// Returns a copy with an additional structured field appended.
    ///
    /// The value is serialized immediately; values that fail to serialize
    /// are silently skipped.
    pub fn with(&self, key: impl Into<String>, value: impl Serialize) -> Self {
        let mut cp = self.clone();
        if let Ok(v) = serde_json::to_value(value) {
            cp.fields.push(Field {
                key: key.into(),
                value: v,
            });
        }
        cp
    }

    /// Returns a copy with the given code set, overriding any inherited one.
    pub fn with_code(&self, code: impl Into<Code>) -> Self {
        let mut cp = self.clone();
        cp.code = code.into();
        cp
    }

    /// Returns a copy with the given detail objects appended.
    pub fn with_details(&self, details: impl IntoIterator<Item = Detail>) -> Self {
        let mut cp = self.clone();
        cp.details.extend(details);
        cp
    }

    /// Shorthand for attaching a single-field [`Detail::BadRequest`].
    pub fn with_field_violation(
        &self,
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.with_details([crate::details::field_violation(field, description)])
    }

    /// Returns a copy with the current call stack captured.
    ///
    /// The stack is resolved once, here, and immutable afterwards. It is
    /// only ever used for local structured logging; transport adapters never
    /// put it on the wire.
    pub fn with_stack(&self) -> Self {
        let mut cp = self.clone();
        cp.stack = Some(Arc::new(Stack::capture()));
        cp
    }

    /// Returns a copy carrying a localization capability.
    pub fn with_localizer<L>(&self, localizer: L) -> Self
    where
        L: Localize + Send + Sync + 'static,
    {
        let mut cp = self.clone();
        cp.localizer = Some(Arc::new(localizer));
        cp
    }

    /// The message of this node only (not the rendered chain).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The code of this error: its own if set, otherwise the first code
    /// found in the cause chain, otherwise [`Code::UNSET`].
    pub fn code(&self) -> Code {
        if !self.code.is_unset() {
            return self.code.clone();
        }
        match self.cause() {
            Some(cause) => code_of(cause),
            None => Code::UNSET,
        }
    }

    /// The code set directly on this node, without chain inheritance.
    pub fn own_code(&self) -> &Code {
        &self.code
    }

    /// The fields attached to this node only. See [`fields_of`] for the
    /// flattened chain view.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The details attached to this node only. See [`details_of`] for the
    /// flattened chain view.
    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    /// The stack captured on this node, if any.
    pub fn stack(&self) -> Option<&Stack> {
        self.stack.as_deref()
    }

    /// The wrapped cause, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn StdError + 'static))
    }

    pub(crate) fn localizer(&self) -> Option<&(dyn Localize + Send + Sync)> {
        self.localizer.as_deref()
    }

    /// Reports whether the given sentinel appears anywhere in this chain.
    pub fn is(&self, sentinel: &crate::sentinel::Sentinel) -> bool {
        crate::sentinel::is_sentinel(self, sentinel)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.message.is_empty(), self.cause()) {
            (true, Some(cause)) => write!(f, "{cause}"),
            (_, None) => f.write_str(&self.message),
            (false, Some(cause)) => write!(f, "{}: {cause}", self.message),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Error");
        d.field("message", &self.message);
        if !self.code.is_unset() {
            d.field("code", &self.code);
        }
        if let Some(cause) = self.cause() {
            d.field("cause", &cause.to_string());
        }
        if !self.fields.is_empty() {
            d.field("fields", &self.fields);
        }
        if !self.details.is_empty() {
            d.field("details", &self.details);
        }
        if self.stack.is_some() {
            d.field("stack", &"<captured>");
        }
        d.finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause()
    }
}

/// Collects all structured fields from the error chain, outermost first.
///
/// Duplicate keys are preserved. The walk stops at the first node that is
/// not an [`Error`]; a foreign cause terminates flattening.
pub fn fields_of(err: &(dyn StdError + 'static)) -> Vec<Field> {
    let mut out = Vec::new();
    let mut cur = Some(err);
    while let Some(ex) = cur.and_then(|e| e.downcast_ref::<Error>()) {
        out.extend(ex.fields.iter().cloned());
        cur = ex.cause();
    }
    out
}

/// Collects all detail objects from the error chain, outermost first.
///
/// Same walk rules as [`fields_of`].
pub fn details_of(err: &(dyn StdError + 'static)) -> Vec<Detail> {
    let mut out = Vec::new();
    let mut cur = Some(err);
    while let Some(ex) = cur.and_then(|e| e.downcast_ref::<Error>()) {
        out.extend(ex.details.iter().cloned());
        cur = ex.cause();
    }
    out
}
