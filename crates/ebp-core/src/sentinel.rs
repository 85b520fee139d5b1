// SPDX-License-Identifier: MIT OR Apache-2.0
//! Long-lived sentinel errors.

use std::error::Error as StdError;
use std::fmt;

use crate::code::Code;

/// An immutable, code-bearing error value intended as a package-level
/// identity anchor.
///
/// Sentinels are declared once as statics and matched by equality, however
/// deeply they end up wrapped:
///
/// ```
/// use ebp_core::{Code, Error, Sentinel, is_sentinel};
///
/// static USER_NOT_FOUND: Sentinel = Sentinel::new("user not found", Code::NOT_FOUND);
///
/// let err = Error::wrap(Error::wrap(USER_NOT_FOUND.clone()).with("user_id", 42));
/// assert!(is_sentinel(&err, &USER_NOT_FOUND));
/// assert_eq!(err.code(), Code::NOT_FOUND);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel {
    message: &'static str,
    code: Code,
}

impl Sentinel {
    /// Creates a sentinel with a fixed message and code.
    pub const fn new(message: &'static str, code: Code) -> Self {
        Sentinel { message, code }
    }

    /// The sentinel's code.
    pub fn code(&self) -> &Code {
        &self.code
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl StdError for Sentinel {}

/// Reports whether `sentinel` appears anywhere in the error chain.
///
/// The walk traverses `source()` links, so sentinels are found even behind
/// foreign wrapper errors.
pub fn is_sentinel(err: &(dyn StdError + 'static), sentinel: &Sentinel) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = cur {
        if e.downcast_ref::<Sentinel>() == Some(sentinel) {
            return true;
        }
        cur = e.source();
    }
    false
}
