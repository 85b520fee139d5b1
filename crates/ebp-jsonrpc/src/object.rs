// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON-RPC error-object round-trip conversion.

use std::error::Error as StdError;

use ebp_core::{Detail, Error, LocalizedMessage, code_of, details_of};
use jsonrpsee_types::{ErrorObject, ErrorObjectOwned};
use serde::{Deserialize, Serialize};

use crate::code::{to_code, to_rpc_code};

/// The `data` member carried by backplane error objects: converted detail
/// objects plus the optional localized message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    /// Converted detail objects, each tagged with a `type` discriminator.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<serde_json::Value>,
    /// Locale-specific message, when locale resolution produced one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub localized_message: Option<LocalizedMessage>,
}

impl ErrorData {
    fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.localized_message.is_none()
    }
}

/// Converts an error to a JSON-RPC error object.
///
/// The chain's code is mapped through the integer table (custom codes
/// degrade to the server-range `unknown` code — JSON-RPC carries only the
/// mapped integer, not the code string); details ride in the `data`
/// member using the same tagged-JSON shape as the HTTP `errors` array.
pub fn to_error_object(err: &(dyn StdError + 'static)) -> ErrorObjectOwned {
    let code = to_rpc_code(&code_of(err));
    let mut data = ErrorData::default();

    for detail in details_of(err) {
        if let Detail::LocalizedMessage(lm) = &detail {
            data.localized_message.get_or_insert(lm.clone());
            continue;
        }
        if let Some(value) = detail.to_json() {
            data.errors.push(value);
        }
    }

    if data.is_empty() {
        ErrorObject::owned(code, err.to_string(), None::<ErrorData>)
    } else {
        ErrorObject::owned(code, err.to_string(), Some(data))
    }
}

/// Reconstructs an [`Error`] from a received JSON-RPC error object.
///
/// The integer code is mapped through the reverse table; recognized
/// entries of the `data` member are restored as details.
pub fn from_error_object(object: &ErrorObject<'_>) -> Error {
    let mut err = Error::new(object.message().to_string()).with_code(to_code(object.code()));

    let data = object
        .data()
        .and_then(|raw| serde_json::from_str::<ErrorData>(raw.get()).ok());
    if let Some(data) = data {
        let mut details: Vec<Detail> =
            data.errors.into_iter().map(Detail::from_json).collect();
        if let Some(lm) = data.localized_message {
            details.push(Detail::LocalizedMessage(lm));
        }
        if !details.is_empty() {
            err = err.with_details(details);
        }
    }
    err
}
