// SPDX-License-Identifier: MIT OR Apache-2.0
//! Locale negotiation and the localization capability.

use std::error::Error as StdError;

use crate::details::{Detail, LocalizedMessage};
use crate::error::Error;

/// Parses an `Accept-Language` header value and returns the
/// highest-priority language tag as a normalized BCP 47 string.
///
/// Selection follows quality-value weighting: the strictly highest `q`
/// wins, with the leftmost entry taking precedence on ties. Returns an
/// empty string for empty or malformed input; never panics.
///
/// ```
/// use ebp_core::parse_accept_language;
///
/// assert_eq!(parse_accept_language("ja,en-US;q=0.9,en;q=0.8"), "ja");
/// assert_eq!(parse_accept_language("en;q=0.8,ja"), "ja");
/// assert_eq!(parse_accept_language(""), "");
/// assert_eq!(parse_accept_language("not a valid header!!!"), "");
/// ```
pub fn parse_accept_language(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    let mut best: Option<(String, f64)> = None;
    for item in value.split(',') {
        let Some((tag, quality)) = parse_item(item) else {
            // One malformed entry poisons the whole header.
            return String::new();
        };
        let better = best.as_ref().is_none_or(|(_, q)| quality > *q);
        if better {
            best = Some((tag, quality));
        }
    }

    match best {
        // The wildcard is valid on the wire but names no concrete tag.
        Some((tag, _)) if tag != "*" => tag,
        _ => String::new(),
    }
}

/// Parses one `tag[;q=value]` entry, returning the normalized tag and its
/// quality. `None` means the entry is malformed.
fn parse_item(item: &str) -> Option<(String, f64)> {
    let mut parts = item.split(';');
    let tag = normalize_tag(parts.next()?.trim())?;

    let mut quality = 1.0;
    for param in parts {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("q") {
            return None;
        }
        quality = parse_quality(value.trim())?;
    }
    Some((tag, quality))
}

/// Validates a quality value: `0`–`1` with at most three decimals.
fn parse_quality(s: &str) -> Option<f64> {
    if s.is_empty() || !s.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if let Some((_, frac)) = s.split_once('.') {
        if frac.len() > 3 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    let q: f64 = s.parse().ok()?;
    (0.0..=1.0).contains(&q).then_some(q)
}

/// Validates a language tag against the BCP 47 primary syntax and
/// normalizes subtag casing (`en-us` → `en-US`, `zh-hant` → `zh-Hant`).
fn normalize_tag(tag: &str) -> Option<String> {
    if tag == "*" {
        return Some(tag.to_string());
    }
    let mut out = String::with_capacity(tag.len());
    for (i, subtag) in tag.split('-').enumerate() {
        if subtag.is_empty() || subtag.len() > 8 || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return None;
        }
        if i == 0 {
            // Primary subtag must be alphabetic.
            if !subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            out.push_str(&subtag.to_ascii_lowercase());
            continue;
        }
        out.push('-');
        let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
        match subtag.len() {
            2 if alphabetic => out.push_str(&subtag.to_ascii_uppercase()),
            4 if alphabetic => {
                let mut chars = subtag.chars();
                // Title-case script subtags.
                if let Some(first) = chars.next() {
                    out.push(first.to_ascii_uppercase());
                }
                out.push_str(&chars.as_str().to_ascii_lowercase());
            }
            _ => out.push_str(&subtag.to_ascii_lowercase()),
        }
    }
    Some(out)
}

/// The localization capability: produce a message for a requested locale.
///
/// Error types opt in by implementing this trait and entering the chain via
/// [`Error::wrap_localizable`]; closures work directly:
///
/// ```
/// use ebp_core::{Error, localize_of};
///
/// let err = Error::new("user not found").with_localizer(|locale: &str| {
///     (locale == "ja").then(|| "ユーザーが見つかりません".to_string())
/// });
/// assert_eq!(localize_of(&err, "ja").as_deref(), Some("ユーザーが見つかりません"));
/// assert_eq!(localize_of(&err, "fr"), None);
/// ```
pub trait Localize {
    /// Returns the message for `locale`, or `None` when no translation is
    /// available.
    fn localize(&self, locale: &str) -> Option<String>;
}

impl<F> Localize for F
where
    F: Fn(&str) -> Option<String>,
{
    fn localize(&self, locale: &str) -> Option<String> {
        self(locale)
    }
}

/// Queries the localization capability anywhere in the error chain.
///
/// Returns the first non-empty localized message produced by a node,
/// walking outermost-in through `source()` links.
pub fn localize_of(err: &(dyn StdError + 'static), locale: &str) -> Option<String> {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = cur {
        if let Some(localizer) = e.downcast_ref::<Error>().and_then(Error::localizer) {
            match localizer.localize(locale) {
                Some(message) if !message.is_empty() => return Some(message),
                _ => {}
            }
        }
        cur = e.source();
    }
    None
}

/// Applies locale resolution to an error: when the chain can produce a
/// message for `locale`, returns a copy with a [`Detail::LocalizedMessage`]
/// appended so the normal detail pipeline serializes it.
///
/// Returns `None` when `locale` is empty or the chain has nothing to say,
/// leaving the caller's error untouched.
pub fn localized(err: &Error, locale: &str) -> Option<Error> {
    if locale.is_empty() {
        return None;
    }
    let message = localize_of(err, locale)?;
    Some(err.with_details([Detail::LocalizedMessage(LocalizedMessage {
        locale: locale.to_string(),
        message,
    })]))
}
