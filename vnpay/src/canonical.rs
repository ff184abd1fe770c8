//! Canonical serialization of a parameter set for signing.
//!
//! The secure hash is computed over a deterministic byte string, not over
//! the URL as transmitted: fields sorted ascending by key, joined as
//! `key=value` pairs with `&`, values taken verbatim. Percent-encoding is
//! a transport concern and never enters the canonical form.

use crate::params::ParameterSet;

/// Serializes `params` into the exact byte string the processor signs.
///
/// Keys listed in `exclude` are omitted; verification uses this to drop the
/// transmitted hash from its own signing input. Sorting is plain byte order,
/// not locale-aware. Fields with empty values are still emitted, so a field
/// that is present but blank hashes differently from an absent one.
///
/// Canonicalizing an empty set yields the empty string.
#[must_use]
pub fn canonicalize(params: &ParameterSet, exclude: &[&str]) -> String {
    let mut out = String::new();
    for (key, value) in params.iter() {
        if exclude.contains(&key) {
            continue;
        }
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}
