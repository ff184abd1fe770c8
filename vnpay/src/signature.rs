//! HMAC-SHA-512 secure hash computation and verification.
//!
//! The secure hash is the only authenticity control in the protocol: a
//! callback whose hash does not verify must be rejected outright, never
//! partially trusted. Comparison is constant-time even though the hash
//! travels in a GET query string, and case-insensitive because gateway
//! deployments differ in hex casing.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::canonical::canonicalize;
use crate::params::{ParameterSet, fields};

type HmacSha512 = Hmac<Sha512>;

/// Computes the secure hash over a canonical string.
///
/// Returns the HMAC-SHA-512 digest of `canonical` keyed by `secret`,
/// encoded as lowercase hex. Deterministic for a given input pair. An empty
/// secret is a configuration error callers reject before reaching this
/// function; see [`crate::config::GatewayConfig::validate`].
#[must_use]
pub fn sign(canonical: &str, secret: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies the secure hash of an inbound parameter set.
///
/// Recomputes the hash over the set's canonical form with the hash fields
/// themselves excluded, then compares against `received_hash` in constant
/// time, ignoring hex case. Returns `true` iff the set is unaltered since
/// it was signed with the same secret.
#[must_use]
pub fn verify(params: &ParameterSet, received_hash: &str, secret: &str) -> bool {
    let canonical = canonicalize(params, &[fields::SECURE_HASH, fields::SECURE_HASH_TYPE]);
    let expected = sign(&canonical, secret);
    let received = received_hash.to_ascii_lowercase();
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}
