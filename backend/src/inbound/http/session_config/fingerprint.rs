//! Truncated fingerprints of the session signing key.
//!
//! Operators confirm which key a deployment picked up by comparing the
//! fingerprint logged at startup against their rotation records. The key
//! material itself never reaches the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Hash the key's signing material down to a short hex fingerprint.
///
/// The first 8 bytes of the SHA-256 digest render as 16 lowercase hex
/// characters, enough to tell keys apart in logs without exposing anything
/// an attacker could use.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
