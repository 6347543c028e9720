//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Minimum entropy accepted for generated tokens (128 bits)
pub const MIN_TOKEN_BYTES: usize = 16;

const FINGERPRINT_BYTES: usize = 6;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque URL-safe token carrying `len` random bytes.
///
/// `len` is raised to [`MIN_TOKEN_BYTES`] if smaller. The output is
/// base64url without padding, so it can be dropped into a link as-is.
pub fn random_token(len: usize) -> String {
    let bytes = random_bytes(len.max(MIN_TOKEN_BYTES));
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short non-reversible tag for a secret, safe to put in logs
pub fn fingerprint(secret: &[u8]) -> String {
    let digest = sha256(secret);
    general_purpose::URL_SAFE_NO_PAD.encode(&digest[..FINGERPRINT_BYTES])
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
