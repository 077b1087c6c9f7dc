//! BLAKE3 fingerprints used as justification cache keys.
//!
//! A key must identify exactly the (description, candidate text) pair that was sent to the
//! summarizer. Both fields are length-prefixed before hashing, so no choice of contents can make
//! two different pairs feed the same byte stream into the hasher.

use blake3::Hasher;

/// 32-byte BLAKE3 digest.
pub type Fingerprint = [u8; 32];

const PAIR_DOMAIN: &[u8] = b"candidate-match/justification/v1";

/// Fingerprints a (description, candidate text) pair.
///
/// Returns the full 256-bit digest. Keys must never be truncated: a colliding key serves
/// another candidate's justification.
#[inline]
pub fn hash_pair(description: &str, candidate_text: &str) -> Fingerprint {
    let mut hasher = Hasher::new();
    hasher.update(PAIR_DOMAIN);
    update_framed(&mut hasher, description.as_bytes());
    update_framed(&mut hasher, candidate_text.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Lowercase hex rendering of a fingerprint, for logs.
#[inline]
pub fn fingerprint_hex(fingerprint: &Fingerprint) -> String {
    blake3::Hash::from(*fingerprint).to_hex().to_string()
}

#[inline]
fn update_framed(hasher: &mut Hasher, field: &[u8]) {
    hasher.update(&(field.len() as u64).to_le_bytes());
    hasher.update(field);
}
