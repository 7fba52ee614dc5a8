// src/services/verifier.rs
//! Credential verification.
//!
//! The inverse of the signer: recomputes the canonical bytes of the
//! proof-stripped document and checks the attached Ed25519 signature
//! against the claimed issuer's public key.
//!
//! Verification is a total function to `bool`. Its callers check
//! externally supplied artifacts, where a bad signature, a missing proof,
//! or garbage base64 is a routine negative outcome — not a reason to make
//! every call site handle errors. Contrast with the signer, which operates
//! on trusted data and fails loudly.

use log::debug;

use crate::models::credential::OpenBadgeCredential;
use crate::utils::{crypto, serialization};

/// Checks a signed credential against an issuer public key.
///
/// Returns `false` when the proof is absent, when any base64 field or key
/// fails to decode, or when the Ed25519 check fails. Never returns an
/// error and never mutates the credential.
pub fn verify_credential(credential: &OpenBadgeCredential, public_key: &str) -> bool {
    let Some(proof) = &credential.proof else {
        debug!("credential {} has no proof", credential.id);
        return false;
    };
    let Ok(signature) = base64::decode(&proof.proof_value) else {
        return false;
    };

    let mut unsigned = credential.clone();
    unsigned.proof = None;
    let Ok(payload) = serialization::canonical_json(&unsigned) else {
        return false;
    };

    crypto::verify_bytes(&payload, &signature, public_key)
}
