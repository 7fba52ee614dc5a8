// src/utils/crypto.rs
//! Ed25519 primitives for the credential core.
//!
//! Key generation, raw-byte signing, and raw-byte verification. All key
//! material crosses this boundary as base64-encoded raw 32-byte values —
//! no PEM or JWK wrapping.
//!
//! Signing operates on trusted caller input and fails loudly with a
//! [`CryptoError`]; verification operates on untrusted input and is total,
//! mapping every malformed-input case to `false`.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::OsRng;

use crate::error::CryptoError;
use crate::models::records::Keypair;

/// Generates a fresh Ed25519 keypair for an issuing organization.
///
/// Draws the 32-byte seed from the operating system CSPRNG; a fresh seed is
/// drawn on every call. Entropy-source failure aborts the process — key
/// provisioning must not continue on a degraded RNG.
///
/// # Returns
/// A [`Keypair`] with base64-encoded raw private and public key bytes.
/// Persisting it is the caller's responsibility.
pub fn generate_keypair() -> Keypair {
    let signing_key = SigningKey::generate(&mut OsRng);
    Keypair {
        private_key: base64::encode(signing_key.to_bytes()),
        public_key: base64::encode(signing_key.verifying_key().to_bytes()),
    }
}

/// Decodes a base64 key string into raw 32-byte key material.
fn decode_key(key: &str) -> Result<[u8; 32], CryptoError> {
    let bytes = base64::decode(key)?;
    bytes
        .try_into()
        .map_err(|rejected: Vec<u8>| CryptoError::InvalidKeyLength(rejected.len()))
}

/// Signs a message with a base64-encoded Ed25519 private key.
///
/// # Errors
/// [`CryptoError`] if the key is not valid base64 or does not decode to
/// exactly 32 bytes. A malformed key must never silently produce an
/// invalid signature.
pub fn sign_bytes(message: &[u8], private_key: &str) -> Result<[u8; 64], CryptoError> {
    let signing_key = SigningKey::from_bytes(&decode_key(private_key)?);
    Ok(signing_key.sign(message).to_bytes())
}

/// Verifies a raw Ed25519 signature against a base64-encoded public key.
///
/// Total over its inputs: undecodable keys, wrong-length signatures, and
/// failed curve checks all return `false` rather than an error.
pub fn verify_bytes(message: &[u8], signature: &[u8], public_key: &str) -> bool {
    let Ok(key_bytes) = decode_key(public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };
    let Ok(signature_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(&signature_bytes))
        .is_ok()
}
