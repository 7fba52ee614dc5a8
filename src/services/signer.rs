// src/services/signer.rs
//! Credential signing.
//!
//! Attaches an EdDSA data-integrity proof (`eddsa-rdfc-2022`) to a
//! credential. The signature is computed over the canonical serialization
//! of the document with `proof` absent, so re-signing an already-signed
//! credential is idempotent: the old proof is stripped first and never
//! feeds into the new signature.

use chrono::Utc;
use log::debug;

use crate::error::CryptoError;
use crate::models::credential::{
    format_timestamp, DataIntegrityProof, OpenBadgeCredential, CRYPTOSUITE, PROOF_PURPOSE,
};
use crate::utils::{crypto, serialization};

/// Signs a credential with an issuer's Ed25519 private key.
///
/// The input is never mutated; the returned document is the input with a
/// fresh `proof` attached (replacing any existing one).
///
/// # Arguments
/// * `credential` - The document to sign; a prior proof is ignored
/// * `private_key` - Base64 of the raw 32-byte Ed25519 private key
/// * `verification_method` - URI telling verifiers which public key to use,
///   typically `<issuer-id>#key-1`
///
/// # Errors
/// [`CryptoError`] when the private key is not valid base64 or is not
/// exactly 32 bytes. Signing operates on trusted data and fails loudly: a
/// silently invalid signature would corrupt a credential users rely on.
pub fn sign_credential(
    credential: &OpenBadgeCredential,
    private_key: &str,
    verification_method: &str,
) -> Result<OpenBadgeCredential, CryptoError> {
    let mut unsigned = credential.clone();
    unsigned.proof = None;

    let payload = serialization::canonical_json(&unsigned)?;
    let signature = crypto::sign_bytes(&payload, private_key)?;

    let mut signed = unsigned;
    signed.proof = Some(DataIntegrityProof {
        proof_type: "DataIntegrityProof".into(),
        cryptosuite: CRYPTOSUITE.into(),
        created: format_timestamp(Utc::now()),
        verification_method: verification_method.to_string(),
        proof_purpose: PROOF_PURPOSE.into(),
        proof_value: base64::encode(signature),
    });
    debug!("signed credential {}", signed.id);
    Ok(signed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::{BadgeRecord, OrganizationRecord, UserRecord};
    use crate::services::builder::build_credential;
    use crate::utils::crypto::generate_keypair;
    use chrono::TimeZone;

    fn unsigned_credential() -> OpenBadgeCredential {
        build_credential(
            "urn:uuid:sign-test",
            &BadgeRecord {
                id: "b1".into(),
                name: "Signer Test".into(),
                description: "desc".into(),
                earning_criteria: "criteria".into(),
                ..Default::default()
            },
            &UserRecord {
                email: Some("a@b.com".into()),
                ..Default::default()
            },
            &OrganizationRecord {
                id: "org1".into(),
                name: "Acme".into(),
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn signing_attaches_a_complete_proof() {
        let keypair = generate_keypair();
        let signed = sign_credential(
            &unsigned_credential(),
            &keypair.private_key,
            "https://badges.example.org/issuers/org1#key-1",
        )
        .unwrap();

        let proof = signed.proof.expect("proof attached");
        assert_eq!(proof.proof_type, "DataIntegrityProof");
        assert_eq!(proof.cryptosuite, "eddsa-rdfc-2022");
        assert_eq!(proof.proof_purpose, "assertionMethod");
        assert_eq!(
            proof.verification_method,
            "https://badges.example.org/issuers/org1#key-1"
        );
        assert_eq!(base64::decode(&proof.proof_value).unwrap().len(), 64);
    }

    #[test]
    fn signing_does_not_mutate_its_input() {
        let keypair = generate_keypair();
        let credential = unsigned_credential();
        let before = credential.clone();
        let _ = sign_credential(&credential, &keypair.private_key, "vm").unwrap();
        assert_eq!(credential, before);
    }

    #[test]
    fn resigning_ignores_the_old_proof() {
        // Ed25519 is deterministic, so two proofs over the same unsigned
        // bytes carry identical signatures even though `created` differs.
        let keypair = generate_keypair();
        let credential = unsigned_credential();
        let once = sign_credential(&credential, &keypair.private_key, "vm").unwrap();
        let twice = sign_credential(&once, &keypair.private_key, "vm").unwrap();
        assert_eq!(
            once.proof.unwrap().proof_value,
            twice.proof.unwrap().proof_value
        );
    }

    #[test]
    fn malformed_private_key_fails_loudly() {
        let result = sign_credential(&unsigned_credential(), "%%%", "vm");
        assert!(matches!(result, Err(CryptoError::KeyEncoding(_))));

        let short = base64::encode([7u8; 31]);
        let result = sign_credential(&unsigned_credential(), &short, "vm");
        assert!(matches!(result, Err(CryptoError::InvalidKeyLength(31))));
    }
}
