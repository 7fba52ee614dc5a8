// src/models/credential.rs
//! OpenBadges 3.0 credential data model.
//!
//! Defines the [`OpenBadgeCredential`] document and its component structures
//! following the [IMS OpenBadges 3.0 specification](https://www.imsglobal.org/spec/ob/v3p0/)
//! and the W3C Verifiable Credentials data model.
//!
//! # Serialization contract
//! Field declaration order in these structs *is* the wire key order: the
//! signer and verifier both serialize through one `serde_json` pass, so the
//! declaration order below is load-bearing for signature validity. Optional
//! fields use `skip_serializing_if` so an absent value is an absent key,
//! never `null` — lenient OpenBadges consumers require full omission.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// First `@context` entry: the W3C credentials context.
pub const CONTEXT_CREDENTIALS_V2: &str = "https://www.w3.org/ns/credentials/v2";

/// Second `@context` entry: the OpenBadges 3.0 context.
pub const CONTEXT_OPENBADGES_V3: &str =
    "https://purl.imsglobal.org/spec/ob/v3p0/context-3.0.3.json";

/// Cryptosuite identifier carried by every proof this crate produces.
pub const CRYPTOSUITE: &str = "eddsa-rdfc-2022";

/// Proof purpose carried by every proof this crate produces.
pub const PROOF_PURPOSE: &str = "assertionMethod";

/// Formats a timestamp the way every date in the credential document is
/// written: ISO-8601 UTC with millisecond precision and a `Z` suffix.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// An entity — the issuer, or a subject framed as a profile.
///
/// Always derived from an organization or user record at build time and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Dereferenceable identifier URI, e.g. `https://…/issuers/org1`.
    pub id: String,
    /// Fixed tag `"Profile"`.
    #[serde(rename = "type")]
    pub profile_type: String,
    /// Display name of the entity.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The criteria object of an [`Achievement`].
///
/// `narrative` may be the empty string but the field itself is always
/// present, per the OpenBadges document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub narrative: String,
}

/// The badge definition being claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Dereferenceable identifier URI, e.g. `https://…/achievements/b1`.
    pub id: String,
    /// Fixed tag `"Achievement"`.
    #[serde(rename = "type")]
    pub object_type: String,
    pub name: String,
    pub description: String,
    pub criteria: Criteria,
    #[serde(rename = "achievementType", skip_serializing_if = "Option::is_none")]
    pub achievement_type: Option<String>,
    /// Inline data URI or external URL of the badge image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Skill tags; omitted entirely when the badge defines none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// External framework alignments, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Vec<serde_json::Value>>,
}

/// Binds a recipient to an [`Achievement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementSubject {
    /// Fixed tag `"AchievementSubject"`.
    #[serde(rename = "type")]
    pub subject_type: String,
    /// `mailto:` URI of the recipient. Present only when the recipient's
    /// email is known; its absence makes the credential anonymous-subject,
    /// which is a valid state rather than an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub achievement: Achievement,
}

/// The cryptographic envelope attached to a signed credential.
///
/// The signature in `proof_value` is always computed over the credential
/// with the `proof` field absent — the proof never commits to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataIntegrityProof {
    /// Fixed tag `"DataIntegrityProof"`.
    #[serde(rename = "type")]
    pub proof_type: String,
    /// Fixed cryptosuite identifier, [`CRYPTOSUITE`].
    pub cryptosuite: String,
    /// When the signature was created (not when the badge was earned).
    pub created: String,
    /// URI identifying which public key verifies this proof.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,
    /// Fixed purpose, [`PROOF_PURPOSE`].
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: String,
    /// Base64 of the raw 64-byte Ed25519 signature.
    #[serde(rename = "proofValue")]
    pub proof_value: String,
}

/// The top-level OpenBadges 3.0 credential document.
///
/// This struct is the wire format: external verifiers and other
/// implementations consume exactly this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenBadgeCredential {
    /// Fixed, order-significant context pair
    /// ([`CONTEXT_CREDENTIALS_V2`], [`CONTEXT_OPENBADGES_V3`]).
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Caller-supplied URI unique to this credential instance.
    pub id: String,
    /// Fixed pair `["VerifiableCredential", "OpenBadgeCredential"]`.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,
    pub issuer: Profile,
    /// When the badge was *earned*, not when it was signed.
    #[serde(rename = "validFrom")]
    pub valid_from: String,
    #[serde(rename = "credentialSubject")]
    pub credential_subject: AchievementSubject,
    /// Denormalized copy of the achievement name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Present only after signing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<DataIntegrityProof>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_use_millisecond_z_format() {
        let earned = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(earned), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn absent_optionals_serialize_as_absent_keys() {
        let profile = Profile {
            id: "https://badges.example.org/issuers/org1".into(),
            profile_type: "Profile".into(),
            name: "Acme".into(),
            url: None,
            email: None,
            description: None,
            image: None,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(
            json,
            r#"{"id":"https://badges.example.org/issuers/org1","type":"Profile","name":"Acme"}"#
        );
    }
}
