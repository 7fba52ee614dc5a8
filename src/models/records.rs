// src/models/records.rs
//! Boundary input records.
//!
//! Plain data handed in by the (excluded) persistence layer. These carry no
//! behavior; the credential builder maps them into the document model.
//! Field names mirror the stored wire shape (`earningCriteria`, `imageData`),
//! hence the camelCase rename.

use serde::{Deserialize, Serialize};

/// A badge definition as stored by the issuing platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-text narrative describing how the badge is earned.
    pub earning_criteria: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_type: Option<String>,
    /// Badge artwork as a data URI or external URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Comma-separated skill list, e.g. `"rust, cryptography"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    /// JSON-encoded array of framework alignment objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignments: Option<String>,
}

/// A badge recipient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Missing email yields an anonymous-subject credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The issuing organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub id: String,
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

/// An issuer keypair: base64 of the raw 32-byte Ed25519 private and public
/// key values. Generated once per organization and persisted by the caller.
/// The private key must never appear inside a credential or a log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keypair {
    pub private_key: String,
    pub public_key: String,
}
