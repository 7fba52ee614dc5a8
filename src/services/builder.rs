// src/services/builder.rs
//! Credential construction.
//!
//! Maps boundary records (badge, user, organization) into an unsigned
//! [`OpenBadgeCredential`]. Construction is deterministic: the same inputs
//! always yield the same document, and issuer/achievement identifiers are
//! derived from the shared base URL so downstream verifiers can dereference
//! them regardless of which process built the credential.

use chrono::{DateTime, Utc};

use crate::config;
use crate::error::Error;
use crate::models::credential::{
    format_timestamp, Achievement, AchievementSubject, Criteria, OpenBadgeCredential, Profile,
    CONTEXT_CREDENTIALS_V2, CONTEXT_OPENBADGES_V3,
};
use crate::models::records::{BadgeRecord, OrganizationRecord, UserRecord};

/// Clones an optional source field, treating empty strings as absent.
///
/// Keeps the document spec-conformant: an optional field is either a real
/// value or a fully absent key, never `null` or `""`.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
}

/// Splits a comma-separated skills string into trimmed tags.
fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Parses the JSON-encoded alignments string from a badge record.
///
/// # Errors
/// [`Error::Alignment`] when the string is present but not valid JSON —
/// alignment data is never silently dropped from an issued credential.
fn parse_alignments(alignments: &Option<String>) -> Result<Option<Vec<serde_json::Value>>, Error> {
    let Some(raw) = alignments.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let parsed: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(Error::Alignment)?;
    Ok(if parsed.is_empty() { None } else { Some(parsed) })
}

/// Builds an unsigned credential from a badge, recipient, and issuer.
///
/// # Arguments
/// * `credential_id` - Caller-supplied URI unique to this issuance
/// * `badge` - The badge definition being claimed
/// * `user` - The recipient; a missing email yields an anonymous subject
/// * `organization` - The issuing organization
/// * `earned_at` - When the badge was earned (becomes `validFrom`)
///
/// # Errors
/// [`Error::Alignment`] when the badge's alignments string is not valid
/// JSON. No other failure mode: the function is pure and touches no
/// external resource.
pub fn build_credential(
    credential_id: &str,
    badge: &BadgeRecord,
    user: &UserRecord,
    organization: &OrganizationRecord,
    earned_at: DateTime<Utc>,
) -> Result<OpenBadgeCredential, Error> {
    let issuer = Profile {
        id: config::issuer_id(&organization.id),
        profile_type: "Profile".into(),
        name: organization.name.clone(),
        url: non_empty(&organization.url),
        email: non_empty(&organization.email),
        description: non_empty(&organization.description),
        image: non_empty(&organization.image),
    };

    let tags = non_empty(&badge.skills)
        .map(|skills| split_skills(&skills))
        .filter(|tags| !tags.is_empty());

    let achievement = Achievement {
        id: config::achievement_id(&badge.id),
        object_type: "Achievement".into(),
        name: badge.name.clone(),
        description: badge.description.clone(),
        criteria: Criteria {
            narrative: badge.earning_criteria.clone(),
        },
        achievement_type: non_empty(&badge.achievement_type),
        image: non_empty(&badge.image_data),
        tags,
        alignment: parse_alignments(&badge.alignments)?,
    };

    let credential_subject = AchievementSubject {
        subject_type: "AchievementSubject".into(),
        id: non_empty(&user.email).map(|email| format!("mailto:{}", email)),
        achievement,
    };

    Ok(OpenBadgeCredential {
        context: vec![
            CONTEXT_CREDENTIALS_V2.to_string(),
            CONTEXT_OPENBADGES_V3.to_string(),
        ],
        id: credential_id.to_string(),
        credential_type: vec![
            "VerifiableCredential".into(),
            "OpenBadgeCredential".into(),
        ],
        issuer,
        valid_from: format_timestamp(earned_at),
        credential_subject,
        name: Some(badge.name.clone()),
        proof: None,
    })
}
