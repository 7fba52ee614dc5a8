// src/config.rs
//! Issuer addressing configuration.
//!
//! Credential documents embed dereferenceable `id` URIs for the issuer
//! profile and the achievement definition. Both are derived from a single
//! base URL so that any two processes issuing against the same badge and
//! organization produce identical identifiers.
//!
//! The base URL is read once per process from the `OPENBADGES_BASE_URL`
//! environment variable, falling back to a compiled default.

use once_cell::sync::Lazy;

/// Default base URL used when `OPENBADGES_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://badges.example.org";

/// Base URL for issuer and achievement identifiers, resolved once.
static BASE_URL: Lazy<String> = Lazy::new(|| {
    std::env::var("OPENBADGES_BASE_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
});

/// Returns the stable issuer-profile URI for an organization.
pub fn issuer_id(organization_id: &str) -> String {
    format!("{}/issuers/{}", &*BASE_URL, organization_id)
}

/// Returns the stable achievement-definition URI for a badge.
pub fn achievement_id(badge_id: &str) -> String {
    format!("{}/achievements/{}", &*BASE_URL, badge_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_across_calls() {
        assert_eq!(issuer_id("org1"), issuer_id("org1"));
        assert!(issuer_id("org1").ends_with("/issuers/org1"));
        assert!(achievement_id("b1").ends_with("/achievements/b1"));
    }
}
