// src/error.rs
//! Error taxonomy for the credential core.
//!
//! Two concern areas get their own error enums:
//! - [`CryptoError`]: key material and signing failures. Raised only on the
//!   signing path, which operates on trusted, caller-controlled input.
//! - [`BakeError`]: malformed image containers and data URLs.
//!
//! Verification deliberately has no error type at all — an untrusted
//! credential that fails any decode or crypto step verifies as `false`,
//! it does not produce an `Err`.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error for credential construction and baking flows.
#[derive(Debug, Error)]
pub enum Error {
    /// Key material or signing failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Image container failure while baking or extracting.
    #[error(transparent)]
    Bake(#[from] BakeError),

    /// A badge record carried an `alignments` string that is not valid JSON.
    ///
    /// This is a hard error: alignment data must never be silently dropped
    /// from an issued credential.
    #[error("invalid alignment JSON: {0}")]
    Alignment(#[source] serde_json::Error),

    /// Credential (de)serialization failure.
    #[error("credential serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures in key handling and signature creation.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A key decoded to something other than 32 raw Ed25519 bytes.
    #[error("invalid key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// A key string was not valid base64.
    #[error("key is not valid base64: {0}")]
    KeyEncoding(#[from] base64::DecodeError),

    /// The credential could not be serialized into signable bytes.
    #[error("could not serialize credential for signing: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Failures while embedding a credential into an image container.
#[derive(Debug, Error)]
pub enum BakeError {
    /// The image input was not a `data:*;base64,` URL.
    #[error("input is not a base64 image data URL")]
    DataUrl,

    /// A base64 payload — the data-URL image or an embedded credential
    /// attribute — could not be decoded.
    #[error("embedded base64 payload could not be decoded: {0}")]
    ImageEncoding(#[from] base64::DecodeError),

    /// The PNG byte stream could not be parsed into chunks.
    #[error("malformed PNG: {0}")]
    Png(String),

    /// The SVG markup contains no `<svg>` opening tag to attach to.
    #[error("no <svg> root element found in markup")]
    SvgRootNotFound,

    /// The credential could not be serialized for embedding.
    #[error("could not serialize credential for baking: {0}")]
    Serialization(#[from] serde_json::Error),
}
