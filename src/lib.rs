// src/lib.rs
//! # OpenBadges 3.0 Credential Core
//!
//! Library for constructing, signing, verifying, and baking OpenBadges 3.0
//! verifiable credentials.
//!
//! ## Architecture Overview
//! 1. **Models**: the credential document (wire format) and boundary records
//! 2. **Services**: build → sign → verify flow plus PNG/SVG baking
//! 3. **Utilities**: Ed25519 primitives, canonical serialization, PNG chunks
//!
//! Every operation is a synchronous pure computation over in-memory data —
//! no I/O, no shared state, no locks. The only external resource is OS
//! entropy during key generation. Concurrent calls are always safe.
//!
//! ## Typical flow
//! ```no_run
//! use chrono::Utc;
//! use openbadges::models::records::{BadgeRecord, OrganizationRecord, UserRecord};
//!
//! let keypair = openbadges::generate_keypair();
//! let badge = BadgeRecord {
//!     id: "b1".into(),
//!     name: "Python Master".into(),
//!     description: "Badge for mastering Python".into(),
//!     earning_criteria: "Complete course".into(),
//!     ..Default::default()
//! };
//! let user = UserRecord { email: Some("a@b.com".into()), ..Default::default() };
//! let organization = OrganizationRecord { id: "org1".into(), name: "Acme".into(), ..Default::default() };
//!
//! let unsigned = openbadges::build_credential("urn:uuid:xyz", &badge, &user, &organization, Utc::now())?;
//! let signed = openbadges::sign_credential(&unsigned, &keypair.private_key, "https://badges.example.org/issuers/org1#key-1")?;
//! assert!(openbadges::verify_credential(&signed, &keypair.public_key));
//! # Ok::<(), openbadges::Error>(())
//! ```

// Module declarations (organized by functional domain)
pub mod config; // issuer addressing configuration
pub mod error; // error taxonomy
pub mod models; // data structures
pub mod services; // credential operations
pub mod utils; // crypto, serialization, PNG helpers

pub use error::{BakeError, CryptoError, Error, Result};
pub use models::credential::OpenBadgeCredential;
pub use models::records::Keypair;
pub use services::baker::{bake_png, bake_svg, extract_png, extract_svg};
pub use services::builder::build_credential;
pub use services::signer::sign_credential;
pub use services::verifier::verify_credential;
pub use utils::crypto::generate_keypair;
