// src/utils/mod.rs
//! Shared primitives: Ed25519 crypto, canonical serialization, PNG chunks.

pub mod crypto;
pub mod png;
pub mod serialization;
