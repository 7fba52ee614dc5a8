// src/services/mod.rs
//! Credential operations: build, sign, verify, bake.

pub mod baker;
pub mod builder;
pub mod signer;
pub mod verifier;
