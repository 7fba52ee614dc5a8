// src/models/mod.rs
//! Data structures: the credential document model and boundary records.

pub mod credential;
pub mod records;
