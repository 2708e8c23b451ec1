//! Shared utilities and common types for the Apiary backend.
//!
//! This crate provides functionality used by every other crate:
//! - Password hashing with Argon2id
//! - Bearer token issuance and verification
//! - Offset/limit pagination
//! - Field validators for request payloads

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
