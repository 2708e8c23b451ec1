//! Persistence layer for the apiary backend.
//!
//! This crate contains:
//! - Database connection management
//! - The SQL schema migration
//! - Entity definitions (database row mappings)
//! - The generic repository trait and one repository per entity

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
