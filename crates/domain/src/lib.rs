//! Domain layer for the Apiary backend.
//!
//! This crate contains:
//! - Domain models (users, hives, inspections, sensors, measurements,
//!   alerts, notification templates, settings and notifications)
//! - Request payloads with their validation rules
//! - The ownership check shared by every protected handler

pub mod models;
pub mod services;
