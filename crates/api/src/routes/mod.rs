//! HTTP route handlers, grouped by service.

pub mod alerts;
pub mod auth;
pub mod health;
pub mod hives;
pub mod inspections;
pub mod measurements;
pub mod notifications;
pub mod sensors;
pub mod settings;
pub mod templates;
pub mod users;
