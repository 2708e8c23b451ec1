//! Business services of the HTTP layer.

pub mod auth;
pub mod bootstrap;

pub use auth::{AuthError, AuthService};
pub use bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
