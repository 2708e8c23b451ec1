//! Domain services for the apiary platform.
//!
//! Services contain business logic that operates on domain models.

pub mod ownership;

pub use ownership::{ensure_owner, visible_to, AccessError, Owned};
