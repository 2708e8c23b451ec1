//! Owner/caller isolation.
//!
//! Every record that belongs to a user implements [`Owned`]. Handlers run
//! each lookup through [`ensure_owner`] or [`visible_to`] before acting on
//! it, so the comparison against the caller lives in one place.

use thiserror::Error;

use crate::models::{Alert, Hive, Inspection, Notification, NotificationSettings, Sensor};

/// A record whose ownership chain resolves to a single user.
pub trait Owned {
    fn owner_id(&self) -> i64;

    fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id() == user_id
    }
}

/// Why a caller may not act on a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not enough permissions to access this {0}")]
    Forbidden(&'static str),
}

/// Returns the record if it exists and belongs to `caller`.
///
/// `what` names the record in the resulting error.
pub fn ensure_owner<T: Owned>(
    entity: Option<T>,
    caller: i64,
    what: &'static str,
) -> Result<T, AccessError> {
    match entity {
        None => Err(AccessError::NotFound(what)),
        Some(e) if e.is_owned_by(caller) => Ok(e),
        Some(_) => Err(AccessError::Forbidden(what)),
    }
}

/// Masks records owned by someone else as absent.
pub fn visible_to<T: Owned>(entity: Option<T>, caller: i64) -> Option<T> {
    entity.filter(|e| e.is_owned_by(caller))
}

impl Owned for Hive {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

impl Owned for Inspection {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

impl Owned for Sensor {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

impl Owned for Alert {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

impl Owned for NotificationSettings {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for Notification {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HiveStatus;
    use chrono::Utc;

    fn hive(owner_id: i64) -> Hive {
        Hive {
            id: 10,
            name: "Acacia".to_string(),
            location: "Orchard".to_string(),
            description: None,
            status: HiveStatus::Active,
            queen_year: 2022,
            frames_count: 8,
            owner_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_ensure_owner_accepts_owner() {
        let result = ensure_owner(Some(hive(1)), 1, "Hive");
        assert_eq!(result.unwrap().id, 10);
    }

    #[test]
    fn test_ensure_owner_distinguishes_missing_and_foreign() {
        assert_eq!(
            ensure_owner::<Hive>(None, 1, "Hive").unwrap_err(),
            AccessError::NotFound("Hive")
        );
        assert_eq!(
            ensure_owner(Some(hive(2)), 1, "Hive").unwrap_err(),
            AccessError::Forbidden("Hive")
        );
    }

    #[test]
    fn test_visible_to_masks_foreign_records() {
        assert!(visible_to(Some(hive(1)), 1).is_some());
        assert!(visible_to(Some(hive(2)), 1).is_none());
        assert!(visible_to::<Hive>(None, 1).is_none());
    }

    #[test]
    fn test_settings_owner_is_user_id() {
        let settings = NotificationSettings {
            id: 3,
            user_id: 42,
            email_enabled: true,
            sms_enabled: false,
            push_enabled: true,
            email_address: None,
            phone_number: None,
            min_priority: Default::default(),
            created_at: Utc::now(),
            updated_at: None,
        };
        assert!(settings.is_owned_by(42));
        assert!(!settings.is_owned_by(7));
    }

    #[test]
    fn test_access_error_display() {
        assert_eq!(AccessError::NotFound("Sensor").to_string(), "Sensor not found");
        assert!(AccessError::Forbidden("Hive").to_string().contains("permissions"));
    }
}
