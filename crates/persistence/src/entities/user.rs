//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            username: entity.username,
            hashed_password: entity.hashed_password,
            is_active: entity.is_active,
            is_superuser: entity.is_superuser,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::User;

    #[test]
    fn test_user_entity_to_domain() {
        let entity = UserEntity {
            id: 1,
            email: "keeper@example.com".to_string(),
            username: "keeper".to_string(),
            hashed_password: "$argon2id$v=19$stub".to_string(),
            is_active: true,
            is_superuser: true,
            created_at: Utc::now(),
            updated_at: None,
        };

        let user: User = entity.clone().into();
        assert_eq!(user.id, entity.id);
        assert_eq!(user.username, "keeper");
        assert_eq!(user.hashed_password, entity.hashed_password);
        assert!(user.is_superuser);
        assert!(user.updated_at.is_none());
    }
}
