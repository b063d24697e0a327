// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Role, UserId, Username};
use chrono::{DateTime, Utc};

/// Newsroom account. Credentials live with the external auth provider;
/// this service only needs the role and the active flag.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }
}
