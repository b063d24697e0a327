use crate::domain::user::{Capability, Role, UserId};
use std::collections::HashSet;

/// The caller as established by the session collaborator: identity, the
/// role currently on the user row, and the capabilities that role expands
/// to.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }
}
