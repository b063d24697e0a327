// src/domain/user/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("user id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: String,
    pub action: String,
}

impl Capability {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

/// Newsroom roles. Contributors write; editors run the review desk and
/// control publication; admins additionally hold operational levers such
/// as triggering the sweep by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Contributor,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Contributor => "contributor",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    pub fn default_capabilities(&self) -> HashSet<Capability> {
        use Capability as Cap;
        let contributor = [
            Cap::new("articles", "create"),
            Cap::new("articles", "update:own"),
            Cap::new("articles", "submit:own"),
            Cap::new("articles", "view:drafts"),
        ];
        let editor = [
            Cap::new("articles", "update:any"),
            Cap::new("articles", "submit:any"),
            Cap::new("articles", "review"),
            Cap::new("articles", "publish"),
            Cap::new("articles", "schedule"),
            Cap::new("comments", "create"),
            Cap::new("comments", "view:internal"),
        ];

        match self {
            Role::Contributor => HashSet::from(contributor),
            Role::Editor => contributor.into_iter().chain(editor).collect(),
            Role::Admin => contributor
                .into_iter()
                .chain(editor)
                .chain([Cap::new("sweep", "run")])
                .collect(),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Contributor
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contributor" => Ok(Role::Contributor),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("username cannot be empty".into()));
        }
        if value.len() < 3 {
            return Err(DomainError::Validation(
                "username must be at least 3 characters long".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributors_cannot_review_or_publish() {
        let caps = Role::Contributor.default_capabilities();
        assert!(caps.iter().any(|c| c.matches("articles", "submit:own")));
        assert!(!caps.iter().any(|c| c.matches("articles", "review")));
        assert!(!caps.iter().any(|c| c.matches("articles", "publish")));
        assert!(!caps.iter().any(|c| c.matches("articles", "schedule")));
    }

    #[test]
    fn editors_hold_the_review_desk() {
        let caps = Role::Editor.default_capabilities();
        assert!(caps.iter().any(|c| c.matches("articles", "review")));
        assert!(caps.iter().any(|c| c.matches("articles", "publish")));
        assert!(caps.iter().any(|c| c.matches("comments", "create")));
        assert!(!caps.iter().any(|c| c.matches("sweep", "run")));
    }

    #[test]
    fn only_admins_may_trigger_the_sweep() {
        assert!(
            Role::Admin
                .default_capabilities()
                .iter()
                .any(|c| c.matches("sweep", "run"))
        );
    }
}
