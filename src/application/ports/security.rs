// src/application/ports/security.rs
use crate::application::dto::AuthenticatedUser;
use crate::application::error::ApplicationResult;
use async_trait::async_trait;

/// Seam to the external auth collaborator: given the bearer token it
/// minted, yield the caller's identity and role. Minting, login, and
/// password handling all live on the other side of this trait.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser>;
}
