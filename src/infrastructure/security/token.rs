// src/infrastructure/security/token.rs
use std::sync::Arc;

use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::{security::SessionVerifier, time::Clock},
};
use crate::domain::user::{UserId, UserRepository};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION: &str = "v1";

/// Wire payload of a session token: who, and until when. The role is not
/// in the token; it is read fresh from the user row on every request, so
/// demotions and deactivations bite immediately.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: i64,
    exp: i64,
}

/// Verifies bearer tokens minted by the external auth provider:
/// `v1.<base64url payload>.<base64url hmac-sha256 tag>` over a shared key.
pub struct HmacSessionVerifier {
    key: Vec<u8>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl HmacSessionVerifier {
    pub fn new(key: impl Into<Vec<u8>>, users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            key: key.into(),
            users,
            clock,
        }
    }

    fn decode_claims(&self, token: &str) -> ApplicationResult<SessionClaims> {
        let malformed = || ApplicationError::unauthorized("malformed session token");

        let mut parts = token.split('.');
        let (version, payload, tag) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(version), Some(payload), Some(tag), None) => (version, payload, tag),
            _ => return Err(malformed()),
        };
        if version != TOKEN_VERSION {
            return Err(malformed());
        }

        let payload = URL_SAFE_NO_PAD.decode(payload).map_err(|_| malformed())?;
        let tag = URL_SAFE_NO_PAD.decode(tag).map_err(|_| malformed())?;

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|_| ApplicationError::infrastructure("invalid session signing key"))?;
        mac.update(&payload);
        if mac.verify_slice(&tag).is_err() {
            return Err(ApplicationError::unauthorized(
                "session token signature mismatch",
            ));
        }

        serde_json::from_slice(&payload).map_err(|_| malformed())
    }
}

#[async_trait]
impl SessionVerifier for HmacSessionVerifier {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let claims = self.decode_claims(token)?;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(ApplicationError::unauthorized("session token expired"));
        }

        let id = UserId::new(claims.sub)
            .map_err(|_| ApplicationError::unauthorized("invalid session subject"))?;
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("unknown user"))?;

        if !user.is_active {
            return Err(ApplicationError::unauthorized("account deactivated"));
        }

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username.to_string(),
            role: user.role,
            capabilities: user.role.default_capabilities(),
        })
    }
}

/// Produces a token in the shared format. The production mint lives with
/// the auth provider; this end is for local tooling and tests.
pub fn sign_session_token(key: &[u8], user_id: i64, expires_at: DateTime<Utc>) -> String {
    let claims = SessionClaims {
        sub: user_id,
        exp: expires_at.timestamp(),
    };
    // serializing two integers cannot fail
    let payload = serde_json::to_vec(&claims).unwrap_or_default();

    let mut mac = HmacSha256::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(&payload);
    let tag = mac.finalize().into_bytes();

    format!(
        "{TOKEN_VERSION}.{}.{}",
        URL_SAFE_NO_PAD.encode(&payload),
        URL_SAFE_NO_PAD.encode(tag)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainResult;
    use crate::domain::user::{Role, User, Username};
    use chrono::Duration;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    struct InMemoryUsers {
        inner: Mutex<HashMap<i64, User>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
            let map = self.inner.lock().unwrap();
            Ok(map.get(&i64::from(id)).cloned())
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn verifier_with(users: Vec<User>, now: DateTime<Utc>) -> HmacSessionVerifier {
        let map = users
            .into_iter()
            .map(|user| (i64::from(user.id), user))
            .collect();
        HmacSessionVerifier::new(
            KEY,
            Arc::new(InMemoryUsers {
                inner: Mutex::new(map),
            }),
            Arc::new(FixedClock(now)),
        )
    }

    fn editor(id: i64, is_active: bool) -> User {
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new("desk-editor").unwrap(),
            role: Role::Editor,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn valid_token_yields_role_capabilities() {
        let now = Utc::now();
        let verifier = verifier_with(vec![editor(1, true)], now);
        let token = sign_session_token(KEY, 1, now + Duration::hours(1));

        let actor = verifier.authenticate(&token).await.unwrap();
        assert_eq!(actor.role, Role::Editor);
        assert!(actor.has_capability("articles", "review"));
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let now = Utc::now();
        let verifier = verifier_with(vec![editor(1, true)], now);
        let token = sign_session_token(KEY, 1, now + Duration::hours(1));
        let forged = sign_session_token(b"wrong-key-wrong-key-wrong-key-00", 1, now + Duration::hours(1));

        assert!(verifier.authenticate(&forged).await.is_err());
        let mut truncated = token.clone();
        truncated.pop();
        assert!(verifier.authenticate(&truncated).await.is_err());
        assert!(verifier.authenticate("v1.garbage").await.is_err());
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let now = Utc::now();
        let verifier = verifier_with(vec![editor(1, true)], now);
        let token = sign_session_token(KEY, 1, now - Duration::seconds(1));

        assert!(verifier.authenticate(&token).await.is_err());
    }

    #[tokio::test]
    async fn deactivated_or_unknown_users_are_rejected() {
        let now = Utc::now();
        let verifier = verifier_with(vec![editor(1, false)], now);

        let token = sign_session_token(KEY, 1, now + Duration::hours(1));
        assert!(verifier.authenticate(&token).await.is_err());

        let token = sign_session_token(KEY, 99, now + Duration::hours(1));
        assert!(verifier.authenticate(&token).await.is_err());
    }
}
