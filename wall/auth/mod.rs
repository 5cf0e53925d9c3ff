//! Stateless bearer sessions.
//!
//! Every token is an HS256 JWT whose subject says what the holder may do: a
//! guest has only unlocked the wall, a member signed in with an account, an
//! admin entered the moderation PIN. The unlock middleware decodes the token
//! once and stores the [`SessionKind`] in request extensions; the extractors
//! below read it back.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use common::utils::config::Config;

use crate::utils::error::{ApiError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    Guest,
    Member { account_id: i32 },
    Admin,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Member { .. } => "member",
            Self::Admin => "admin",
        }
    }

    fn from_claims(claims: &SessionClaims) -> Option<Self> {
        match (claims.sub.as_str(), claims.account_id) {
            ("guest", None) => Some(Self::Guest),
            ("member", Some(account_id)) => Some(Self::Member { account_id }),
            ("admin", None) => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// `guest`, `member` or `admin`.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i32>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub kind: SessionKind,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    pub ttl: Duration,
    pub remember_ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration, remember_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            remember_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.session_secret,
            Duration::hours(config.session_ttl_hours),
            Duration::days(config.remember_ttl_days),
        )
    }

    pub fn issue(&self, kind: SessionKind, lifetime: Duration) -> Result<IssuedSession> {
        let now = Utc::now();
        let expires_at = now + lifetime;
        let account_id = match kind {
            SessionKind::Member { account_id } => Some(account_id),
            SessionKind::Guest | SessionKind::Admin => None,
        };
        let claims = SessionClaims {
            sub: kind.as_str().to_owned(),
            account_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign session: {e}")))?;

        Ok(IssuedSession {
            token,
            kind,
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> Result<SessionKind> {
        let rejected = || ApiError::Unauthorized("Session is invalid or has expired".to_owned());

        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!("Rejected session token: {e}");
            rejected()
        })?;

        SessionKind::from_claims(&data.claims).ok_or_else(rejected)
    }
}

/// A session opened with the admin PIN.
#[derive(Debug, Clone)]
pub struct AdminSession;

/// A session tied to a registered account.
#[derive(Debug, Clone)]
pub struct MemberSession {
    pub account_id: i32,
}

fn session_kind(parts: &Parts) -> Result<SessionKind> {
    parts
        .extensions
        .get::<SessionKind>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Unlock the wall first".to_owned()))
}

impl<S: Send + Sync> FromRequestParts<S> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        match session_kind(parts)? {
            SessionKind::Admin => Ok(AdminSession),
            _ => Err(ApiError::Unauthorized("Admin access required".to_owned())),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MemberSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        match session_kind(parts)? {
            SessionKind::Member { account_id } => Ok(MemberSession { account_id }),
            _ => Err(ApiError::Unauthorized("Sign in to continue".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", Duration::hours(12), Duration::days(30))
    }

    #[test]
    fn issued_tokens_verify_to_the_same_kind() {
        let keys = keys();
        for kind in [
            SessionKind::Guest,
            SessionKind::Member { account_id: 7 },
            SessionKind::Admin,
        ] {
            let issued = keys.issue(kind.clone(), keys.ttl).unwrap();
            assert_eq!(keys.verify(&issued.token).unwrap(), kind);
        }
    }

    #[test]
    fn remembered_sessions_outlive_regular_ones() {
        let keys = keys();
        let regular = keys.issue(SessionKind::Guest, keys.ttl).unwrap();
        let remembered = keys.issue(SessionKind::Guest, keys.remember_ttl).unwrap();
        assert!(remembered.expires_at - regular.expires_at > Duration::days(29));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let keys = keys();
        let issued = keys.issue(SessionKind::Admin, Duration::hours(-2)).unwrap();
        assert!(matches!(
            keys.verify(&issued.token),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let other = SessionKeys::new("other-secret", Duration::hours(1), Duration::hours(1));
        let issued = other.issue(SessionKind::Admin, other.ttl).unwrap();
        assert!(keys().verify(&issued.token).is_err());
        assert!(keys().verify("not-a-token").is_err());
    }
}
