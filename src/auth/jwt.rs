use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::{
    claims::{Claims, TokenKind},
    roles::Role,
};
use crate::config::JwtConfig;

/// Only HMAC-SHA256 is accepted; a token whose header names any other algorithm is rejected.
const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and checks signed tokens.
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: Uuid, role: Role) -> Result<TokenPair, TokenError>;

    /// Verifies signature, algorithm, expiry, issuer and audience.
    fn parse(&self, token: &str) -> Result<Claims, TokenError>;

    /// Same checks as [`TokenService::parse`], claims discarded.
    fn validate(&self, token: &str) -> Result<(), TokenError> {
        self.parse(token).map(|_| ())
    }
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: Duration::from_secs((cfg.ttl_minutes.max(0) as u64) * 60),
            refresh_ttl: Duration::from_secs((cfg.refresh_ttl_minutes.max(0) as u64) * 60),
        }
    }

    fn sign_with_kind(
        &self,
        user_id: Uuid,
        role: Role,
        kind: TokenKind,
    ) -> Result<String, TokenError> {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
        };
        let token =
            encode(&Header::new(ALGORITHM), &claims, &self.encoding).map_err(TokenError::Signing)?;
        debug!(user_id = %user_id, kind = ?kind, "jwt signed");
        Ok(token)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation
    }
}

impl TokenService for JwtKeys {
    fn issue(&self, user_id: Uuid, role: Role) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.sign_with_kind(user_id, role, TokenKind::Access)?,
            refresh_token: self.sign_with_kind(user_id, role, TokenKind::Refresh)?,
        })
    }

    fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())
            .map_err(TokenError::InvalidToken)?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 60 * 24,
            refresh_ttl_minutes: 60 * 24 * 7,
        })
    }

    fn claims_for(keys: &JwtKeys, kind: TokenKind, exp_offset_secs: i64) -> Claims {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Claims {
            sub: Uuid::new_v4(),
            role: Role::Student,
            iat: now as usize,
            exp: (now + exp_offset_secs) as usize,
            iss: keys.issuer.clone(),
            aud: keys.audience.clone(),
            kind,
        }
    }

    #[test]
    fn issue_and_parse_round_trip() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user_id = Uuid::new_v4();
        let pair = keys.issue(user_id, Role::Tutor).expect("issue");
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = keys.parse(&pair.access_token).expect("parse access");
        assert_eq!(access.sub, user_id);
        assert_eq!(access.role, Role::Tutor);
        assert_eq!(access.kind, TokenKind::Access);
        assert_eq!(access.iss, "test-issuer");
        assert_eq!(access.aud, "test-aud");

        let refresh = keys.parse(&pair.refresh_token).expect("parse refresh");
        assert_eq!(refresh.sub, user_id);
        assert_eq!(refresh.kind, TokenKind::Refresh);
    }

    #[test]
    fn lifetimes_follow_config() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let pair = keys.issue(Uuid::new_v4(), Role::Student).unwrap();
        let access = keys.parse(&pair.access_token).unwrap();
        let refresh = keys.parse(&pair.refresh_token).unwrap();
        assert_eq!(access.exp - access.iat, 24 * 3600);
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 3600);
    }

    #[test]
    fn parse_rejects_other_secret() {
        let keys = make_keys("secret-a", "iss", "aud");
        let other = make_keys("secret-b", "iss", "aud");
        let pair = other.issue(Uuid::new_v4(), Role::Admin).unwrap();
        assert!(matches!(
            keys.parse(&pair.access_token),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(keys.parse(&pair.access_token).is_err());
    }

    #[test]
    fn parse_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let bad = make_keys("same-secret", "bad-iss", "bad-aud");
        let pair = good.issue(Uuid::new_v4(), Role::Student).unwrap();
        assert!(bad.parse(&pair.access_token).is_err());
    }

    #[test]
    fn parse_rejects_other_algorithm() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let claims = claims_for(&keys, TokenKind::Access, 3600);
        let token = encode(&Header::new(Algorithm::HS512), &claims, &keys.encoding).unwrap();
        assert!(keys.parse(&token).is_err());
    }

    #[test]
    fn parse_rejects_expired_token() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let claims = claims_for(&keys, TokenKind::Refresh, -3600);
        let token = encode(&Header::new(ALGORITHM), &claims, &keys.encoding).unwrap();
        assert!(keys.parse(&token).is_err());
    }

    #[test]
    fn validate_accepts_fresh_and_rejects_foreign_or_expired() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let pair = keys.issue(Uuid::new_v4(), Role::Tutor).unwrap();
        assert!(keys.validate(&pair.access_token).is_ok());
        assert!(keys.validate(&pair.refresh_token).is_ok());

        let foreign = make_keys("other-secret", "iss", "aud")
            .issue(Uuid::new_v4(), Role::Tutor)
            .unwrap();
        assert!(matches!(
            keys.validate(&foreign.access_token),
            Err(TokenError::InvalidToken(_))
        ));

        let expired = claims_for(&keys, TokenKind::Access, -3600);
        let token = encode(&Header::new(ALGORITHM), &expired, &keys.encoding).unwrap();
        assert!(keys.validate(&token).is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        let keys = make_keys("dev-secret", "iss", "aud");
        assert!(keys.parse("not.a.jwt").is_err());
        assert!(keys.parse("").is_err());
    }
}
