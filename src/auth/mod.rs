use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// Claims embedded in every issued bearer token.
///
/// `admin` is kept on the wire for client compatibility but is always
/// `false`: there is no role model to derive it from.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            admin: false,
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("token rejected: {0}")]
    Rejected(#[from] jsonwebtoken::errors::Error),
}

/// Mint a signed HS256 token for an authenticated subject.
pub fn issue_token(security: &SecurityConfig, subject: &str) -> Result<String, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let claims = Claims::new(subject, security.token_expiry_hours);
    let key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Validate a presented token and return its claims. Expiry is enforced
/// by the decoder.
pub fn verify_token(security: &SecurityConfig, token: &str) -> Result<Claims, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Compare a plaintext password against a stored bcrypt hash. A malformed
/// stored hash counts as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}

/// Verified against when a login email has no account, so a miss costs
/// roughly the same as a mismatch.
pub const NO_ACCOUNT_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

#[cfg(test)]
mod tests {
    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "unit-test-secret".to_string(),
            token_expiry_hours: 4,
            cors_origins: vec![],
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let security = security();
        let token = issue_token(&security, "ann@x.com").unwrap();
        let claims = verify_token(&security, &token).unwrap();

        assert_eq!(claims.sub, "ann@x.com");
        assert!(!claims.admin);
        assert_eq!(claims.exp - claims.iat, 4 * 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&security(), "ann@x.com").unwrap();

        let other = SecurityConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..security()
        };
        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = security();
        let now = Utc::now();
        let claims = Claims {
            sub: "ann@x.com".to_string(),
            admin: false,
            iat: (now - Duration::hours(5)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert!(verify_token(&security, &token).is_err());
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let security = SecurityConfig {
            jwt_secret: String::new(),
            ..security()
        };
        assert!(matches!(
            issue_token(&security, "ann@x.com"),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn no_account_hash_never_matches_arbitrary_input() {
        assert!(!verify_password("pw1", NO_ACCOUNT_HASH));
    }
}
