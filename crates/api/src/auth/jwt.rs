//! HS256 JWT encoding/validation for staff tokens.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use salonflow_core::types::DbId;

/// JWT signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in hours.
    pub expiry_hours: i64,
}

impl JwtConfig {
    /// Load from `JWT_SECRET` / `JWT_EXPIRY_HOURS` env vars.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| "72".into())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");
        Self {
            secret,
            expiry_hours,
        }
    }
}

/// Staff token claims. `sub` is the master's database id; the salon
/// scope is re-derived from the master row on every request, never
/// carried in the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: DbId,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a staff token for a master.
pub fn issue_token(
    master_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: master_id,
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(config.expiry_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a staff token and return its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiry_hours: 1,
        }
    }

    #[test]
    fn round_trips_master_id() {
        let token = issue_token(42, &config()).unwrap();
        let claims = validate_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue_token(42, &config()).unwrap();
        let other = JwtConfig {
            secret: "other".into(),
            expiry_hours: 1,
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(validate_token("not-a-token", &config()).is_err());
    }
}
