// JWT token creation and verification
// Tokens carry the caller's role; routes are gated on it

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::Role;

/// JWT claims structure
///
/// # Fields
/// * `role` - Role the bearer acts as
/// * `jti` - Unique token id
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub role: Role,
    pub jti: Uuid,
    pub exp: usize,
}

/// Issues and verifies HS256 tokens with a configured secret
///
/// Built once from configuration and shared; there is no global key.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates a token issuer
    ///
    /// # Arguments
    /// * `secret` - Signing secret
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Creates a JWT token for a role
    ///
    /// # Example
    /// ```
    /// use chrono::Duration;
    /// use pvz_api::auth::jwt::TokenIssuer;
    /// use pvz_api::domain::user::Role;
    ///
    /// let issuer = TokenIssuer::new("your-secret-key", Duration::hours(24));
    /// let token = issuer.issue(Role::Employee).expect("valid token");
    /// let claims = issuer.verify(&token).expect("valid token");
    /// assert_eq!(claims.role, Role::Employee);
    /// ```
    pub fn issue(&self, role: Role) -> Result<String, String> {
        let expiry = Utc::now() + self.ttl;
        let claims = Claims {
            role,
            jti: Uuid::new_v4(),
            exp: expiry.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| e.to_string())
    }

    /// Verifies and decodes a JWT token
    ///
    /// # Returns
    /// * `Ok(Claims)` - The decoded claims if token is valid
    /// * `Err(String)` - If token is forged, malformed or expired
    pub fn verify(&self, token: &str) -> Result<Claims, String> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| e.to_string())
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}
