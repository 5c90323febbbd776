//! Token entities: the signed claim set and the result of issuing a token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped on every token and required by verification
pub const TOKEN_ISSUER: &str = "github.com/JuneKimDev/token";

/// Claims structure for the JWT payload.
///
/// Every field is mandatory; a payload missing any of them, or carrying a
/// value of the wrong type, fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (encoded two-part identity)
    pub sub: String,

    /// Audience
    pub aud: String,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp, always equal to `iat`
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for a token issued at `issued_at` that expires at
    /// `expires_at`. A fresh random token id is generated on every call.
    ///
    /// `expires_at` may precede `issued_at`; such a token is expired on
    /// arrival but can still be constructed.
    pub fn new(
        subject: impl Into<String>,
        audience: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.into(),
            aud: audience.into(),
            iss: TOKEN_ISSUER.to_string(),
            iat,
            nbf: iat,
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// `true` once `now` has reached the expiration time
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// `true` while `now` is before the not-before or issued-at time
    pub fn is_premature_at(&self, now: DateTime<Utc>) -> bool {
        let now = now.timestamp();
        now < self.nbf || now < self.iat
    }
}

/// A freshly signed token together with its validity window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS string (`header.claims.signature`)
    pub token: String,

    /// Unix seconds the token was issued at
    pub issued_at: i64,

    /// Unix seconds the token expires at
    pub expires_at: i64,
}

impl IssuedToken {
    /// Seconds between issuance and expiry; negative for expired-on-arrival tokens
    pub fn lifetime_seconds(&self) -> i64 {
        self.expires_at - self.issued_at
    }
}
