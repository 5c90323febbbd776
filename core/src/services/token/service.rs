//! Token service: issues and verifies RS256-signed identity tokens

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::{Claims, IssuedToken, TOKEN_ISSUER};
use crate::errors::{DomainError, DomainResult, TokenError, ValidationError};

use super::clock::{Clock, SystemClock};
use super::duration::parse_duration;
use super::key_store::KeyStore;

/// The single signing algorithm this service issues and accepts
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::RS256;

/// Why a token was rejected. Only ever logged; callers see
/// `TokenError::InvalidToken` whatever the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Malformed,
    AlgorithmMismatch,
    BadSignature,
    Expired,
    NotYetValid,
    AudienceMismatch,
    IssuerMismatch,
}

impl Rejection {
    pub(crate) fn from_jwt(kind: &JwtErrorKind) -> Self {
        match kind {
            JwtErrorKind::InvalidSignature => Rejection::BadSignature,
            JwtErrorKind::InvalidAlgorithm => Rejection::AlgorithmMismatch,
            _ => Rejection::Malformed,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Malformed => "malformed",
            Rejection::AlgorithmMismatch => "algorithm_mismatch",
            Rejection::BadSignature => "bad_signature",
            Rejection::Expired => "expired",
            Rejection::NotYetValid => "not_yet_valid",
            Rejection::AudienceMismatch => "audience_mismatch",
            Rejection::IssuerMismatch => "issuer_mismatch",
        };
        f.write_str(reason)
    }
}

/// Service for issuing and verifying signed identity tokens.
///
/// Keys come from a shared [`KeyStore`]; time comes from the injected
/// [`Clock`]. The service keeps no per-token state, so every call to
/// [`TokenService::verify`] is independent.
pub struct TokenService<C: Clock = SystemClock> {
    keys: Arc<KeyStore>,
    clock: C,
    validation: Validation,
}

impl TokenService<SystemClock> {
    /// Creates a token service reading wall-clock time
    pub fn new(keys: Arc<KeyStore>) -> Self {
        Self::with_clock(keys, SystemClock)
    }
}

impl<C: Clock> TokenService<C> {
    /// Creates a token service with an explicit time source
    pub fn with_clock(keys: Arc<KeyStore>, clock: C) -> Self {
        // The library only checks structure, algorithm and signature. Time,
        // audience and issuer are checked against `clock` in `check_claims`.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            keys,
            clock,
            validation,
        }
    }

    /// Issues a signed token for `subject`, valid for `audience` until
    /// `expires_in` from now.
    ///
    /// # Arguments
    ///
    /// * `subject` - Encoded subject, see [`crate::domain::encode_subject`]
    /// * `audience` - Intended consumer of the token
    /// * `expires_in` - Duration expression such as `1h`, `1h20m` or `-300ms`
    ///
    /// A non-positive `expires_in` yields a token that is already expired.
    ///
    /// # Errors
    ///
    /// * `TokenError::SigningKeyMissing` - no signing key loaded
    /// * `ValidationError::InvalidDuration` - `expires_in` does not parse or
    ///   the expiry falls outside the representable time range
    /// * `TokenError::SigningFailure` - the signature primitive failed
    pub fn create(
        &self,
        subject: &str,
        audience: &str,
        expires_in: &str,
    ) -> DomainResult<IssuedToken> {
        let key = self
            .keys
            .signing_key()
            .ok_or(TokenError::SigningKeyMissing)?;

        let lifetime = parse_duration(expires_in)?;
        let issued_at = self.clock.now();
        let expires_at = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            ValidationError::InvalidDuration {
                input: expires_in.to_string(),
                reason: "expiry out of range",
            }
        })?;

        let claims = Claims::new(subject, audience, issued_at, expires_at);
        let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &key).map_err(|e| {
            TokenError::SigningFailure {
                message: e.to_string(),
            }
        })?;

        debug!(
            jti = %claims.jti,
            audience = audience,
            expires_at = claims.exp,
            "Token issued"
        );

        Ok(IssuedToken {
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    /// Verifies `token` for `audience` and returns its encoded subject.
    ///
    /// # Errors
    ///
    /// * `TokenError::VerificationKeyMissing` - no verification key loaded
    /// * `TokenError::InvalidToken` - bad signature, malformed token, expired
    ///   or not yet valid, wrong audience, or wrong issuer
    pub fn verify(&self, token: &str, audience: &str) -> DomainResult<String> {
        self.verify_claims(token, audience).map(|claims| claims.sub)
    }

    /// Same checks as [`TokenService::verify`], returning the full claim set
    pub fn verify_claims(&self, token: &str, audience: &str) -> DomainResult<Claims> {
        let key = self
            .keys
            .verification_key()
            .ok_or(TokenError::VerificationKeyMissing)?;

        self.decode_verified(token, &key)
            .and_then(|claims| self.check_claims(claims, audience))
            .map_err(|reason| {
                debug!(reason = %reason, "Token rejected");
                DomainError::Token(TokenError::InvalidToken)
            })
    }

    /// First gate: structure, algorithm and signature
    fn decode_verified(&self, token: &str, key: &DecodingKey) -> Result<Claims, Rejection> {
        decode::<Claims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Rejection::from_jwt(e.kind()))
    }

    /// Second gate: validity window, audience and issuer
    fn check_claims(&self, claims: Claims, audience: &str) -> Result<Claims, Rejection> {
        let now = self.clock.now();
        if claims.is_expired_at(now) {
            return Err(Rejection::Expired);
        }
        if claims.is_premature_at(now) {
            return Err(Rejection::NotYetValid);
        }
        // An empty audience claim never matches, even an empty expectation
        if claims.aud.is_empty()
            || !constant_time_eq(claims.aud.as_bytes(), audience.as_bytes())
        {
            return Err(Rejection::AudienceMismatch);
        }
        if !constant_time_eq(claims.iss.as_bytes(), TOKEN_ISSUER.as_bytes()) {
            return Err(Rejection::IssuerMismatch);
        }
        Ok(claims)
    }
}
