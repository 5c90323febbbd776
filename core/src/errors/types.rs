//! Error types for key loading, token operations and input validation
//!
//! Each enum covers one concern; `DomainError` bridges them for callers.

use std::path::PathBuf;
use thiserror::Error;

/// Key loading errors
///
/// All variants are operator-configuration mistakes: the key path is missing,
/// points at something unreadable, or holds the wrong kind of key.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Key file path is empty")]
    EmptyPath,

    #[error("Key file {} is unreadable: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key format: {message}")]
    KeyParse { message: String },
}

/// Token signing and verification errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Signing key is not loaded")]
    SigningKeyMissing,

    #[error("Verification key is not loaded")]
    VerificationKeyMissing,

    #[error("Token signing failed: {message}")]
    SigningFailure { message: String },

    /// Any verification failure. Carries no detail: a forged, expired or
    /// malformed token all look the same to the caller.
    #[error("Token is invalid")]
    InvalidToken,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: &'static str },

    #[error("Malformed subject {subject:?}: missing delimiter")]
    MalformedSubject { subject: String },
}
