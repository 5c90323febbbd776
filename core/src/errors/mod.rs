//! Domain-specific error types and error handling.

mod types;


pub use types::{KeyError, TokenError, ValidationError};

use thiserror::Error;

/// Coarse classification of every error the core returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty key path, unreadable file, malformed key
    Config,
    /// Operation attempted before the relevant key was loaded
    KeyNotReady,
    /// Unparseable duration or subject
    Input,
    /// Signing primitive failure
    Crypto,
    /// Any verification failure
    TokenInvalid,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Key(_) => ErrorKind::Config,
            DomainError::Token(TokenError::SigningKeyMissing)
            | DomainError::Token(TokenError::VerificationKeyMissing) => ErrorKind::KeyNotReady,
            DomainError::Token(TokenError::SigningFailure { .. }) => ErrorKind::Crypto,
            DomainError::Token(TokenError::InvalidToken) => ErrorKind::TokenInvalid,
            DomainError::Validation(_) => ErrorKind::Input,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
