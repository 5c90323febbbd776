//! Key file configuration for token signing and verification

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the PEM private key path
pub const PRIVATE_KEY_PATH_VAR: &str = "TOKEN_PRIVATE_KEY_PATH";

/// Environment variable holding the PEM public key path
pub const PUBLIC_KEY_PATH_VAR: &str = "TOKEN_PUBLIC_KEY_PATH";

/// Paths of the RSA key files a service loads at startup.
///
/// Either path may be absent: an issuer may skip the public key and a
/// verifier-only service never configures the private key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// PKCS#1 PEM private key used to sign tokens
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,

    /// PKCS#1 PEM public key used to verify tokens
    #[serde(default)]
    pub public_key_path: Option<PathBuf>,
}

impl TokenConfig {
    /// Create from environment variables. Unset or empty variables leave the
    /// corresponding path unconfigured.
    pub fn from_env() -> Self {
        Self {
            private_key_path: path_from_env(PRIVATE_KEY_PATH_VAR),
            public_key_path: path_from_env(PUBLIC_KEY_PATH_VAR),
        }
    }

    pub fn with_private_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.private_key_path = Some(path.into());
        self
    }

    pub fn with_public_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.public_key_path = Some(path.into());
        self
    }

    /// True when only the verification key is configured
    pub fn is_verifier_only(&self) -> bool {
        self.private_key_path.is_none() && self.public_key_path.is_some()
    }
}

fn path_from_env(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
