//! RS256 key store for token signing and verification

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use st_shared::config::TokenConfig;
use tracing::info;

use crate::errors::{DomainResult, KeyError};

/// Which half of the key pair a PEM file is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyRole {
    Signing,
    Verification,
}

impl KeyRole {
    /// PKCS#1 PEM label; PKCS#8 and other encodings are rejected
    fn pem_tag(self) -> &'static str {
        match self {
            KeyRole::Signing => "RSA PRIVATE KEY",
            KeyRole::Verification => "RSA PUBLIC KEY",
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Signing => f.write_str("signing"),
            KeyRole::Verification => f.write_str("verification"),
        }
    }
}

/// Holds the active signing key and verification key.
///
/// The two slots are independent: a verifier-only service loads just the
/// public key. Loading a key replaces whatever the slot held before. Slots
/// are guarded by read-write locks so keys may be reloaded while other
/// threads sign or verify.
#[derive(Default)]
pub struct KeyStore {
    signing_key: RwLock<Option<Arc<EncodingKey>>>,
    verification_key: RwLock<Option<Arc<DecodingKey>>>,
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("has_signing_key", &self.has_signing_key())
            .field("has_verification_key", &self.has_verification_key())
            .finish()
    }
}

impl KeyStore {
    /// Creates an empty key store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a key store and loads every key path set in `config`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use st_core::services::token::KeyStore;
    /// use st_shared::TokenConfig;
    ///
    /// let keys = KeyStore::from_config(&TokenConfig::from_env())
    ///     .expect("Failed to load keys");
    /// ```
    pub fn from_config(config: &TokenConfig) -> DomainResult<Self> {
        let store = Self::new();
        if let Some(path) = &config.private_key_path {
            store.load_signing_key(path)?;
        }
        if let Some(path) = &config.public_key_path {
            store.load_verification_key(path)?;
        }
        Ok(store)
    }

    /// Loads a PKCS#1 PEM private key from `path` and installs it as the
    /// signing key.
    ///
    /// # Errors
    ///
    /// * `KeyError::EmptyPath` - `path` is empty
    /// * `KeyError::FileUnreadable` - the file cannot be opened or read
    /// * `KeyError::KeyParse` - the PEM or key encoding is malformed
    pub fn load_signing_key<P: AsRef<Path>>(&self, path: P) -> DomainResult<()> {
        let path = path.as_ref();
        let pem = read_key_file(path)?;
        self.install_signing_key(parse_signing_key(&pem)?);
        info!(path = %path.display(), role = %KeyRole::Signing, "Key loaded");
        Ok(())
    }

    /// Loads a PKCS#1 PEM public key from `path` and installs it as the
    /// verification key. Same errors as [`KeyStore::load_signing_key`].
    pub fn load_verification_key<P: AsRef<Path>>(&self, path: P) -> DomainResult<()> {
        let path = path.as_ref();
        let pem = read_key_file(path)?;
        self.install_verification_key(parse_verification_key(&pem)?);
        info!(path = %path.display(), role = %KeyRole::Verification, "Key loaded");
        Ok(())
    }

    /// Installs a signing key from in-memory PEM (embedded keys, tests)
    pub fn load_signing_key_pem(&self, pem: impl AsRef<[u8]>) -> DomainResult<()> {
        self.install_signing_key(parse_signing_key(pem.as_ref())?);
        info!(role = %KeyRole::Signing, "Key loaded from memory");
        Ok(())
    }

    /// Installs a verification key from in-memory PEM
    pub fn load_verification_key_pem(&self, pem: impl AsRef<[u8]>) -> DomainResult<()> {
        self.install_verification_key(parse_verification_key(pem.as_ref())?);
        info!(role = %KeyRole::Verification, "Key loaded from memory");
        Ok(())
    }

    pub fn has_signing_key(&self) -> bool {
        self.signing_key().is_some()
    }

    pub fn has_verification_key(&self) -> bool {
        self.verification_key().is_some()
    }

    pub(crate) fn signing_key(&self) -> Option<Arc<EncodingKey>> {
        self.signing_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn verification_key(&self) -> Option<Arc<DecodingKey>> {
        self.verification_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn install_signing_key(&self, key: EncodingKey) {
        *self.signing_key.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(key));
    }

    fn install_verification_key(&self, key: DecodingKey) {
        *self
            .verification_key
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(key));
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    if path.as_os_str().is_empty() {
        return Err(KeyError::EmptyPath);
    }
    fs::read(path).map_err(|source| KeyError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Extracts the first PEM block and checks it carries the PKCS#1 label for
/// `role`.
fn pkcs1_block(input: &[u8], role: KeyRole) -> Result<pem::Pem, KeyError> {
    let block = pem::parse(input).map_err(|e| KeyError::KeyParse {
        message: format!("{} key is not valid PEM: {}", role, e),
    })?;

    if block.tag() != role.pem_tag() {
        return Err(KeyError::KeyParse {
            message: format!(
                "{} key must be a PKCS#1 \"{}\" block, found \"{}\"",
                role,
                role.pem_tag(),
                block.tag()
            ),
        });
    }

    Ok(block)
}

/// The DER body must decode as a PKCS#1 `RSAPrivateKey` before it is
/// handed to the signer.
fn parse_signing_key(input: &[u8]) -> Result<EncodingKey, KeyError> {
    let block = pkcs1_block(input, KeyRole::Signing)?;
    RsaPrivateKey::from_pkcs1_der(block.contents()).map_err(|e| KeyError::KeyParse {
        message: format!("Invalid private key: {}", e),
    })?;
    Ok(EncodingKey::from_rsa_der(block.contents()))
}

fn parse_verification_key(input: &[u8]) -> Result<DecodingKey, KeyError> {
    let block = pkcs1_block(input, KeyRole::Verification)?;
    RsaPublicKey::from_pkcs1_der(block.contents()).map_err(|e| KeyError::KeyParse {
        message: format!("Invalid public key: {}", e),
    })?;
    Ok(DecodingKey::from_rsa_der(block.contents()))
}
