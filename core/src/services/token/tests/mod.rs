//! Test fixtures shared by the token service unit tests


use std::path::PathBuf;
use std::sync::Arc;

use super::KeyStore;

pub(super) const PRIVATE_KEY_PEM: &str = include_str!("../../../../tests/fixtures/rsa_private.pem");
pub(super) const PUBLIC_KEY_PEM: &str = include_str!("../../../../tests/fixtures/rsa_public.pem");
pub(super) const OTHER_PRIVATE_KEY_PEM: &str =
    include_str!("../../../../tests/fixtures/rsa_private_other.pem");
pub(super) const OTHER_PUBLIC_KEY_PEM: &str =
    include_str!("../../../../tests/fixtures/rsa_public_other.pem");
pub(super) const PKCS8_PRIVATE_KEY_PEM: &str =
    include_str!("../../../../tests/fixtures/pkcs8_private.pem");

pub(super) fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Key store holding both halves of the primary fixture pair
pub(super) fn loaded_key_store() -> Arc<KeyStore> {
    let keys = KeyStore::new();
    keys.load_signing_key_pem(PRIVATE_KEY_PEM)
        .expect("Failed to load signing key");
    keys.load_verification_key_pem(PUBLIC_KEY_PEM)
        .expect("Failed to load verification key");
    Arc::new(keys)
}
