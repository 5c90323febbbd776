//! # ServiceToken Core
//!
//! Issues and verifies signed identity tokens for service-to-service
//! authentication. A service mints a token asserting "this subject, for this
//! audience, until this time"; downstream services check the signature and
//! claims with only the public key.
//!
//! ```no_run
//! use std::sync::Arc;
//! use st_core::{decode_subject, encode_subject, KeyStore, TokenService};
//!
//! # fn main() -> Result<(), st_core::DomainError> {
//! let keys = Arc::new(KeyStore::new());
//! keys.load_signing_key("keys/rsa_private.pem")?;
//! keys.load_verification_key("keys/rsa_public.pem")?;
//!
//! let service = TokenService::new(keys);
//! let issued = service.create(&encode_subject("user-42", "device-9"), "svc.billing", "1h")?;
//!
//! let subject = service.verify(&issued.token, "svc.billing")?;
//! let (user, device) = decode_subject(&subject)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod errors;
pub mod services;

pub use domain::*;
pub use errors::*;
pub use services::*;
