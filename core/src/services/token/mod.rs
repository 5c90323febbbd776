//! Token service module
//!
//! This module handles the token lifecycle:
//! - RS256 key loading for signing and verification
//! - Duration expressions for token lifetimes
//! - Token issuance and verification against an injectable clock

mod clock;
mod duration;
mod key_store;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::parse_duration;
pub use key_store::KeyStore;
pub use service::{TokenService, TOKEN_ALGORITHM};
