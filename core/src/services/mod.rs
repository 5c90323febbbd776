//! Business services containing domain logic and use cases.

pub mod token;

pub use token::{
    parse_duration, Clock, KeyStore, ManualClock, SystemClock, TokenService, TOKEN_ALGORITHM,
};
