//! Domain entities representing core business objects.

pub mod token;


pub use token::{Claims, IssuedToken, TOKEN_ISSUER};
