//! Domain layer containing token entities and the subject value object.

pub mod entities;
pub mod value_objects;

pub use entities::{Claims, IssuedToken, TOKEN_ISSUER};
pub use value_objects::{decode_subject, encode_subject, Subject, SUBJECT_DELIMITER};
