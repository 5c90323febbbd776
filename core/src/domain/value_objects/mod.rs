//! Value objects representing immutable domain concepts.

pub mod subject;

pub use subject::{decode_subject, encode_subject, Subject, SUBJECT_DELIMITER};
