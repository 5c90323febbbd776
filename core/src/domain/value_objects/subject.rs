//! Two-part subject identity encoded into a single claim string.
//!
//! A subject pairs two caller-defined identifiers, for example a principal
//! and the device it acts from, as `primary#secondary`. Parts are expected
//! not to contain the delimiter. When one does, decoding splits on the first
//! delimiter, so a `#` in the primary part is not preserved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Separator between the two subject parts
pub const SUBJECT_DELIMITER: char = '#';

/// Joins two identity parts into an encoded subject.
pub fn encode_subject(primary: &str, secondary: &str) -> String {
    let mut subject = String::with_capacity(primary.len() + secondary.len() + 1);
    subject.push_str(primary);
    subject.push(SUBJECT_DELIMITER);
    subject.push_str(secondary);
    subject
}

/// Splits an encoded subject on the first delimiter.
///
/// # Errors
///
/// `ValidationError::MalformedSubject` when the delimiter is absent.
pub fn decode_subject(subject: &str) -> Result<(String, String), ValidationError> {
    subject
        .split_once(SUBJECT_DELIMITER)
        .map(|(primary, secondary)| (primary.to_string(), secondary.to_string()))
        .ok_or_else(|| ValidationError::MalformedSubject {
            subject: subject.to_string(),
        })
}

/// Decoded subject identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    pub primary: String,
    pub secondary: String,
}

impl Subject {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Encoded form placed in the `sub` claim
    pub fn encode(&self) -> String {
        encode_subject(&self.primary, &self.secondary)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.primary, SUBJECT_DELIMITER, self.secondary)
    }
}

impl FromStr for Subject {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (primary, secondary) = decode_subject(s)?;
        Ok(Self { primary, secondary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_subject() {
        assert_eq!(encode_subject("user-42", "device-9"), "user-42#device-9");
        assert_eq!(encode_subject("clientId", "127.0.0.1"), "clientId#127.0.0.1");
    }

    #[test]
    fn test_decode_round_trip() {
        let pairs = [
            ("user-42", "device-9"),
            ("10.0.0.1", "client"),
            ("", "device"),
            ("user", ""),
            ("", ""),
            ("ユーザー", "端末"),
        ];
        for (primary, secondary) in pairs {
            let decoded = decode_subject(&encode_subject(primary, secondary)).unwrap();
            assert_eq!(decoded, (primary.to_string(), secondary.to_string()));
        }
    }

    #[test]
    fn test_decode_without_delimiter_is_error() {
        let err = decode_subject("user-42").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedSubject {
                subject: "user-42".to_string()
            }
        );
        assert!(decode_subject("").is_err());
    }

    #[test]
    fn test_decode_splits_on_first_delimiter() {
        let (primary, secondary) = decode_subject("a#b#c").unwrap();
        assert_eq!(primary, "a");
        assert_eq!(secondary, "b#c");
    }

    #[test]
    fn test_subject_display_and_parse() {
        let subject = Subject::new("user-42", "device-9");
        assert_eq!(subject.to_string(), subject.encode());

        let parsed: Subject = "user-42#device-9".parse().unwrap();
        assert_eq!(parsed, subject);
        assert!("no-delimiter".parse::<Subject>().is_err());
    }
}
