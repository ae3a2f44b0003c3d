//! US ZIP code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ZipCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ZipCodeError {
    /// The input string is empty.
    #[error("ZIP code cannot be empty")]
    Empty,
    /// The input is not `12345` or `12345-6789`.
    #[error("ZIP code must be 5 digits or ZIP+4 (12345-6789)")]
    InvalidFormat,
}

/// A US ZIP code, either 5-digit or ZIP+4.
///
/// ```
/// use art_gallery_core::ZipCode;
///
/// assert!(ZipCode::parse("94107").is_ok());
/// assert!(ZipCode::parse("94107-1234").is_ok());
/// assert!(ZipCode::parse("9410").is_err());
/// assert!(ZipCode::parse("94107 1234").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    /// Parse a `ZipCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not in `12345`/`12345-6789` form.
    pub fn parse(s: &str) -> Result<Self, ZipCodeError> {
        if s.is_empty() {
            return Err(ZipCodeError::Empty);
        }

        let (base, plus_four) = match s.split_once('-') {
            Some((base, ext)) => (base, Some(ext)),
            None => (s, None),
        };

        let all_digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };

        if !all_digits(base, 5) || plus_four.is_some_and(|ext| !all_digits(ext, 4)) {
            return Err(ZipCodeError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the ZIP code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The five-digit delivery area, without any +4 extension.
    #[must_use]
    pub fn base(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ZipCode {
    type Error = ZipCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ZipCode> for String {
    fn from(zip: ZipCode) -> Self {
        zip.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_five_digit() {
        let zip = ZipCode::parse("10001").unwrap();
        assert_eq!(zip.base(), "10001");
    }

    #[test]
    fn test_parse_plus_four() {
        let zip = ZipCode::parse("10001-0420").unwrap();
        assert_eq!(zip.base(), "10001");
        assert_eq!(zip.as_str(), "10001-0420");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert_eq!(ZipCode::parse(""), Err(ZipCodeError::Empty));
        for bad in ["1234", "123456", "abcde", "10001-", "10001-12", "10001-12345", "10001-1234-5"] {
            assert_eq!(ZipCode::parse(bad), Err(ZipCodeError::InvalidFormat), "{bad}");
        }
    }
}
