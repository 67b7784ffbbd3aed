//! ISBN parsing and checksum verification.
//!
//! Both ISBN-10 and ISBN-13 are accepted. Hyphens and spaces are stripped,
//! and the stored form is the bare digit string (with an upper-case `X`
//! check character for ISBN-10).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons an ISBN can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsbnError {
    /// Neither 10 nor 13 characters once separators are removed
    #[error("ISBN must have 10 or 13 digits, found {0}")]
    InvalidLength(usize),

    /// A character other than a digit (or a trailing X for ISBN-10)
    #[error("ISBN contains invalid character '{0}'")]
    InvalidCharacter(char),

    /// The check digit does not match
    #[error("ISBN checksum does not match")]
    InvalidChecksum,
}

/// A normalized, checksum-verified ISBN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Parse and verify an ISBN-10 or ISBN-13
    pub fn parse(input: &str) -> Result<Self, IsbnError> {
        let normalized: String = input
            .chars()
            .filter(|c| *c != '-' && *c != ' ')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.len() {
            10 => verify_isbn10(&normalized)?,
            13 => verify_isbn13(&normalized)?,
            other => return Err(IsbnError::InvalidLength(other)),
        }

        Ok(Self(normalized))
    }

    /// The normalized ISBN string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a 13-digit ISBN
    pub fn is_isbn13(&self) -> bool {
        self.0.len() == 13
    }
}

fn verify_isbn10(isbn: &str) -> Result<(), IsbnError> {
    let mut sum = 0u32;
    for (i, c) in isbn.chars().enumerate() {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'X' if i == 9 => 10,
            _ => return Err(IsbnError::InvalidCharacter(c)),
        };
        sum += value * (10 - i as u32);
    }

    if sum % 11 == 0 {
        Ok(())
    } else {
        Err(IsbnError::InvalidChecksum)
    }
}

fn verify_isbn13(isbn: &str) -> Result<(), IsbnError> {
    let mut sum = 0u32;
    for (i, c) in isbn.chars().enumerate() {
        let digit = c.to_digit(10).ok_or(IsbnError::InvalidCharacter(c))?;
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }

    if sum % 10 == 0 {
        Ok(())
    } else {
        Err(IsbnError::InvalidChecksum)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Isbn {
    type Error = IsbnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}
