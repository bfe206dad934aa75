//! Order confirmation numbers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderNumberError {
    #[error("order number must start with {prefix}")]
    MissingPrefix { prefix: &'static str },
    #[error("order code must be {expected} characters (got {actual})")]
    WrongLength { expected: usize, actual: usize },
    #[error("order code may only contain A-Z and 0-9")]
    InvalidCharacter,
}

/// A locally generated order number such as `ORD-K3Q9ZP0LM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

impl OrderNumber {
    pub const PREFIX: &'static str = "ORD-";
    pub const CODE_LENGTH: usize = 9;
    /// Characters an order code is drawn from.
    pub const ALPHABET: &'static [u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Build an order number from its code (the part after `ORD-`).
    ///
    /// # Errors
    ///
    /// Returns an error if the code has the wrong length or contains
    /// characters outside [`Self::ALPHABET`].
    pub fn from_code(code: &str) -> Result<Self, OrderNumberError> {
        let actual = code.chars().count();
        if actual != Self::CODE_LENGTH {
            return Err(OrderNumberError::WrongLength {
                expected: Self::CODE_LENGTH,
                actual,
            });
        }
        if !code.bytes().all(|b| Self::ALPHABET.contains(&b)) {
            return Err(OrderNumberError::InvalidCharacter);
        }
        Ok(Self(format!("{}{code}", Self::PREFIX)))
    }

    /// Parse a full order number, prefix included.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is missing or the code is malformed.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let code = s
            .trim()
            .strip_prefix(Self::PREFIX)
            .ok_or(OrderNumberError::MissingPrefix {
                prefix: Self::PREFIX,
            })?;
        Self::from_code(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code without the `ORD-` prefix.
    #[must_use]
    pub fn code(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::str::FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.strip_prefix('#').unwrap_or(s))
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = OrderNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderNumber> for String {
    fn from(number: OrderNumber) -> Self {
        number.0
    }
}
