//! Currency codes and ordered currency pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// ISO-like currency code, normalized to upper case.
///
/// The inner String is private so every code goes through validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Validate and normalize a currency code (`usd` becomes `USD`).
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = code.as_ref().trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency {
                code: code.to_string(),
            });
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Built-in code that is known to be valid.
    pub(crate) fn known(code: &'static str) -> Self {
        debug_assert!(Self::new(code).is_ok(), "invalid built-in currency {code}");
        Self(code.to_string())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

/// Ordered pair of currencies: the price of one `base` unit in `quote`.
///
/// Invariant: `base != quote`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: Currency,
    quote: Currency,
}

impl CurrencyPair {
    /// Create a pair, rejecting identical base and quote.
    pub fn try_new(base: Currency, quote: Currency) -> Result<Self, DomainError> {
        if base == quote {
            return Err(DomainError::SameCurrency {
                currency: base.to_string(),
            });
        }
        Ok(Self { base, quote })
    }

    /// Built-in pair of known-valid, distinct codes.
    pub(crate) fn known(base: &'static str, quote: &'static str) -> Self {
        debug_assert_ne!(base, quote);
        Self {
            base: Currency::known(base),
            quote: Currency::known(quote),
        }
    }

    /// The currency being priced.
    pub fn base(&self) -> &Currency {
        &self.base
    }

    /// The currency the price is expressed in.
    pub fn quote(&self) -> &Currency {
        &self.quote
    }

    /// Whether `next` continues this pair into a chain (A/B then B/C).
    pub fn chains_into(&self, next: &CurrencyPair) -> bool {
        self.quote == next.base
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((base, quote)) = s.split_once('/') else {
            return Err(DomainError::MalformedPair {
                input: s.to_string(),
            });
        };
        Self::try_new(Currency::new(base)?, Currency::new(quote)?)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(value: CurrencyPair) -> Self {
        value.to_string()
    }
}
