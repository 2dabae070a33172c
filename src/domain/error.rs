//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new`-style constructors when an input
//! would break a domain invariant, e.g. a pair whose base equals its quote.
//!
//! # Examples
//!
//! ```
//! use fxcompare::domain::{Currency, CurrencyPair, DomainError};
//!
//! let usd = Currency::new("USD").unwrap();
//! let result = CurrencyPair::try_new(usd.clone(), usd);
//!
//! assert!(matches!(result, Err(DomainError::SameCurrency { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Currency codes are three ASCII letters.
    #[error("invalid currency code `{code}`")]
    InvalidCurrency {
        /// The rejected input.
        code: String,
    },

    /// A pair must quote one currency in terms of another.
    #[error("pair base and quote are both {currency}")]
    SameCurrency {
        /// The repeated currency code.
        currency: String,
    },

    /// Pairs are written `BASE/QUOTE`.
    #[error("malformed currency pair `{input}` (expected BASE/QUOTE)")]
    MalformedPair {
        /// The rejected input.
        input: String,
    },

    /// Successful readings carry a strictly positive value.
    #[error("rate must be positive, got {value}")]
    NonPositiveRate {
        /// The rejected value.
        value: Decimal,
    },

    /// Arbitrage thresholds are strictly positive.
    #[error("threshold must be positive, got {value}")]
    NonPositiveThreshold {
        /// The rejected value.
        value: Decimal,
    },

    /// The intermediate currency of a cross route must differ from both ends.
    #[error("cannot route {target} via {via}")]
    InvalidRoute {
        /// The pair the route should produce.
        target: String,
        /// The intermediate currency.
        via: String,
    },
}
