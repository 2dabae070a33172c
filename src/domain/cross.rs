//! Synthetic cross rates derived from two chained legs.
//!
//! A cross rate for A/C is the product of A/B and B/C. The legs must chain
//! (the quote of the first is the base of the second); [`CrossRoute`]
//! validates that once, at construction, so [`CrossRoute::derive`] itself
//! never checks currencies at runtime.

use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::{Currency, CurrencyPair};
use super::error::DomainError;
use super::reading::RateReading;

/// A validated route `target = base/via × via/quote`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRoute {
    target: CurrencyPair,
    first_leg: CurrencyPair,
    second_leg: CurrencyPair,
}

impl CrossRoute {
    /// Route `target` through the `via` currency.
    pub fn new(target: CurrencyPair, via: Currency) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidRoute {
            target: target.to_string(),
            via: via.to_string(),
        };
        let first_leg =
            CurrencyPair::try_new(target.base().clone(), via.clone()).map_err(|_| invalid())?;
        let second_leg =
            CurrencyPair::try_new(via.clone(), target.quote().clone()).map_err(|_| invalid())?;

        Ok(Self {
            target,
            first_leg,
            second_leg,
        })
    }

    /// The pair the route synthesizes (A/C).
    pub fn target(&self) -> &CurrencyPair {
        &self.target
    }

    /// A/B.
    pub fn first_leg(&self) -> &CurrencyPair {
        &self.first_leg
    }

    /// B/C.
    pub fn second_leg(&self) -> &CurrencyPair {
        &self.second_leg
    }

    /// Derive the cross rate from readings for the two legs.
    ///
    /// The value is present only when both legs are `Ok`.
    pub fn derive(&self, leg_ab: RateReading, leg_bc: RateReading) -> CrossRateResult {
        debug_assert_eq!(leg_ab.pair(), &self.first_leg);
        debug_assert_eq!(leg_bc.pair(), &self.second_leg);
        debug_assert!(leg_ab.pair().chains_into(leg_bc.pair()));

        let value = match (leg_ab.value(), leg_bc.value()) {
            (Some(ab), Some(bc)) if ab > Decimal::ZERO && bc > Decimal::ZERO => ab.checked_mul(bc),
            _ => None,
        };

        CrossRateResult {
            derived_pair: self.target.clone(),
            value,
            legs: (leg_ab, leg_bc),
        }
    }
}

/// Cross rate together with the legs it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct CrossRateResult {
    derived_pair: CurrencyPair,
    value: Option<Decimal>,
    legs: (RateReading, RateReading),
}

impl CrossRateResult {
    pub fn derived_pair(&self) -> &CurrencyPair {
        &self.derived_pair
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn legs(&self) -> (&RateReading, &RateReading) {
        (&self.legs.0, &self.legs.1)
    }
}
