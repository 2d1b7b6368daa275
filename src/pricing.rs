//! Pricing
//!
//! Prices are held as [`Money`] in integer minor units. The store API and the
//! persisted cart speak in major units, so conversions happen at those edges
//! only.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while converting a major-unit amount into money.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Prices are never negative.
    #[error("price {0} must not be negative")]
    Negative(Decimal),

    /// The amount does not fit in the currency's minor units.
    #[error("price {amount} cannot be represented in {currency} minor units")]
    OutOfRange {
        /// Offending amount
        amount: Decimal,
        /// ISO code of the target currency
        currency: &'static str,
    },
}

/// Convert a major-unit amount (e.g. `1499.99`) into money, rounding to the
/// currency's minor unit.
///
/// # Errors
///
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::OutOfRange`]: the amount overflows an `i64` of minor units.
pub fn money_from_major(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    let out_of_range = || PriceError::OutOfRange {
        amount,
        currency: currency.iso_alpha_code,
    };

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or_else(out_of_range)?;

    let minor_units = amount
        .checked_mul(Decimal::from(scale))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(out_of_range)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Express money in major units, as stored and sent to the API.
pub fn money_to_major(money: &Money<'_, Currency>) -> Decimal {
    money.amount().normalize()
}

/// Price of `quantity` units, saturating rather than overflowing.
pub fn line_total(
    unit_price: &Money<'static, Currency>,
    quantity: u32,
) -> Money<'static, Currency> {
    let minor_units = unit_price
        .to_minor_units()
        .saturating_mul(i64::from(quantity));

    Money::from_minor(minor_units, unit_price.currency())
}

/// Sum of every item's line total, in the given currency.
///
/// An empty slice totals zero.
pub fn total_price(items: &[LineItem], currency: &'static Currency) -> Money<'static, Currency> {
    let minor_units = items.iter().fold(0_i64, |acc, item| {
        acc.saturating_add(item.line_total().to_minor_units())
    });

    Money::from_minor(minor_units, currency)
}
