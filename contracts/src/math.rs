//! Fixed-point arithmetic for collateral valuation and account health.
//!
//! Prices carry 8 decimal places (feed scale); USD values and DSC amounts
//! carry 18. `FEED_SCALE` lifts an 8-decimal price to the 18-decimal USD
//! scale. All multiplications are checked; an overflow yields `None` and the
//! engine surfaces it as an arithmetic fault. Divisions truncate toward zero.

use odra::casper_types::U256;

/// USD value and stablecoin scale (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Multiplier lifting an 8-decimal feed price to 18 decimals (1e10)
pub const FEED_SCALE: u128 = 10_000_000_000;

/// Collateral is credited at this percentage of market value
pub const LIQ_THRESHOLD: u64 = 50;

/// Divisor for `LIQ_THRESHOLD`
pub const LIQ_PRECISION: u64 = 100;

/// Liquidator bonus, percent of the covered collateral equivalent
pub const LIQ_BONUS: u64 = 10;

/// Minimum health factor (1.0 in 18 decimals)
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Percentage scale used by the freeze controller
pub const PCT_SCALE: u64 = 100;

/// A frozen asset has recovered when its price is at least this percentage
/// of the preserved baseline
pub const RECOVERY_THRESHOLD_PCT: u64 = 90;

/// USD value (18 decimals) of `amount` units of an asset priced at `price`
/// (8 decimals): `price * FEED_SCALE * amount / PRECISION`.
pub fn usd_value(price: U256, amount: U256) -> Option<U256> {
    price
        .checked_mul(U256::from(FEED_SCALE))
        .and_then(|scaled| scaled.checked_mul(amount))
        .map(|value| value / U256::from(PRECISION))
}

/// Asset amount (18 decimals) worth `usd` (18 decimals) at `price`
/// (8 decimals): `usd * PRECISION / (price * FEED_SCALE)`.
///
/// The caller must have validated `price > 0`.
pub fn asset_amount(price: U256, usd: U256) -> Option<U256> {
    let denominator = price.checked_mul(U256::from(FEED_SCALE))?;
    usd.checked_mul(U256::from(PRECISION))
        .and_then(|scaled| scaled.checked_div(denominator))
}

/// Health factor of an account (18 decimals).
///
/// Zero debt means the account cannot be unhealthy: returns `U256::MAX`.
/// Otherwise `collateral_usd * LIQ_THRESHOLD / LIQ_PRECISION * PRECISION / debt`.
pub fn health_factor(debt: U256, collateral_usd: U256) -> Option<U256> {
    if debt.is_zero() {
        return Some(U256::MAX);
    }
    let adjusted = collateral_usd
        .checked_mul(U256::from(LIQ_THRESHOLD))?
        / U256::from(LIQ_PRECISION);
    adjusted
        .checked_mul(U256::from(PRECISION))
        .map(|scaled| scaled / debt)
}

/// Percentage drop from `last` to `current`, truncated.
///
/// A price increase is a 0% drop (checked subtract, never underflow).
/// `last` must be non-zero (the first-observation branch never reaches here).
pub fn price_drop_pct(last: U256, current: U256) -> Option<U256> {
    let diff = match last.checked_sub(current) {
        Some(diff) => diff,
        None => return Some(U256::zero()),
    };
    diff.checked_mul(U256::from(PCT_SCALE))
        .and_then(|scaled| scaled.checked_div(last))
}

/// Recovery predicate for a frozen asset: `current >= last * 90 / 100`.
pub fn recovered(last: U256, current: U256) -> Option<bool> {
    let threshold = last.checked_mul(U256::from(RECOVERY_THRESHOLD_PCT))?
        / U256::from(PCT_SCALE);
    Some(current >= threshold)
}
