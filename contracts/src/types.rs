//! Common types used across the debt engine.

use odra::prelude::*;
use odra::casper_types::U256;

/// Per-asset configuration and freeze-tracking state.
///
/// An asset is supported iff a config exists for its token address; a removed
/// collateral balance is indistinguishable from zero, so no per-account
/// bookkeeping of "known" accounts is kept.
#[odra::odra_type]
pub struct AssetConfig {
    /// Price feed contract address for this asset (USD, 8 decimals)
    pub feed: Address,
    /// Whether the asset is frozen (all mutations naming it are blocked)
    pub frozen: bool,
    /// Last price recorded by a drop check (8 decimals, 0 = never observed)
    pub last_observed_price: U256,
    /// Timestamp of the last completed drop check (0 = never checked)
    pub last_check_time: u64,
}

/// Latest round reported by a price feed.
#[odra::odra_type]
pub struct PriceRound {
    /// Signed price with 8 decimal places
    pub answer: i64,
    /// Timestamp the answer was last updated
    pub updated_at: u64,
}

/// Freeze-controller configuration.
#[odra::odra_type]
pub struct FreezeParams {
    /// Price drop percentage that freezes an asset (1..=50)
    pub max_drop_pct: u32,
    /// Minimum interval between drop checks, in milliseconds (>= 1 hour)
    pub check_interval: u64,
}

/// Global freeze state snapshot.
#[odra::odra_type]
pub struct SystemStatus {
    /// Whether the system-wide freeze is active
    pub frozen: bool,
    /// Timestamp the system freeze was triggered (0 when not frozen)
    pub frozen_at: u64,
    /// Number of currently frozen assets
    pub frozen_asset_count: u32,
}

/// Account position summary.
#[odra::odra_type]
pub struct AccountInfo {
    /// Outstanding DSC debt (18 decimals)
    pub debt: U256,
    /// Total collateral value in USD (18 decimals)
    pub collateral_value_usd: U256,
    /// Health factor (18 decimals; `U256::MAX` when debt is zero)
    pub health_factor: U256,
}
