//! Debt engine events.
//!
//! Events are advisory: they are emitted after the corresponding ledger
//! mutation and no invariant depends on them.

use odra::prelude::*;
use odra::casper_types::U256;

#[odra::event]
pub struct CollateralDeposited {
    pub user: Address,
    pub token: Address,
    pub amount: U256,
}

#[odra::event]
pub struct CollateralRedeemed {
    pub from: Address,
    pub to: Address,
    pub token: Address,
    pub amount: U256,
}

#[odra::event]
pub struct DscMinted {
    pub user: Address,
    pub amount: U256,
}

#[odra::event]
pub struct DscBurned {
    pub user: Address,
    pub amount: U256,
}

#[odra::event]
pub struct Liquidated {
    pub liquidator: Address,
    pub user: Address,
    pub token: Address,
    pub debt_covered: U256,
    pub collateral_seized: U256,
}

#[odra::event]
pub struct AssetFrozen {
    pub token: Address,
    pub last_price: U256,
    pub current_price: U256,
    pub drop_pct: U256,
}

#[odra::event]
pub struct SystemFrozen {
    pub frozen_count: u32,
}

#[odra::event]
pub struct SystemUnfrozen {}
