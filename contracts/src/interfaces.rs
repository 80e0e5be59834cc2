//! External contract interfaces consumed by the debt engine.
//!
//! The engine is polymorphic over assets: any contract exposing the CEP-18
//! subset below can serve as collateral, and any feed exposing `latest_round`
//! can price it. The stablecoin is a distinct capability set because only the
//! engine may drive its supply.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::types::PriceRound;

/// CEP-18 subset required of a collateral asset.
///
/// A `false` return is a transfer failure; the engine aborts the operation.
#[odra::external_contract]
pub trait CollateralToken {
    fn transfer(&mut self, recipient: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
    fn balance_of(&self, account: Address) -> U256;
}

/// Mint/burn capability set of the stablecoin.
///
/// `burn` burns the caller's own balance; the engine pulls DSC to itself
/// first, then burns.
#[odra::external_contract]
pub trait StablecoinToken {
    fn mint(&mut self, to: Address, amount: U256) -> bool;
    fn burn(&mut self, amount: U256);
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
}

/// USD price feed with 8 decimal places.
#[odra::external_contract]
pub trait PriceFeed {
    fn latest_round(&self) -> PriceRound;
    fn decimals(&self) -> u8;
}
