//! USD price feed contract.
//!
//! Feeder-updated 8-decimal price source the engine is wired to at deploy
//! time. The feeder (set at init) pushes rounds; consumers read
//! `latest_round` and apply their own staleness policy.

use odra::prelude::*;

use crate::errors::DscError;
use crate::oracle::FEED_DECIMALS;
use crate::types::PriceRound;

/// USD price feed with a single authorized feeder.
#[odra::module]
pub struct UsdPriceFeed {
    /// Account allowed to push new rounds
    feeder: Var<Address>,
    /// Latest answer (8 decimals)
    answer: Var<i64>,
    /// Timestamp of the latest answer
    updated_at: Var<u64>,
}

#[odra::module]
impl UsdPriceFeed {
    /// Initialize the feed with a first answer; the deployer becomes the feeder.
    pub fn init(&mut self, answer: i64) {
        self.feeder.set(self.env().caller());
        self.answer.set(answer);
        self.updated_at.set(self.env().get_block_time());
    }

    /// Push a new round (feeder only).
    pub fn set_answer(&mut self, answer: i64) {
        self.require_feeder();
        self.answer.set(answer);
        self.updated_at.set(self.env().get_block_time());
    }

    /// Latest round data.
    pub fn latest_round(&self) -> PriceRound {
        PriceRound {
            answer: self.answer.get().unwrap_or_default(),
            updated_at: self.updated_at.get().unwrap_or_default(),
        }
    }

    /// Decimal places of the answer.
    pub fn decimals(&self) -> u8 {
        FEED_DECIMALS
    }

    /// Get the authorized feeder.
    pub fn get_feeder(&self) -> Option<Address> {
        self.feeder.get()
    }

    fn require_feeder(&self) {
        if self.feeder.get() != Some(self.env().caller()) {
            self.env().revert(DscError::Unauthorized);
        }
    }
}
