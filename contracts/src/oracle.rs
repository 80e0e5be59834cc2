//! Price feed client.
//!
//! Thin helper over the `PriceFeed` external contract. Every price consumed
//! by the engine goes through [`OracleClient::fetch_price`], which enforces
//! the staleness window and rejects non-positive answers before the value
//! reaches any arithmetic.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractEnv;
use odra::ContractRef;

use crate::errors::DscError;
use crate::interfaces::PriceFeedContractRef;

/// Quotes older than this are rejected (1 hour, milliseconds)
pub const MAX_PRICE_AGE_MILLIS: u64 = 60 * 60 * 1000;

/// Decimal places expected from every feed
pub const FEED_DECIMALS: u8 = 8;

/// Stateless price feed client.
pub struct OracleClient;

impl OracleClient {
    /// Fetch the latest validated price from `feed`.
    ///
    /// Reverts with `OracleFault` on a non-positive answer (a zero price
    /// would divide by zero downstream) and `OracleStale` when the quote is
    /// older than [`MAX_PRICE_AGE_MILLIS`]. Returns the price as an unsigned
    /// 8-decimal integer.
    pub fn fetch_price(env: &ContractEnv, feed: Address) -> U256 {
        let round = PriceFeedContractRef::new(env.clone().into(), feed).latest_round();
        if round.answer <= 0 {
            env.revert(DscError::OracleFault);
        }
        let now = env.get_block_time();
        if now.saturating_sub(round.updated_at) > MAX_PRICE_AGE_MILLIS {
            env.revert(DscError::OracleStale);
        }
        U256::from(round.answer as u64)
    }
}
