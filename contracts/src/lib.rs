//! DSC Debt Engine Contracts
//!
//! Over-collateralized, USD-pegged stablecoin core for Casper.
//!
//! ## Architecture
//!
//! - **DebtEngine**: Multi-asset collateral ledger, DSC debt book, health
//!   invariant enforcement, open liquidation, freeze controller
//! - **Dsc**: Protocol stablecoin with engine-controlled minting
//! - **UsdPriceFeed**: Feeder-updated USD price source (8 decimals)
//! - **OracleClient**: Staleness-guarded price fetching
//!
//! ## Freeze Controller (Circuit Breaker)
//!
//! Price-drop checks freeze individual assets; two frozen assets freeze the
//! whole system. While frozen, all mutating engine operations are blocked.
//! Thawing is admin-driven and gated on price recovery (per asset) plus a
//! 24-hour cooldown (system-wide).

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod events;
pub mod interfaces;
pub mod math;
pub mod oracle;

// Contract modules
pub mod engine;
pub mod price_feed;
pub mod stablecoin;
