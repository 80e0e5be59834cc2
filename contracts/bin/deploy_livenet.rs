//! Deploy contracts to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --features livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000

use std::str::FromStr;

use odra::host::{Deployer, HostRef, NoArgs};
use odra::prelude::*;

use dsc_engine_contracts::engine::{DebtEngine, DebtEngineInitArgs};
use dsc_engine_contracts::price_feed::{UsdPriceFeed, UsdPriceFeedInitArgs};
use dsc_engine_contracts::stablecoin::Dsc;

/// Initial ETH/USD answer, 8 decimals
const ETH_USD_ANSWER: i64 = 2_000_0000_0000;
/// Initial BTC/USD answer, 8 decimals
const BTC_USD_ANSWER: i64 = 30_000_0000_0000;

/// Freeze an asset on a 10% drop between checks
const MAX_DROP_PCT: u32 = 10;
/// Check prices at most once per hour
const CHECK_INTERVAL: u64 = 60 * 60 * 1000;

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== DSC Debt Engine Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200_000_000_000);
    env.set_gas(payment_amount);

    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // Collateral token addresses (wrapped ETH / wrapped BTC CEP-18 contracts)
    let weth = Address::from_str(
        &std::env::var("DSC_WETH_TOKEN_ADDRESS").expect("DSC_WETH_TOKEN_ADDRESS not set"),
    )
    .expect("invalid wETH address");
    let wbtc = Address::from_str(
        &std::env::var("DSC_WBTC_TOKEN_ADDRESS").expect("DSC_WBTC_TOKEN_ADDRESS not set"),
    )
    .expect("invalid wBTC address");

    println!("Deploying price feeds...");
    let eth_feed = UsdPriceFeed::deploy(
        &env,
        UsdPriceFeedInitArgs {
            answer: ETH_USD_ANSWER,
        },
    );
    println!("ETH/USD feed deployed at: {:?}", eth_feed.address().clone());
    let btc_feed = UsdPriceFeed::deploy(
        &env,
        UsdPriceFeedInitArgs {
            answer: BTC_USD_ANSWER,
        },
    );
    println!("BTC/USD feed deployed at: {:?}", btc_feed.address().clone());

    println!("Deploying DSC stablecoin...");
    let mut dsc = Dsc::deploy(&env, NoArgs);
    println!("DSC deployed at: {:?}", dsc.address().clone());

    println!("Deploying debt engine...");
    let engine = DebtEngine::deploy(
        &env,
        DebtEngineInitArgs {
            dsc: dsc.address().clone(),
            tokens: vec![weth, wbtc],
            feeds: vec![eth_feed.address().clone(), btc_feed.address().clone()],
            max_drop_pct: MAX_DROP_PCT,
            check_interval: CHECK_INTERVAL,
        },
    );
    println!("DebtEngine deployed at: {:?}", engine.address().clone());

    println!("Wiring engine as DSC minter...");
    dsc.add_minter(engine.address().clone());

    println!();
    println!("=== Deployment complete ===");
}
