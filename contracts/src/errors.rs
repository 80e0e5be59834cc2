//! Protocol error definitions.

use odra::prelude::*;

/// Debt engine errors.
///
/// Discriminants are grouped by subsystem so revert codes stay stable and
/// readable off-chain.
#[odra::odra_error]
pub enum DscError {
    // Operation guards (1xx)
    AmountZero = 100,
    AssetUnsupported = 101,
    Reentered = 102,

    // Oracle errors (2xx)
    OracleStale = 200,
    OracleFault = 201,

    // Health and liquidation errors (3xx)
    LowHealthFactor = 300,
    HealthOk = 301,
    HealthNotImproved = 302,
    InsufficientCollateral = 303,
    RepayExceedsDebt = 304,

    // Freeze errors (4xx)
    AssetFrozen = 400,
    SystemFrozen = 401,
    CheckTooSoon = 402,
    PriceDropExceeded = 403,
    NotFrozen = 404,
    TooEarly = 405,

    // Token errors (5xx)
    TransferFailed = 500,
    MintFailed = 501,
    InsufficientTokenBalance = 502,
    InsufficientAllowance = 503,

    // Access control, configuration and arithmetic errors (6xx)
    Unauthorized = 600,
    BadConfig = 601,
    Overflow = 602,
}
