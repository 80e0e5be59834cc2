//! Debt Engine Contract
//!
//! Core of the protocol: holds the multi-asset collateral ledger and the DSC
//! debt book, enforces the per-account health invariant on every mutation,
//! exposes open liquidation of unhealthy accounts, and runs the freeze
//! controller that halts mutations when a price feed reports an abnormal
//! drop.
//!
//! Ordering discipline: ledger mutations are committed before external token
//! calls, and every mutating entry point (except `burn_dsc`, which can only
//! improve an account) holds a binary non-reentrancy lock for its duration.
//! A revert at any point rolls back all state changes of the call, so a
//! failed external call never leaves a partial mutation behind.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;

use crate::errors::DscError;
use crate::events;
use crate::interfaces::{CollateralTokenContractRef, StablecoinTokenContractRef};
use crate::math;
use crate::oracle::OracleClient;
use crate::types::{AccountInfo, AssetConfig, FreezeParams, SystemStatus};

/// Hard ceiling for the configurable freeze trigger
const MAX_DROP_PCT_CEILING: u32 = 50;

/// Lower bound for the drop-check interval (1 hour, milliseconds)
const MIN_CHECK_INTERVAL: u64 = 60 * 60 * 1000;

/// A system freeze can be lifted this long after it triggered (24 hours)
const MIN_FREEZE_DURATION: u64 = 24 * 60 * 60 * 1000;

/// Number of simultaneously frozen assets that freezes the whole system
const ASSET_FREEZE_THRESHOLD: u32 = 2;

/// Debt Engine Contract
#[odra::module(events = [
    events::CollateralDeposited,
    events::CollateralRedeemed,
    events::DscMinted,
    events::DscBurned,
    events::Liquidated,
    events::AssetFrozen,
    events::SystemFrozen,
    events::SystemUnfrozen
])]
pub struct DebtEngine {
    /// Admin account (freeze parameter updates, thaw operations)
    admin: Var<Address>,
    /// DSC stablecoin contract address
    dsc: Var<Address>,
    /// Supported asset configuration keyed by token address
    assets: Mapping<Address, AssetConfig>,
    /// Supported token addresses, for collateral-value enumeration
    asset_list: Var<Vec<Address>>,
    /// Collateral balances: (account, token) -> amount
    collateral: Mapping<(Address, Address), U256>,
    /// DSC debt per account
    debt: Mapping<Address, U256>,
    /// Total collateral held per token
    total_collateral: Mapping<Address, U256>,
    /// Total DSC debt across all accounts
    total_debt: Var<U256>,
    /// Whether the system-wide freeze is active
    system_frozen: Var<bool>,
    /// Timestamp the system freeze was triggered
    system_frozen_at: Var<u64>,
    /// Number of currently frozen assets
    frozen_asset_count: Var<u32>,
    /// Freeze controller configuration
    freeze_params: Var<FreezeParams>,
    /// Non-reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl DebtEngine {
    /// Initialize the engine.
    ///
    /// `tokens` and `feeds` pair each collateral token with its USD price
    /// feed; the supported-asset set is fixed for the lifetime of the
    /// contract. The deployer becomes the admin.
    pub fn init(
        &mut self,
        dsc: Address,
        tokens: Vec<Address>,
        feeds: Vec<Address>,
        max_drop_pct: u32,
        check_interval: u64,
    ) {
        if tokens.is_empty() || tokens.len() != feeds.len() {
            self.env().revert(DscError::BadConfig);
        }
        self.require_valid_params(max_drop_pct, check_interval);

        self.admin.set(self.env().caller());
        self.dsc.set(dsc);

        for (token, feed) in tokens.iter().zip(feeds.iter()) {
            // A token listed twice would double-count its collateral value.
            if self.assets.get(token).is_some() {
                self.env().revert(DscError::BadConfig);
            }
            self.assets.set(
                token,
                AssetConfig {
                    feed: *feed,
                    frozen: false,
                    last_observed_price: U256::zero(),
                    last_check_time: 0,
                },
            );
        }
        self.asset_list.set(tokens);

        self.freeze_params.set(FreezeParams {
            max_drop_pct,
            check_interval,
        });
        self.total_debt.set(U256::zero());
        self.system_frozen.set(false);
        self.system_frozen_at.set(0);
        self.frozen_asset_count.set(0);
        self.locked.set(false);
    }

    // ========== Collateral and Debt Operations ==========

    /// Deposit collateral. Pulls `amount` of `token` from the caller.
    pub fn deposit_collateral(&mut self, token: Address, amount: U256) {
        self.enter();
        let caller = self.env().caller();
        self.do_deposit(caller, token, amount);
        self.exit();
    }

    /// Mint DSC against the caller's collateral.
    pub fn mint_dsc(&mut self, amount: U256) {
        self.enter();
        let caller = self.env().caller();
        self.do_mint(caller, amount);
        self.exit();
    }

    /// Deposit collateral and mint DSC in one transaction.
    pub fn deposit_collateral_and_mint_dsc(
        &mut self,
        token: Address,
        collateral_amount: U256,
        mint_amount: U256,
    ) {
        self.enter();
        let caller = self.env().caller();
        self.do_deposit(caller, token, collateral_amount);
        self.do_mint(caller, mint_amount);
        self.exit();
    }

    /// Burn DSC, reducing the caller's debt. Pulls the DSC from the caller.
    pub fn burn_dsc(&mut self, amount: U256) {
        let caller = self.env().caller();
        self.do_burn(caller, caller, amount);
        self.require_healthy(caller);
    }

    /// Redeem collateral. Pushes `amount` of `token` to the caller.
    pub fn redeem_collateral(&mut self, token: Address, amount: U256) {
        self.enter();
        let caller = self.env().caller();
        self.do_redeem(caller, caller, token, amount);
        self.require_healthy(caller);
        self.exit();
    }

    /// Burn DSC and redeem collateral in one transaction (burn first).
    pub fn redeem_collateral_for_dsc(
        &mut self,
        token: Address,
        collateral_amount: U256,
        dsc_amount: U256,
    ) {
        self.enter();
        let caller = self.env().caller();
        self.do_burn(caller, caller, dsc_amount);
        self.do_redeem(caller, caller, token, collateral_amount);
        self.require_healthy(caller);
        self.exit();
    }

    /// Liquidate an unhealthy account.
    ///
    /// The caller covers `debt_to_cover` of `user`'s debt in DSC and receives
    /// the collateral equivalent at the current price plus a 10% bonus.
    /// Partial liquidation is supported. When collateral value has collapsed
    /// below the covered debt plus bonus, the seizure underflows the victim's
    /// balance and the operation is unavailable until conditions improve.
    pub fn liquidate(&mut self, token: Address, user: Address, debt_to_cover: U256) {
        self.enter();
        let caller = self.env().caller();
        self.require_positive(debt_to_cover);
        self.require_system_live();

        let config = self.require_supported(token);
        self.require_asset_live(&config);
        let starting_health = self.health_of(user);
        if starting_health >= U256::from(math::MIN_HEALTH_FACTOR) {
            self.env().revert(DscError::HealthOk);
        }

        let price = self.validated_price(&config);
        let base = math::asset_amount(price, debt_to_cover)
            .unwrap_or_else(|| self.env().revert(DscError::Overflow));
        let bonus = base * U256::from(math::LIQ_BONUS) / U256::from(math::LIQ_PRECISION);
        let seized = base + bonus;

        self.do_redeem(user, caller, token, seized);
        self.do_burn(user, caller, debt_to_cover);

        let ending_health = self.health_of(user);
        if ending_health <= starting_health {
            self.env().revert(DscError::HealthNotImproved);
        }
        self.require_healthy(caller);

        self.env().emit_event(events::Liquidated {
            liquidator: caller,
            user,
            token,
            debt_covered: debt_to_cover,
            collateral_seized: seized,
        });
        self.exit();
    }

    // ========== Freeze Controller ==========

    /// Run a price-drop check for `token`. Open to any keeper.
    ///
    /// Returns `true` when the check froze the asset. On a freeze the
    /// pre-drop baseline is preserved; recovery is measured against it.
    pub fn check_price_drop(&mut self, token: Address) -> bool {
        self.require_system_live();
        let mut config = self.require_supported(token);
        if config.frozen {
            self.env().revert(DscError::AssetFrozen);
        }

        let now = self.env().get_block_time();
        let params = self.params();
        if config.last_check_time != 0 && now - config.last_check_time < params.check_interval {
            self.env().revert(DscError::CheckTooSoon);
        }

        let current = self.validated_price(&config);

        // First observation only records the baseline.
        if config.last_observed_price.is_zero() {
            config.last_observed_price = current;
            config.last_check_time = now;
            self.assets.set(&token, config);
            return false;
        }

        let drop_pct = math::price_drop_pct(config.last_observed_price, current)
            .unwrap_or_else(|| self.env().revert(DscError::Overflow));
        if drop_pct >= U256::from(params.max_drop_pct) {
            let last_price = config.last_observed_price;
            config.frozen = true;
            self.assets.set(&token, config);

            let count = self.frozen_asset_count.get_or_default() + 1;
            self.frozen_asset_count.set(count);
            self.env().emit_event(events::AssetFrozen {
                token,
                last_price,
                current_price: current,
                drop_pct,
            });

            if count >= ASSET_FREEZE_THRESHOLD && !self.system_frozen.get_or_default() {
                self.system_frozen.set(true);
                self.system_frozen_at.set(now);
                self.env().emit_event(events::SystemFrozen {
                    frozen_count: count,
                });
            }
            return true;
        }

        config.last_observed_price = current;
        config.last_check_time = now;
        self.assets.set(&token, config);
        false
    }

    /// Unfreeze a single asset (admin only).
    ///
    /// Requires the current price to have recovered to at least 90% of the
    /// preserved baseline. Clearing the last frozen asset also lifts a
    /// system freeze.
    pub fn unfreeze_asset(&mut self, token: Address) {
        self.require_admin();
        let mut config = self.require_supported(token);
        if !config.frozen {
            self.env().revert(DscError::NotFrozen);
        }

        let current = self.validated_price(&config);
        let ok = math::recovered(config.last_observed_price, current)
            .unwrap_or_else(|| self.env().revert(DscError::Overflow));
        if !ok {
            self.env().revert(DscError::PriceDropExceeded);
        }

        config.frozen = false;
        self.assets.set(&token, config);

        let count = self.frozen_asset_count.get_or_default().saturating_sub(1);
        self.frozen_asset_count.set(count);

        if count == 0 && self.system_frozen.get_or_default() {
            self.system_frozen.set(false);
            self.system_frozen_at.set(0);
            self.env().emit_event(events::SystemUnfrozen {});
        }
    }

    /// Lift a system freeze (admin only).
    ///
    /// Requires 24 hours since the freeze triggered and recovery of every
    /// frozen asset. Clears all per-asset freezes.
    pub fn unfreeze_system(&mut self) {
        self.require_admin();
        if !self.system_frozen.get_or_default() {
            self.env().revert(DscError::NotFrozen);
        }

        let now = self.env().get_block_time();
        if now < self.system_frozen_at.get_or_default() + MIN_FREEZE_DURATION {
            self.env().revert(DscError::TooEarly);
        }

        for token in self.asset_list.get_or_default() {
            let mut config = match self.assets.get(&token) {
                Some(config) if config.frozen => config,
                _ => continue,
            };
            let current = self.validated_price(&config);
            let ok = math::recovered(config.last_observed_price, current)
                .unwrap_or_else(|| self.env().revert(DscError::Overflow));
            if !ok {
                self.env().revert(DscError::PriceDropExceeded);
            }
            config.frozen = false;
            self.assets.set(&token, config);
        }

        self.frozen_asset_count.set(0);
        self.system_frozen.set(false);
        self.system_frozen_at.set(0);
        self.env().emit_event(events::SystemUnfrozen {});
    }

    /// Update freeze parameters (admin only).
    pub fn update_parameters(&mut self, max_drop_pct: u32, check_interval: u64) {
        self.require_admin();
        self.require_valid_params(max_drop_pct, check_interval);
        self.freeze_params.set(FreezeParams {
            max_drop_pct,
            check_interval,
        });
    }

    // ========== Query Functions ==========

    /// Collateral balance of `account` in `token`.
    pub fn get_collateral_balance(&self, account: Address, token: Address) -> U256 {
        self.collateral.get(&(account, token)).unwrap_or_default()
    }

    /// DSC debt of `account`.
    pub fn get_debt(&self, account: Address) -> U256 {
        self.debt.get(&account).unwrap_or_default()
    }

    /// Total USD value (18 decimals) of all collateral held for `account`.
    pub fn get_account_collateral_value(&self, account: Address) -> U256 {
        self.collateral_value_of(account)
    }

    /// Health factor of `account` (18 decimals; `U256::MAX` with no debt).
    pub fn get_health_factor(&self, account: Address) -> U256 {
        self.health_of(account)
    }

    /// Position summary for `account`.
    pub fn get_account_info(&self, account: Address) -> AccountInfo {
        let debt = self.get_debt(account);
        let collateral_value_usd = self.collateral_value_of(account);
        let health_factor = math::health_factor(debt, collateral_value_usd)
            .unwrap_or_else(|| self.env().revert(DscError::Overflow));
        AccountInfo {
            debt,
            collateral_value_usd,
            health_factor,
        }
    }

    /// USD value (18 decimals) of `amount` units of `token`.
    pub fn get_usd_value(&self, token: Address, amount: U256) -> U256 {
        let config = self.require_supported(token);
        let price = self.validated_price(&config);
        math::usd_value(price, amount)
            .unwrap_or_else(|| self.env().revert(DscError::Overflow))
    }

    /// Amount of `token` (18 decimals) worth `usd` (18 decimals).
    pub fn get_token_amount_from_usd(&self, token: Address, usd: U256) -> U256 {
        let config = self.require_supported(token);
        let price = self.validated_price(&config);
        math::asset_amount(price, usd)
            .unwrap_or_else(|| self.env().revert(DscError::Overflow))
    }

    /// Supported collateral token addresses.
    pub fn get_supported_assets(&self) -> Vec<Address> {
        self.asset_list.get_or_default()
    }

    /// Configuration and freeze state for `token`.
    pub fn get_asset_config(&self, token: Address) -> Option<AssetConfig> {
        self.assets.get(&token)
    }

    /// Whether `token` is frozen.
    pub fn is_asset_frozen(&self, token: Address) -> bool {
        self.assets.get(&token).map(|config| config.frozen).unwrap_or(false)
    }

    /// Global freeze state snapshot.
    pub fn get_system_status(&self) -> SystemStatus {
        SystemStatus {
            frozen: self.system_frozen.get_or_default(),
            frozen_at: self.system_frozen_at.get_or_default(),
            frozen_asset_count: self.frozen_asset_count.get_or_default(),
        }
    }

    /// Freeze controller configuration.
    pub fn get_freeze_params(&self) -> FreezeParams {
        self.params()
    }

    /// Total collateral held in `token` across all accounts.
    pub fn get_total_collateral(&self, token: Address) -> U256 {
        self.total_collateral.get(&token).unwrap_or_default()
    }

    /// Total DSC debt across all accounts.
    pub fn get_total_debt(&self) -> U256 {
        self.total_debt.get_or_default()
    }

    /// Admin account.
    pub fn get_admin(&self) -> Option<Address> {
        self.admin.get()
    }

    /// DSC stablecoin contract address.
    pub fn get_dsc_token(&self) -> Option<Address> {
        self.dsc.get()
    }

    // ========== Constant Getters ==========

    /// USD value and stablecoin scale (1e18).
    pub fn get_precision(&self) -> U256 {
        U256::from(math::PRECISION)
    }

    /// Multiplier lifting an 8-decimal feed price to 18 decimals (1e10).
    pub fn get_feed_scale(&self) -> U256 {
        U256::from(math::FEED_SCALE)
    }

    /// Percentage of market value collateral is credited at.
    pub fn get_liquidation_threshold(&self) -> u64 {
        math::LIQ_THRESHOLD
    }

    /// Divisor for the liquidation threshold.
    pub fn get_liquidation_precision(&self) -> u64 {
        math::LIQ_PRECISION
    }

    /// Liquidator bonus percentage.
    pub fn get_liquidation_bonus(&self) -> u64 {
        math::LIQ_BONUS
    }

    /// Minimum health factor (1.0 in 18 decimals).
    pub fn get_min_health_factor(&self) -> U256 {
        U256::from(math::MIN_HEALTH_FACTOR)
    }

    /// Minimum duration of a system freeze, in milliseconds.
    pub fn get_min_freeze_duration(&self) -> u64 {
        MIN_FREEZE_DURATION
    }

    /// Number of frozen assets that triggers a system freeze.
    pub fn get_asset_freeze_threshold(&self) -> u32 {
        ASSET_FREEZE_THRESHOLD
    }

    // ========== Internal: Operations ==========

    fn do_deposit(&mut self, account: Address, token: Address, amount: U256) {
        self.require_positive(amount);
        self.require_system_live();
        let config = self.require_supported(token);
        self.require_asset_live(&config);

        self.credit_collateral(account, token, amount);
        self.env().emit_event(events::CollateralDeposited {
            user: account,
            token,
            amount,
        });
        self.pull_collateral(token, account, amount);
    }

    fn do_mint(&mut self, account: Address, amount: U256) {
        self.require_positive(amount);
        self.require_system_live();

        self.credit_debt(account, amount);
        self.require_healthy(account);
        self.env().emit_event(events::DscMinted {
            user: account,
            amount,
        });
        self.issue_dsc(account, amount);
    }

    /// Debit `on_behalf_of`'s debt; the DSC itself is pulled from `payer`.
    fn do_burn(&mut self, on_behalf_of: Address, payer: Address, amount: U256) {
        self.require_positive(amount);
        self.require_system_live();

        self.debit_debt(on_behalf_of, amount);
        self.env().emit_event(events::DscBurned {
            user: on_behalf_of,
            amount,
        });
        self.pull_and_burn_dsc(payer, amount);
    }

    /// Debit `from`'s collateral and push it to `to`.
    fn do_redeem(&mut self, from: Address, to: Address, token: Address, amount: U256) {
        self.require_positive(amount);
        self.require_system_live();
        let config = self.require_supported(token);
        self.require_asset_live(&config);

        self.debit_collateral(from, token, amount);
        self.env().emit_event(events::CollateralRedeemed {
            from,
            to,
            token,
            amount,
        });
        self.push_collateral(token, to, amount);
    }

    // ========== Internal: Ledger ==========

    fn credit_collateral(&mut self, account: Address, token: Address, amount: U256) {
        let key = (account, token);
        let balance = self.collateral.get(&key).unwrap_or_default();
        self.collateral.set(&key, balance + amount);

        let total = self.total_collateral.get(&token).unwrap_or_default();
        self.total_collateral.set(&token, total + amount);
    }

    fn debit_collateral(&mut self, account: Address, token: Address, amount: U256) {
        let key = (account, token);
        let balance = self.collateral.get(&key).unwrap_or_default();
        let new_balance = balance
            .checked_sub(amount)
            .unwrap_or_else(|| self.env().revert(DscError::InsufficientCollateral));
        self.collateral.set(&key, new_balance);

        let total = self.total_collateral.get(&token).unwrap_or_default();
        let new_total = total
            .checked_sub(amount)
            .unwrap_or_else(|| self.env().revert(DscError::InsufficientCollateral));
        self.total_collateral.set(&token, new_total);
    }

    fn credit_debt(&mut self, account: Address, amount: U256) {
        let debt = self.debt.get(&account).unwrap_or_default();
        self.debt.set(&account, debt + amount);
        self.total_debt.set(self.total_debt.get_or_default() + amount);
    }

    fn debit_debt(&mut self, account: Address, amount: U256) {
        let debt = self.debt.get(&account).unwrap_or_default();
        let new_debt = debt
            .checked_sub(amount)
            .unwrap_or_else(|| self.env().revert(DscError::RepayExceedsDebt));
        self.debt.set(&account, new_debt);

        let total = self.total_debt.get_or_default();
        let new_total = total
            .checked_sub(amount)
            .unwrap_or_else(|| self.env().revert(DscError::RepayExceedsDebt));
        self.total_debt.set(new_total);
    }

    // ========== Internal: External Calls ==========

    fn pull_collateral(&mut self, token: Address, from: Address, amount: U256) {
        let mut asset = CollateralTokenContractRef::new(self.env().clone(), token);
        if !asset.transfer_from(from, self.env().self_address(), amount) {
            self.env().revert(DscError::TransferFailed);
        }
    }

    fn push_collateral(&mut self, token: Address, to: Address, amount: U256) {
        let mut asset = CollateralTokenContractRef::new(self.env().clone(), token);
        if !asset.transfer(to, amount) {
            self.env().revert(DscError::TransferFailed);
        }
    }

    fn issue_dsc(&mut self, to: Address, amount: U256) {
        let mut dsc = self.dsc_ref();
        if !dsc.mint(to, amount) {
            self.env().revert(DscError::MintFailed);
        }
    }

    fn pull_and_burn_dsc(&mut self, payer: Address, amount: U256) {
        let mut dsc = self.dsc_ref();
        if !dsc.transfer_from(payer, self.env().self_address(), amount) {
            self.env().revert(DscError::TransferFailed);
        }
        dsc.burn(amount);
    }

    fn dsc_ref(&self) -> StablecoinTokenContractRef {
        let dsc = self
            .dsc
            .get()
            .unwrap_or_else(|| self.env().revert(DscError::BadConfig));
        StablecoinTokenContractRef::new(self.env().clone(), dsc)
    }

    // ========== Internal: Guards and Valuation ==========

    fn enter(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(DscError::Reentered);
        }
        self.locked.set(true);
    }

    fn exit(&mut self) {
        self.locked.set(false);
    }

    fn require_positive(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(DscError::AmountZero);
        }
    }

    fn require_system_live(&self) {
        if self.system_frozen.get_or_default() {
            self.env().revert(DscError::SystemFrozen);
        }
    }

    fn require_supported(&self, token: Address) -> AssetConfig {
        self.assets
            .get(&token)
            .unwrap_or_else(|| self.env().revert(DscError::AssetUnsupported))
    }

    fn require_asset_live(&self, config: &AssetConfig) {
        if config.frozen {
            self.env().revert(DscError::AssetFrozen);
        }
    }

    fn require_admin(&self) {
        if self.admin.get() != Some(self.env().caller()) {
            self.env().revert(DscError::Unauthorized);
        }
    }

    fn require_healthy(&self, account: Address) {
        if self.health_of(account) < U256::from(math::MIN_HEALTH_FACTOR) {
            self.env().revert(DscError::LowHealthFactor);
        }
    }

    fn params(&self) -> FreezeParams {
        self.freeze_params
            .get()
            .unwrap_or_else(|| self.env().revert(DscError::BadConfig))
    }

    fn validated_price(&self, config: &AssetConfig) -> U256 {
        OracleClient::fetch_price(&self.env(), config.feed)
    }

    /// Sum the USD value of every collateral balance of `account`.
    ///
    /// Frozen assets are still valued; freezing gates mutations, not
    /// valuation.
    fn collateral_value_of(&self, account: Address) -> U256 {
        let mut total = U256::zero();
        for token in self.asset_list.get_or_default() {
            let balance = self.collateral.get(&(account, token)).unwrap_or_default();
            if balance.is_zero() {
                continue;
            }
            let config = self.require_supported(token);
            let price = self.validated_price(&config);
            let value = math::usd_value(price, balance)
                .unwrap_or_else(|| self.env().revert(DscError::Overflow));
            total = total + value;
        }
        total
    }

    fn health_of(&self, account: Address) -> U256 {
        let debt = self.debt.get(&account).unwrap_or_default();
        if debt.is_zero() {
            return U256::MAX;
        }
        let collateral_usd = self.collateral_value_of(account);
        math::health_factor(debt, collateral_usd)
            .unwrap_or_else(|| self.env().revert(DscError::Overflow))
    }

    fn require_valid_params(&self, max_drop_pct: u32, check_interval: u64) {
        if max_drop_pct == 0 || max_drop_pct > MAX_DROP_PCT_CEILING {
            self.env().revert(DscError::BadConfig);
        }
        if check_interval < MIN_CHECK_INTERVAL {
            self.env().revert(DscError::BadConfig);
        }
    }
}
