//! DSC Stablecoin Contract
//!
//! CEP-18 compatible stablecoin with protocol-controlled supply.
//! Only authorized minters (the debt engine) can mint or burn.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::errors::DscError;

/// DSC Stablecoin Contract
#[odra::module]
pub struct Dsc {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals (18 for DSC)
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Admin account (manages the minter set)
    admin: Var<Address>,
    /// Authorized minters (protocol contracts)
    authorized_minters: Mapping<Address, bool>,
}

#[odra::module]
impl Dsc {
    /// Initialize the stablecoin; the deployer becomes the admin.
    pub fn init(&mut self) {
        self.name.set(String::from("Decentralized Stable Coin"));
        self.symbol.set(String::from("DSC"));
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.admin.set(self.env().caller());
    }

    // ========== CEP-18 Standard Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_else(|| String::from("Decentralized Stable Coin"))
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_else(|| String::from("DSC"))
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(18)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_internal(sender, recipient, amount);
        true
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(DscError::InsufficientAllowance);
        }

        self.transfer_internal(owner, recipient, amount);
        self.allowances.set(&(owner, spender), current_allowance - amount);
        true
    }

    // ========== Protocol Functions (Restricted) ==========

    /// Mint new tokens (only authorized minters)
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        self.require_authorized_minter();

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);
        self.total_supply.set(self.total_supply() + amount);
        true
    }

    /// Burn tokens from the caller's own balance (only authorized minters)
    pub fn burn(&mut self, amount: U256) {
        self.require_authorized_minter();
        let caller = self.env().caller();
        let current_balance = self.balance_of(caller);
        if current_balance < amount {
            self.env().revert(DscError::InsufficientTokenBalance);
        }

        self.balances.set(&caller, current_balance - amount);
        self.total_supply.set(self.total_supply() - amount);
    }

    // ========== Admin Functions ==========

    /// Add an authorized minter (admin only)
    pub fn add_minter(&mut self, minter: Address) {
        self.require_admin();
        self.authorized_minters.set(&minter, true);
    }

    /// Remove an authorized minter (admin only)
    pub fn remove_minter(&mut self, minter: Address) {
        self.require_admin();
        self.authorized_minters.set(&minter, false);
    }

    /// Check if address is an authorized minter
    pub fn is_minter(&self, account: Address) -> bool {
        self.authorized_minters.get(&account).unwrap_or(false)
    }

    /// Get the admin account
    pub fn get_admin(&self) -> Option<Address> {
        self.admin.get()
    }

    // ========== Internal Functions ==========

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(DscError::InsufficientTokenBalance);
        }

        self.balances.set(&from, from_balance - amount);
        self.balances.set(&to, self.balance_of(to) + amount);
    }

    fn require_authorized_minter(&self) {
        let caller = self.env().caller();
        if !self.is_minter(caller) {
            self.env().revert(DscError::Unauthorized);
        }
    }

    fn require_admin(&self) {
        if self.admin.get() != Some(self.env().caller()) {
            self.env().revert(DscError::Unauthorized);
        }
    }
}
