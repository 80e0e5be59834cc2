//! Test-double contracts for the engine integration tests.

use odra::prelude::*;
use odra::casper_types::U256;

use dsc_engine_contracts::errors::DscError;

/// Engine surface the reentrant token calls back into.
#[odra::external_contract]
pub trait EngineLike {
    fn deposit_collateral(&mut self, token: Address, amount: U256);
}

/// Open-mint CEP-18 subset used as collateral in tests.
#[odra::module]
pub struct MockToken {
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
    total_supply: Var<U256>,
}

#[odra::module]
impl MockToken {
    /// Mint freely (test setup only).
    pub fn mint(&mut self, to: Address, amount: U256) {
        let balance = self.balances.get(&to).unwrap_or_default();
        self.balances.set(&to, balance + amount);
        self.total_supply
            .set(self.total_supply.get_or_default() + amount);
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        true
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.move_balance(sender, recipient, amount);
        true
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            self.env().revert(DscError::InsufficientAllowance);
        }
        self.allowances.set(&(owner, spender), allowance - amount);
        self.move_balance(owner, recipient, amount);
        true
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(DscError::InsufficientTokenBalance);
        }
        self.balances.set(&from, from_balance - amount);
        self.balances.set(&to, self.balance_of(to) + amount);
    }
}

/// Token whose transfers signal failure by returning `false`.
#[odra::module]
pub struct MisbehavingToken {
    attempted_transfers: Var<u32>,
}

#[odra::module]
impl MisbehavingToken {
    pub fn balance_of(&self, _account: Address) -> U256 {
        U256::zero()
    }

    pub fn attempted_transfers(&self) -> u32 {
        self.attempted_transfers.get_or_default()
    }

    pub fn transfer(&mut self, _recipient: Address, _amount: U256) -> bool {
        self.attempted_transfers
            .set(self.attempted_transfers.get_or_default() + 1);
        false
    }

    pub fn transfer_from(&mut self, _owner: Address, _recipient: Address, _amount: U256) -> bool {
        self.attempted_transfers
            .set(self.attempted_transfers.get_or_default() + 1);
        false
    }
}

/// Token that calls back into the engine mid-transfer.
#[odra::module]
pub struct ReentrantToken {
    engine: Var<Option<Address>>,
}

#[odra::module]
impl ReentrantToken {
    pub fn set_engine(&mut self, engine: Address) {
        self.engine.set(Some(engine));
    }

    pub fn balance_of(&self, _account: Address) -> U256 {
        U256::MAX
    }

    pub fn transfer(&mut self, _recipient: Address, _amount: U256) -> bool {
        true
    }

    pub fn transfer_from(&mut self, _owner: Address, _recipient: Address, _amount: U256) -> bool {
        if let Some(engine) = self.engine.get().flatten() {
            let token = self.env().self_address();
            EngineLikeContractRef::new(self.env().clone(), engine)
                .deposit_collateral(token, U256::one());
        }
        true
    }
}
