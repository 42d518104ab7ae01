//! `Unstaking { from, hyper_address, amount }` (`SPEC_FULL.md` section 4.7).

use formulator_runtime::{process_error, Context, ProcessError};
use formulator_shared::{Address, Amount};

use crate::staking_ledger;

use super::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unstaking {
    pub from: Address,
    pub hyper_address: Address,
    pub amount: Amount,
    pub timestamp: u64,
    pub seq: u64,
}

impl Transaction for Unstaking {
    fn from(&self) -> Address {
        self.from
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn seq(&self) -> u64 {
        self.seq
    }

    fn validate(&self, ctx: &dyn Context) -> Result<(), ProcessError> {
        let staked = staking_ledger::get_staking_amount(ctx, self.hyper_address, self.from)?;
        if staked < self.amount {
            return Err(process_error!(
                state,
                "cannot unstake {} with only {staked} staked",
                self.amount
            ));
        }
        Ok(())
    }

    fn apply(&self, ctx: &mut dyn Context, vault: &dyn formulator_runtime::Vault) -> Result<(), ProcessError> {
        staking_ledger::sub_staking_amount(ctx, self.hyper_address, self.from, self.amount)?;
        vault.add_balance(ctx, self.from, self.amount)?;
        Ok(())
    }
}
