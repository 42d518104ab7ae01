//! `UpdateUserAutoStaking { from, hyper_address, flag }` (`SPEC_FULL.md`
//! section 4.7).

use formulator_runtime::{Context, ProcessError};
use formulator_shared::Address;

use crate::staking_ledger;

use super::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateUserAutoStaking {
    pub from: Address,
    pub hyper_address: Address,
    pub flag: bool,
    pub timestamp: u64,
    pub seq: u64,
}

impl Transaction for UpdateUserAutoStaking {
    fn from(&self) -> Address {
        self.from
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn seq(&self) -> u64 {
        self.seq
    }

    fn validate(&self, _ctx: &dyn Context) -> Result<(), ProcessError> {
        Ok(())
    }

    fn apply(&self, ctx: &mut dyn Context, _vault: &dyn formulator_runtime::Vault) -> Result<(), ProcessError> {
        staking_ledger::set_user_auto_staking(ctx, self.hyper_address, self.from, self.flag)
    }
}
