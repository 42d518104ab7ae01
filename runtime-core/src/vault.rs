//! The balance/fee collaborator the reward engine calls into.
//!
//! Owned and implemented by the vault process; the formulator core only
//! consumes this interface. The collected-fee counter is mutated
//! exclusively by the reward engine during `AfterExecuteTransactions` —
//! transactions credit it during their own execute phase, outside this
//! core's scope.

use formulator_shared::{Address, Amount};

use crate::context::Context;
use crate::error::ProcessError;

pub trait Vault {
    fn add_balance(
        &self,
        ctx: &mut dyn Context,
        addr: Address,
        amount: Amount,
    ) -> Result<(), ProcessError>;

    fn sub_balance(
        &self,
        ctx: &mut dyn Context,
        addr: Address,
        amount: Amount,
    ) -> Result<(), ProcessError>;

    fn collected_fee(&self, ctx: &dyn Context) -> Amount;

    fn sub_collected_fee(&self, ctx: &mut dyn Context, amount: Amount) -> Result<(), ProcessError>;
}
