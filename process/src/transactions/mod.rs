//! Staking-mutating transactions (`spec.md` section 4.7 in `SPEC_FULL.md`):
//! `Staking`, `Unstaking`, `UpdateUserAutoStaking`, `UpdateValidatorPolicy`.
//!
//! Each follows the shape `Validate(loader, signers)` / `Execute(ctx, index)`
//! from `tx_withdraw.go`/`tx_create_multi_account.go`: a snapshot is taken
//! before any mutation, reverted on any failure, committed only once every
//! mutation has succeeded.

mod staking;
mod unstaking;
mod update_auto_staking;
mod update_validator_policy;

pub use staking::Staking;
pub use unstaking::Unstaking;
pub use update_auto_staking::UpdateUserAutoStaking;
pub use update_validator_policy::UpdateValidatorPolicy;

use formulator_runtime::{Context, ProcessError, Vault};
use formulator_shared::Address;

/// Common shape every staking-mutating transaction follows.
pub trait Transaction {
    fn from(&self) -> Address;
    fn timestamp(&self) -> u64;
    fn seq(&self) -> u64;

    /// Checks this transaction is well-formed against current state,
    /// without mutating anything.
    fn validate(&self, ctx: &dyn Context) -> Result<(), ProcessError>;

    /// Performs the transaction's state mutations. Called only after
    /// `validate` has succeeded and a snapshot is already active; must not
    /// itself snapshot/commit/revert.
    fn apply(&self, ctx: &mut dyn Context, vault: &dyn Vault) -> Result<(), ProcessError>;
}

/// Runs one transaction under the snapshot/revert/commit discipline every
/// process transaction in this chain follows: validate, snapshot, apply,
/// bump the sender's sequence number, commit on success or revert on any
/// failure.
pub fn run<T: Transaction>(tx: &T, ctx: &mut dyn Context, vault: &dyn Vault) -> Result<(), ProcessError> {
    tx.validate(ctx)?;

    let sn = ctx.snapshot();
    let result = (|| {
        tx.apply(ctx, vault)?;
        ctx.add_seq(tx.from());
        Ok(())
    })();

    match result {
        Ok(()) => {
            ctx.commit(sn);
            Ok(())
        }
        Err(e) => {
            ctx.revert(sn);
            Err(e)
        }
    }
}
