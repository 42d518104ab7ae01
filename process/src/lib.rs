//! The PoF formulator process: generation counting, tier-weighted reward
//! distribution and Hyper staking payout.
//!
//! Wires the leaf modules (`gen_count`, `staking_power`, `staking_payout`,
//! `staking_ledger`, `policy`) and the `reward_engine` entry point into the
//! `formulator_runtime::Process` hook trait, the way
//! `original_source/process/formulator/formulator.go`'s `Formulator` type
//! wires its own package together.

pub mod gen_count;
pub mod policy;
pub mod reward_engine;
pub mod staking_ledger;
pub mod staking_payout;
pub mod staking_power;
pub mod transactions;

use std::rc::Rc;

use formulator_runtime::{
    Admin, AdminLoader, Block, Context, Process, ProcessError, ProcessManager, Vault,
};
use formulator_shared::{Address, AlphaPolicy, HyperPolicy, OmegaPolicy, RewardPolicy, SigmaPolicy};

/// Process name every embedding application's `ProcessManager` registers
/// this process under, mirroring the Go `Formulator.Name()`.
pub const PROCESS_NAME: &str = "fleta.formulator";

/// The formulator chain process: a thin `Process` shell around the reward
/// engine and the staking-mutating transactions, holding only the
/// collaborators it resolved at `init` time.
pub struct FormulatorProcess {
    pid: u8,
    vault: Option<Rc<dyn Vault>>,
    admin: Option<Rc<dyn Admin>>,
}

impl FormulatorProcess {
    pub fn new(pid: u8) -> Self {
        FormulatorProcess { pid, vault: None, admin: None }
    }

    fn vault(&self) -> Result<&dyn Vault, ProcessError> {
        self.vault
            .as_deref()
            .ok_or_else(|| formulator_runtime::process_error!(state, "formulator process not initialized: no vault"))
    }

    fn admin(&self) -> Result<&dyn Admin, ProcessError> {
        self.admin
            .as_deref()
            .ok_or_else(|| formulator_runtime::process_error!(state, "formulator process not initialized: no admin"))
    }

    /// The configured admin address for this process, resolved through the
    /// admin collaborator. Mirrors the Go `OnLoadChain`'s
    /// `p.admin.AdminAddress(loader, p.Name())` call.
    pub fn admin_address(&self, loader: &dyn AdminLoader) -> Result<Option<Address>, ProcessError> {
        Ok(self.admin()?.admin_address(loader, self.name()))
    }

    /// Genesis-only: writes all five policy blobs. Mirrors the Go
    /// `Formulator.InitPolicy`, including its `SwitchContext`-to-this-pid
    /// step (performed here by the caller, which already holds a façade
    /// switched to `self.pid`).
    pub fn init_policy(
        &self,
        ctx: &mut dyn Context,
        reward: RewardPolicy,
        alpha: AlphaPolicy,
        sigma: SigmaPolicy,
        omega: OmegaPolicy,
        hyper: HyperPolicy,
    ) -> Result<(), ProcessError> {
        policy::init_policy(ctx, reward, alpha, sigma, omega, hyper)
    }
}

impl Process for FormulatorProcess {
    fn id(&self) -> u8 {
        self.pid
    }

    fn name(&self) -> &'static str {
        PROCESS_NAME
    }

    fn version(&self) -> &'static str {
        "0.0.1"
    }

    fn init(&mut self, pm: &dyn ProcessManager) -> Result<(), ProcessError> {
        self.vault = Some(pm.vault());
        self.admin = Some(pm.admin());
        Ok(())
    }

    fn on_load_chain(&self, ctx: &dyn Context) -> Result<(), ProcessError> {
        policy::assert_policies_loaded(ctx)
    }

    fn before_execute_transactions(&self, _ctx: &mut dyn Context) -> Result<(), ProcessError> {
        Ok(())
    }

    fn after_execute_transactions(
        &self,
        block: &Block,
        ctx: &mut dyn Context,
    ) -> Result<(), ProcessError> {
        reward_engine::after_execute_transactions(ctx, block, self.vault()?)
    }

    fn on_save_data(&self, _block: &Block, _ctx: &mut dyn Context) -> Result<(), ProcessError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulator_test_support::{
        addr, alpha_account, block, sample_alpha_policy, sample_hyper_policy, sample_omega_policy,
        sample_reward_policy, sample_sigma_policy, InMemoryContext, MockAdminLoader,
        MockProcessManager,
    };

    #[test]
    fn on_load_chain_fails_before_init_policy_and_succeeds_after() {
        let ctx = InMemoryContext::new(1);
        let process = FormulatorProcess::new(1);
        assert!(process.on_load_chain(&ctx).is_err());
    }

    #[test]
    fn init_resolves_collaborators_and_the_full_hook_cycle_runs() {
        let pm = MockProcessManager::new(addr(9));
        let mut process = FormulatorProcess::new(1);
        process.init(&pm).unwrap();

        let mut ctx = InMemoryContext::new(1);
        process
            .init_policy(
                &mut ctx,
                sample_reward_policy(),
                sample_alpha_policy(),
                sample_sigma_policy(),
                sample_omega_policy(),
                sample_hyper_policy(),
            )
            .unwrap();
        assert!(process.on_load_chain(&ctx).is_ok());

        let a = addr(1);
        ctx.seed_account(alpha_account(a, formulator_shared::Amount::from_coins(1)));

        process.before_execute_transactions(&mut ctx).unwrap();
        for height in 1..100u32 {
            ctx.set_target_height(height);
            process.after_execute_transactions(&block(height, a), &mut ctx).unwrap();
        }
        process.on_save_data(&block(100, a), &mut ctx).unwrap();

        assert_eq!(process.id(), 1);
        assert_eq!(process.name(), "fleta.formulator");
    }

    #[test]
    fn admin_address_resolves_through_the_admin_collaborator() {
        let admin_addr = addr(9);
        let pm = MockProcessManager::new(admin_addr);
        let mut process = FormulatorProcess::new(1);
        process.init(&pm).unwrap();

        let loader = MockAdminLoader::new();
        assert_eq!(process.admin_address(&loader).unwrap(), Some(admin_addr));
    }

    #[test]
    fn admin_address_fails_before_init() {
        let process = FormulatorProcess::new(1);
        let loader = MockAdminLoader::new();
        assert!(process.admin_address(&loader).is_err());
    }
}
