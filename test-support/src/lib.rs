//! Test-only fixtures for the formulator process: an in-memory `Context`,
//! mock `Vault`/`Admin` collaborators, and builders for policies, accounts
//! and blocks.

mod admin;
mod context;
mod fixtures;
mod vault;

pub use admin::{MockAdmin, MockAdminLoader};
pub use context::InMemoryContext;
pub use fixtures::{
    addr, alpha_account, block, hyper_account, sample_alpha_policy, sample_hyper_policy,
    sample_omega_policy, sample_reward_policy, sample_sigma_policy, sample_validator_policy,
    MockProcessManager,
};
pub use vault::MockVault;
