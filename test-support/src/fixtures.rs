//! Convenience builders for policy blobs, accounts and blocks, so reward
//! engine and transaction tests don't repeat this boilerplate.

use std::rc::Rc;

use formulator_runtime::{Admin, Block, BlockHeader, ProcessManager, Vault};
use formulator_shared::{
    Account, AlphaPolicy, Amount, FormulatorAccount, FormulatorType, HyperPolicy, OmegaPolicy,
    RewardPolicy, SigmaPolicy, ValidatorPolicy,
};

use crate::admin::MockAdmin;
use crate::vault::MockVault;

pub fn addr(b: u8) -> formulator_shared::Address {
    let mut bytes = [0u8; 24];
    bytes[23] = b;
    formulator_shared::Address::from_bytes(bytes)
}

/// A reward policy with round, easy-to-reason-about numbers: 10 coins a
/// block, a 100-block payout epoch, full (1000/1000) efficiency everywhere
/// except Alpha, which sits at half.
pub fn sample_reward_policy() -> RewardPolicy {
    RewardPolicy {
        reward_per_block: Amount::from_coins(10),
        pay_reward_every_blocks: 100,
        alpha_efficiency_1000: 500,
        sigma_efficiency_1000: 1000,
        omega_efficiency_1000: 1000,
        hyper_efficiency_1000: 1000,
        staking_efficiency_1000: 1000,
    }
}

pub fn sample_alpha_policy() -> AlphaPolicy {
    AlphaPolicy { required_amount: Amount::from_coins(1) }
}

pub fn sample_sigma_policy() -> SigmaPolicy {
    SigmaPolicy { required_amount: Amount::from_coins(10) }
}

pub fn sample_omega_policy() -> OmegaPolicy {
    OmegaPolicy { required_amount: Amount::from_coins(100) }
}

pub fn sample_hyper_policy() -> HyperPolicy {
    HyperPolicy {
        required_amount: Amount::from_coins(1000),
        minimum_staking_amount: Amount::from_coins(1),
    }
}

/// A validator policy with no commission and a payout interval equal to one
/// reward epoch (the `pay_out_interval` multiplier is against epochs, not
/// blocks).
pub fn sample_validator_policy() -> ValidatorPolicy {
    ValidatorPolicy {
        commission_ratio_1000: 0,
        pay_out_interval: 1,
        minimum_staking: Amount::from_coins(1),
    }
}

pub fn alpha_account(address: formulator_shared::Address, amount: Amount) -> Account {
    Account::Formulator(FormulatorAccount {
        address,
        formulator_type: FormulatorType::Alpha,
        amount,
        pre_height: 0,
        policy: None,
    })
}

pub fn hyper_account(
    address: formulator_shared::Address,
    amount: Amount,
    policy: ValidatorPolicy,
) -> Account {
    Account::Formulator(FormulatorAccount {
        address,
        formulator_type: FormulatorType::Hyper,
        amount,
        pre_height: 0,
        policy: Some(policy),
    })
}

pub fn block(height: u32, generator: formulator_shared::Address) -> Block {
    Block { header: BlockHeader { height, generator } }
}

/// A `ProcessManager` handing out a fresh `MockVault`/`MockAdmin` pair.
pub struct MockProcessManager {
    vault: Rc<dyn Vault>,
    admin: Rc<dyn Admin>,
}

impl MockProcessManager {
    pub fn new(admin_address: formulator_shared::Address) -> Self {
        MockProcessManager {
            vault: Rc::new(MockVault::new()),
            admin: Rc::new(MockAdmin::new(admin_address)),
        }
    }
}

impl ProcessManager for MockProcessManager {
    fn vault(&self) -> Rc<dyn Vault> {
        Rc::clone(&self.vault)
    }

    fn admin(&self) -> Rc<dyn Admin> {
        Rc::clone(&self.admin)
    }
}
