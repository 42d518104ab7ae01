//! `Staking { from, hyper_address, amount }` (`SPEC_FULL.md` section 4.7).

use formulator_runtime::{process_error, Context, ProcessError};
use formulator_shared::{Address, Amount, FormulatorType};

use crate::staking_ledger;

use super::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staking {
    pub from: Address,
    pub hyper_address: Address,
    pub amount: Amount,
    pub timestamp: u64,
    pub seq: u64,
}

impl Transaction for Staking {
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
        let account = ctx.account(self.hyper_address)?;
        let hyper = account
            .as_formulator()
            .filter(|f| f.formulator_type == FormulatorType::Hyper)
            .ok_or_else(|| process_error!(invalid_account_type, "{} is not a Hyper formulator", self.hyper_address))?;
        let policy = hyper
            .hyper_policy()
            .ok_or_else(|| process_error!(invalid_account_type, "Hyper account missing its ValidatorPolicy"))?;

        let current = staking_ledger::get_staking_amount(ctx, self.hyper_address, self.from)?;
        if current.is_zero() {
            let total = current.add(self.amount)?;
            if total < policy.minimum_staking {
                return Err(process_error!(
                    state,
                    "first stake of {} falls under the minimum staking amount of {}",
                    self.amount,
                    policy.minimum_staking
                ));
            }
        }
        Ok(())
    }

    fn apply(&self, ctx: &mut dyn Context, vault: &dyn formulator_runtime::Vault) -> Result<(), ProcessError> {
        vault.sub_balance(ctx, self.from, self.amount)?;
        staking_ledger::add_staking_amount(ctx, self.hyper_address, self.from, self.amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulator_shared::{Account, FormulatorAccount, ValidatorPolicy};
    use formulator_test_support::{addr, InMemoryContext, MockVault};

    fn seed_hyper(ctx: &mut InMemoryContext, hyper: Address, minimum_staking: Amount) {
        ctx.seed_account(Account::Formulator(FormulatorAccount {
            address: hyper,
            formulator_type: FormulatorType::Hyper,
            amount: Amount::from_coins(1),
            pre_height: 0,
            policy: Some(ValidatorPolicy { commission_ratio_1000: 0, pay_out_interval: 1, minimum_staking }),
        }));
    }

    #[test]
    fn moves_balance_into_the_staking_ledger() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let hyper = addr(1);
        let staker = addr(2);
        seed_hyper(&mut ctx, hyper, Amount::from_coins(1));
        vault.set_balance(&mut ctx, staker, Amount::from_coins(5));

        let tx = Staking { from: staker, hyper_address: hyper, amount: Amount::from_coins(2), timestamp: 0, seq: 1 };
        super::super::run(&tx, &mut ctx, &vault).unwrap();

        assert_eq!(vault.balance(&ctx, staker), Amount::from_coins(3));
        assert_eq!(staking_ledger::get_staking_amount(&ctx, hyper, staker).unwrap(), Amount::from_coins(2));
        assert_eq!(ctx.seq(staker), 1);
    }

    #[test]
    fn rejects_non_hyper_targets() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let alpha = addr(1);
        ctx.seed_account(Account::Formulator(FormulatorAccount {
            address: alpha,
            formulator_type: FormulatorType::Alpha,
            amount: Amount::from_coins(1),
            pre_height: 0,
            policy: None,
        }));
        let staker = addr(2);
        vault.set_balance(&mut ctx, staker, Amount::from_coins(5));

        let tx = Staking { from: staker, hyper_address: alpha, amount: Amount::from_coins(1), timestamp: 0, seq: 1 };
        assert!(super::super::run(&tx, &mut ctx, &vault).is_err());
        assert_eq!(vault.balance(&ctx, staker), Amount::from_coins(5));
    }

    #[test]
    fn rejects_a_first_stake_under_the_minimum() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let hyper = addr(1);
        let staker = addr(2);
        seed_hyper(&mut ctx, hyper, Amount::from_coins(5));
        vault.set_balance(&mut ctx, staker, Amount::from_coins(10));

        let tx = Staking { from: staker, hyper_address: hyper, amount: Amount::from_coins(1), timestamp: 0, seq: 1 };
        assert!(super::super::run(&tx, &mut ctx, &vault).is_err());
        assert!(staking_ledger::get_staking_amount(&ctx, hyper, staker).unwrap().is_zero());
    }

    #[test]
    fn a_top_up_stake_is_exempt_from_the_minimum() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let hyper = addr(1);
        let staker = addr(2);
        seed_hyper(&mut ctx, hyper, Amount::from_coins(5));
        staking_ledger::add_staking_amount(&mut ctx, hyper, staker, Amount::from_coins(5)).unwrap();
        vault.set_balance(&mut ctx, staker, Amount::from_coins(10));

        let tx = Staking { from: staker, hyper_address: hyper, amount: Amount::from_coins(1), timestamp: 0, seq: 1 };
        super::super::run(&tx, &mut ctx, &vault).unwrap();
        assert_eq!(staking_ledger::get_staking_amount(&ctx, hyper, staker).unwrap(), Amount::from_coins(6));
    }
}
