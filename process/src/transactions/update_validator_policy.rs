//! `UpdateValidatorPolicy { from, new_policy }` (`SPEC_FULL.md` section
//! 4.7). Owner-only: `from` must be the Hyper account itself.

use formulator_runtime::{process_error, Context, ProcessError};
use formulator_shared::{Account, Address, FormulatorType, ValidatorPolicy};

use super::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateValidatorPolicy {
    pub from: Address,
    pub new_policy: ValidatorPolicy,
    pub timestamp: u64,
    pub seq: u64,
}

impl Transaction for UpdateValidatorPolicy {
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
        let account = ctx.account(self.from)?;
        account
            .as_formulator()
            .filter(|f| f.formulator_type == FormulatorType::Hyper)
            .ok_or_else(|| process_error!(invalid_account_type, "{} is not a Hyper formulator", self.from))?;

        if self.new_policy.commission_ratio_1000 > 1000 {
            return Err(process_error!(
                state,
                "commission ratio {} exceeds 1000",
                self.new_policy.commission_ratio_1000
            ));
        }
        if self.new_policy.pay_out_interval == 0 {
            return Err(process_error!(state, "pay out interval must be greater than zero"));
        }
        Ok(())
    }

    fn apply(&self, ctx: &mut dyn Context, _vault: &dyn formulator_runtime::Vault) -> Result<(), ProcessError> {
        let account = ctx.account(self.from)?;
        let mut hyper = account.as_formulator().expect("validated above").clone();
        hyper.policy = Some(self.new_policy);
        ctx.set_account(Account::Formulator(hyper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulator_shared::{Amount, FormulatorAccount};
    use formulator_test_support::{addr, InMemoryContext, MockVault};

    fn seed_hyper(ctx: &mut InMemoryContext, hyper: Address) {
        ctx.seed_account(Account::Formulator(FormulatorAccount {
            address: hyper,
            formulator_type: FormulatorType::Hyper,
            amount: Amount::from_coins(1),
            pre_height: 0,
            policy: Some(ValidatorPolicy {
                commission_ratio_1000: 0,
                pay_out_interval: 1,
                minimum_staking: Amount::from_coins(1),
            }),
        }));
    }

    #[test]
    fn owner_can_update_its_own_policy() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let hyper = addr(1);
        seed_hyper(&mut ctx, hyper);

        let new_policy = ValidatorPolicy {
            commission_ratio_1000: 200,
            pay_out_interval: 3,
            minimum_staking: Amount::from_coins(2),
        };
        let tx = UpdateValidatorPolicy { from: hyper, new_policy, timestamp: 0, seq: 1 };
        super::super::run(&tx, &mut ctx, &vault).unwrap();

        let account = ctx.account(hyper).unwrap();
        assert_eq!(account.as_formulator().unwrap().policy, Some(new_policy));
    }

    #[test]
    fn rejects_a_zero_pay_out_interval() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let hyper = addr(1);
        seed_hyper(&mut ctx, hyper);

        let new_policy = ValidatorPolicy {
            commission_ratio_1000: 0,
            pay_out_interval: 0,
            minimum_staking: Amount::from_coins(1),
        };
        let tx = UpdateValidatorPolicy { from: hyper, new_policy, timestamp: 0, seq: 1 };
        assert!(super::super::run(&tx, &mut ctx, &vault).is_err());
    }

    #[test]
    fn rejects_a_commission_ratio_above_1000() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let hyper = addr(1);
        seed_hyper(&mut ctx, hyper);

        let new_policy = ValidatorPolicy {
            commission_ratio_1000: 1001,
            pay_out_interval: 1,
            minimum_staking: Amount::from_coins(1),
        };
        let tx = UpdateValidatorPolicy { from: hyper, new_policy, timestamp: 0, seq: 1 };
        assert!(super::super::run(&tx, &mut ctx, &vault).is_err());
    }

    #[test]
    fn non_owner_cannot_update_the_policy() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let hyper = addr(1);
        let intruder = addr(2);
        seed_hyper(&mut ctx, hyper);
        ctx.seed_account(Account::Formulator(FormulatorAccount {
            address: intruder,
            formulator_type: FormulatorType::Alpha,
            amount: Amount::from_coins(1),
            pre_height: 0,
            policy: None,
        }));

        let new_policy = ValidatorPolicy {
            commission_ratio_1000: 0,
            pay_out_interval: 1,
            minimum_staking: Amount::from_coins(1),
        };
        let tx = UpdateValidatorPolicy { from: intruder, new_policy, timestamp: 0, seq: 1 };
        assert!(super::super::run(&tx, &mut ctx, &vault).is_err());
    }
}
