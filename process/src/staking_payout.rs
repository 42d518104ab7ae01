//! Staking payout: the secondary distribution of a Hyper's accumulated
//! stack-reward to its stakers, with commission withholding and optional
//! auto-compounding (`spec.md` section 4.5).

use formulator_runtime::{tags, Context, ProcessError, Vault};
use formulator_shared::{Address, AddressAmountMap, Amount, FormulatorAccount};

use crate::{staking_ledger, staking_power};

fn last_staking_paid_height(ctx: &dyn Context, hyper: Address) -> u32 {
    let bytes = ctx.account_data(hyper, &[tags::TAG_LAST_STAKING_PAID_HEIGHT]);
    if bytes.len() != 4 {
        0
    } else {
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

fn set_last_staking_paid_height(ctx: &mut dyn Context, hyper: Address, height: u32) {
    ctx.set_account_data(
        hyper,
        &[tags::TAG_LAST_STAKING_PAID_HEIGHT],
        height.to_be_bytes().to_vec(),
    );
}

/// Runs the staking payout for one Hyper, if its stack-reward entry exists
/// and its individual payout interval is due. `stack_reward_map` is the
/// in-memory, not-yet-persisted block-level map; on a successful payout the
/// Hyper's entry is removed from it.
pub fn run_for_hyper(
    ctx: &mut dyn Context,
    hyper: &FormulatorAccount,
    height: u32,
    pay_reward_every_blocks: u32,
    stack_reward_map: &mut AddressAmountMap,
    vault: &dyn Vault,
) -> Result<(), ProcessError> {
    let Some(stack_reward) = stack_reward_map.get(&hyper.address) else {
        return Ok(());
    };
    let policy = hyper
        .hyper_policy()
        .ok_or_else(|| formulator_runtime::process_error!(invalid_account_type, "Hyper account missing its ValidatorPolicy"))?;

    let due_at = last_staking_paid_height(ctx, hyper.address)
        .saturating_add(pay_reward_every_blocks.saturating_mul(policy.pay_out_interval));
    if height < due_at {
        return Ok(());
    }

    let staking_power_map = staking_power::staking_power_map(ctx, hyper.address)?;
    let staking_power_sum = staking_power_map.sum();

    if !staking_power_sum.is_zero() {
        let ratio = stack_reward.div(staking_power_sum)?;
        let mut commission_sum = Amount::ZERO;
        log::info!(
            "formulator: staking payout for hyper {} at height {height}: {stack_reward} across {} stakers",
            hyper.address,
            staking_power_map.len()
        );

        for (staker, power) in staking_power_map.iter() {
            let mut reward_amount = power.mul(ratio)?;
            if policy.commission_ratio_1000 > 0 {
                let commission = reward_amount.scale(policy.commission_ratio_1000 as u64, 1000)?;
                reward_amount = reward_amount.sub(commission)?;
                commission_sum = commission_sum.add(commission)?;
            }
            if !reward_amount.is_zero() {
                if staking_ledger::get_user_auto_staking(ctx, hyper.address, staker)? {
                    staking_ledger::add_staking_amount(ctx, hyper.address, staker, reward_amount)?;
                } else {
                    vault.add_balance(ctx, staker, reward_amount)?;
                }
            }
        }

        if !commission_sum.is_zero() {
            vault.add_balance(ctx, hyper.address, commission_sum)?;
        }
    }

    staking_power::clear_staking_power_map(ctx, hyper.address);
    stack_reward_map.remove(&hyper.address);
    set_last_staking_paid_height(ctx, hyper.address, height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulator_shared::{Decode, Encode, FormulatorType};
    use formulator_test_support::{addr, sample_validator_policy, InMemoryContext, MockVault};

    fn hyper_account(address: Address) -> FormulatorAccount {
        FormulatorAccount {
            address,
            formulator_type: FormulatorType::Hyper,
            amount: Amount::from_coins(1),
            pre_height: 0,
            policy: Some(sample_validator_policy()),
        }
    }

    #[test]
    fn distributes_to_stakers_with_commission_and_clears_the_ledger() {
        let mut ctx = InMemoryContext::new(10);
        let vault = MockVault::new();
        let hyper = hyper_account(addr(1));
        let staker = addr(2);

        ctx.set_account_data(
            hyper.address,
            &[tags::TAG_STAKING_POWER_MAP],
            AddressAmountMap::from_iter([(staker, Amount::from_coins(1))]).encode_to_vec(),
        );
        let mut stack_reward_map = AddressAmountMap::new();
        stack_reward_map.put(hyper.address, Amount::from_coins(5));

        let mut policy = sample_validator_policy();
        policy.commission_ratio_1000 = 100;
        let hyper = FormulatorAccount { policy: Some(policy), ..hyper };

        run_for_hyper(&mut ctx, &hyper, 10, 10, &mut stack_reward_map, &vault).unwrap();

        let half_coin = Amount::from_base_units(5 * 10u64.pow(17));
        assert_eq!(vault.balance(&ctx, staker), Amount::from_coins(4).add(half_coin).unwrap());
        assert_eq!(vault.balance(&ctx, hyper.address), half_coin);
        assert!(stack_reward_map.get(&hyper.address).is_none());
        assert!(AddressAmountMap::decode_exact(&ctx.account_data(hyper.address, &[tags::TAG_STAKING_POWER_MAP]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn auto_staking_credits_the_ledger_instead_of_the_vault() {
        let mut ctx = InMemoryContext::new(10);
        let vault = MockVault::new();
        let hyper = hyper_account(addr(1));
        let staker = addr(2);
        staking_ledger::set_user_auto_staking(&mut ctx, hyper.address, staker, true).unwrap();

        ctx.set_account_data(
            hyper.address,
            &[tags::TAG_STAKING_POWER_MAP],
            AddressAmountMap::from_iter([(staker, Amount::from_coins(1))]).encode_to_vec(),
        );
        let mut stack_reward_map = AddressAmountMap::new();
        stack_reward_map.put(hyper.address, Amount::from_coins(5));

        run_for_hyper(&mut ctx, &hyper, 10, 10, &mut stack_reward_map, &vault).unwrap();

        assert!(vault.balance(&ctx, staker).is_zero());
        assert_eq!(
            staking_ledger::get_staking_amount(&ctx, hyper.address, staker).unwrap(),
            Amount::from_coins(5)
        );
    }

    #[test]
    fn skips_when_not_yet_due() {
        let mut ctx = InMemoryContext::new(5);
        let vault = MockVault::new();
        let hyper = hyper_account(addr(1));
        let mut stack_reward_map = AddressAmountMap::new();
        stack_reward_map.put(hyper.address, Amount::from_coins(5));
        set_last_staking_paid_height(&mut ctx, hyper.address, 0);

        run_for_hyper(&mut ctx, &hyper, 5, 10, &mut stack_reward_map, &vault).unwrap();
        assert!(stack_reward_map.get(&hyper.address).is_some());
    }
}
