//! The reward engine: `AfterExecuteTransactions` (`spec.md` section 4.3).
//!
//! Ties together the generation counter, tier-weighted reward power, the
//! Hyper staking power accumulation (section 4.4) and the staking payout
//! (section 4.5) into the one per-block entry point the process hooks call.

use formulator_shared::{Address, AddressAmountMap, Amount, Decode, Encode, FormulatorType};
use formulator_runtime::{tags, Block, Context, ProcessError, Vault};

use crate::{gen_count, policy, staking_payout, staking_power};

fn last_paid_height(ctx: &dyn Context) -> u32 {
    let bytes = ctx.process_data(&[tags::TAG_LAST_PAID_HEIGHT]);
    if bytes.len() != 4 {
        0
    } else {
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

fn set_last_paid_height(ctx: &mut dyn Context, height: u32) {
    ctx.set_process_data(&[tags::TAG_LAST_PAID_HEIGHT], height.to_be_bytes().to_vec());
}

fn load_stack_reward_map(ctx: &dyn Context) -> Result<AddressAmountMap, ProcessError> {
    let bytes = ctx.process_data(&[tags::TAG_STACK_REWARD_MAP]);
    if bytes.is_empty() {
        Ok(AddressAmountMap::new())
    } else {
        Ok(AddressAmountMap::decode_exact(&bytes)?)
    }
}

fn store_stack_reward_map(ctx: &mut dyn Context, map: &AddressAmountMap) {
    if map.is_empty() {
        ctx.set_process_data(&[tags::TAG_STACK_REWARD_MAP], Vec::new());
    } else {
        ctx.set_process_data(&[tags::TAG_STACK_REWARD_MAP], map.encode_to_vec());
    }
}

/// The `AfterExecuteTransactions` hook body.
pub fn after_execute_transactions(
    ctx: &mut dyn Context,
    block: &Block,
    vault: &dyn Vault,
) -> Result<(), ProcessError> {
    gen_count::add_gen_count(ctx, block.header.generator)?;

    let reward_policy = policy::reward_policy(ctx)?;
    let height = block.header.height;
    let last_paid = last_paid_height(ctx);

    if height < last_paid + reward_policy.pay_reward_every_blocks {
        return Ok(());
    }

    log::debug!("formulator: payout epoch boundary reached at height {height} (last paid {last_paid})");

    let count_map = gen_count::flush_gen_count_map(ctx)?;
    let mut stack_reward_map = load_stack_reward_map(ctx)?;

    let mut sorted_addresses: Vec<Address> = count_map.keys().copied().collect();
    sorted_addresses.sort();

    let mut reward_power_map = AddressAmountMap::new();
    let mut staking_reward_power_map = AddressAmountMap::new();
    let mut reward_power_sum = Amount::ZERO;
    let mut hypers: Vec<Address> = Vec::new();

    for gen_addr in sorted_addresses {
        let gen_count = count_map[&gen_addr];
        let account = ctx.account(gen_addr)?;
        let formulator = account.as_formulator().ok_or_else(|| {
            formulator_runtime::process_error!(
                invalid_account_type,
                "generator {gen_addr} is not a formulator account"
            )
        })?;

        let tier_efficiency = reward_policy.efficiency_for(formulator.formulator_type);
        let numerator = (gen_count as u64)
            .checked_mul(tier_efficiency as u64)
            .ok_or_else(|| formulator_runtime::process_error!(state, "reward power coefficient overflow"))?;
        let power = formulator.amount.scale(numerator, 1000)?;
        reward_power_sum = reward_power_sum.add(power)?;
        reward_power_map.put(gen_addr, power);

        if formulator.formulator_type == FormulatorType::Hyper {
            let current_stack_reward = stack_reward_map.get(&gen_addr).unwrap_or(Amount::ZERO);
            let staking_reward_power = staking_power::accumulate(
                ctx,
                gen_addr,
                gen_count,
                reward_policy.staking_efficiency_1000,
                current_stack_reward,
            )?;
            reward_power_sum = reward_power_sum.add(staking_reward_power)?;
            staking_reward_power_map.put(gen_addr, staking_reward_power);
            hypers.push(gen_addr);
        }
    }

    if !reward_power_sum.is_zero() {
        let mut total_reward = reward_policy.reward_per_block.mul_c((height - last_paid) as u64)?;
        let total_fee = vault.collected_fee(ctx);
        vault.sub_collected_fee(ctx, total_fee)?;
        total_reward = total_reward.add(total_fee)?;

        let ratio = total_reward.div(reward_power_sum)?;
        log::info!(
            "formulator: distributing {total_reward} ({total_fee} fees) across {} formulators at height {height}",
            reward_power_map.len()
        );

        for (addr, power) in reward_power_map.iter() {
            let share = power.mul(ratio)?;
            if !share.is_zero() {
                vault.add_balance(ctx, addr, share)?;
            }
        }

        for (gen_addr, staking_reward_power) in staking_reward_power_map.iter() {
            if ctx.has_account(gen_addr)? {
                let share = staking_reward_power.mul(ratio)?;
                let updated = stack_reward_map.get(&gen_addr).unwrap_or(Amount::ZERO).add(share)?;
                stack_reward_map.put(gen_addr, updated);
            }
        }
    }

    for hyper_addr in hypers {
        let account = ctx.account(hyper_addr)?;
        let formulator = account.as_formulator().ok_or_else(|| {
            formulator_runtime::process_error!(
                invalid_account_type,
                "hyper {hyper_addr} resolved to a non-formulator account"
            )
        })?;
        staking_payout::run_for_hyper(
            ctx,
            formulator,
            height,
            reward_policy.pay_reward_every_blocks,
            &mut stack_reward_map,
            vault,
        )?;
    }

    store_stack_reward_map(ctx, &stack_reward_map);
    set_last_paid_height(ctx, height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulator_test_support::{
        addr, alpha_account, block, hyper_account, sample_alpha_policy, sample_hyper_policy,
        sample_omega_policy, sample_reward_policy, sample_sigma_policy, sample_validator_policy,
        InMemoryContext, MockVault,
    };

    fn setup(ctx: &mut InMemoryContext) {
        policy::init_policy(
            ctx,
            sample_reward_policy(),
            sample_alpha_policy(),
            sample_sigma_policy(),
            sample_omega_policy(),
            sample_hyper_policy(),
        )
        .unwrap();
    }

    /// Scenario 1: one Alpha producing every block of a 10-block epoch is
    /// credited the full per-block reward, and `lastPaidHeight` advances.
    #[test]
    fn scenario_one_alpha_gets_the_full_epoch_reward() {
        let mut ctx = InMemoryContext::new(1);
        setup(&mut ctx);
        let vault = MockVault::new();
        let reward_policy = formulator_shared::RewardPolicy {
            reward_per_block: Amount::from_coins(1),
            pay_reward_every_blocks: 10,
            alpha_efficiency_1000: 1000,
            sigma_efficiency_1000: 1000,
            omega_efficiency_1000: 1000,
            hyper_efficiency_1000: 1000,
            staking_efficiency_1000: 1000,
        };
        policy::init_policy(
            &mut ctx,
            reward_policy,
            sample_alpha_policy(),
            sample_sigma_policy(),
            sample_omega_policy(),
            sample_hyper_policy(),
        )
        .unwrap();

        let a = addr(1);
        ctx.seed_account(alpha_account(a, Amount::from_coins(1)));

        for height in 1..=10u32 {
            ctx.set_target_height(height);
            after_execute_transactions(&mut ctx, &block(height, a), &vault).unwrap();
        }

        assert_eq!(vault.balance(&ctx, a), Amount::from_coins(10));
        assert_eq!(last_paid_height(&ctx), 10);
        assert!(gen_count::flush_gen_count_map(&mut ctx).unwrap().is_empty());
    }

    /// Scenario 2: two Alphas splitting the 10 blocks of an epoch evenly
    /// split a 3-COIN-per-block reward evenly too.
    #[test]
    fn scenario_two_alphas_split_the_reward_by_blocks_produced() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let reward_policy = formulator_shared::RewardPolicy {
            reward_per_block: Amount::from_coins(3),
            pay_reward_every_blocks: 10,
            alpha_efficiency_1000: 1000,
            sigma_efficiency_1000: 1000,
            omega_efficiency_1000: 1000,
            hyper_efficiency_1000: 1000,
            staking_efficiency_1000: 1000,
        };
        policy::init_policy(
            &mut ctx,
            reward_policy,
            sample_alpha_policy(),
            sample_sigma_policy(),
            sample_omega_policy(),
            sample_hyper_policy(),
        )
        .unwrap();

        let a = addr(1);
        let b = addr(2);
        ctx.seed_account(alpha_account(a, Amount::from_coins(1)));
        ctx.seed_account(alpha_account(b, Amount::from_coins(1)));

        for height in 1..=10u32 {
            let generator = if height <= 5 { a } else { b };
            ctx.set_target_height(height);
            after_execute_transactions(&mut ctx, &block(height, generator), &vault).unwrap();
        }

        assert_eq!(vault.balance(&ctx, a), Amount::from_coins(15));
        assert_eq!(vault.balance(&ctx, b), Amount::from_coins(15));
    }

    /// A height that has not yet reached the next epoch boundary performs
    /// no distribution.
    #[test]
    fn no_distribution_before_the_epoch_boundary() {
        let mut ctx = InMemoryContext::new(1);
        setup(&mut ctx);
        let vault = MockVault::new();
        let a = addr(1);
        ctx.seed_account(alpha_account(a, Amount::from_coins(1)));
        ctx.set_target_height(5);
        after_execute_transactions(&mut ctx, &block(5, a), &vault).unwrap();
        assert!(vault.balance(&ctx, a).is_zero());
        assert_eq!(last_paid_height(&ctx), 0);
    }

    /// A zero-power generator (no self-bond) still advances `lastPaidHeight`
    /// at the epoch boundary, crediting nothing — the reward-power-sum-zero
    /// path of invariant 5.
    #[test]
    fn zero_power_epoch_still_advances_last_paid_height() {
        let mut ctx = InMemoryContext::new(100);
        setup(&mut ctx);
        let vault = MockVault::new();
        set_last_paid_height(&mut ctx, 0);
        let a = addr(1);
        ctx.seed_account(alpha_account(a, Amount::from_coins(0)));
        ctx.set_target_height(10);
        after_execute_transactions(&mut ctx, &block(10, a), &vault).unwrap();
        assert_eq!(last_paid_height(&ctx), 10);
    }

    /// Scenario 3: a Hyper with one non-auto-staking staker receives an
    /// immediate reward and its staker receives a staking payout net of
    /// commission, once the Hyper's own payout interval is due.
    #[test]
    fn scenario_three_hyper_staking_payout_with_commission() {
        let mut ctx = InMemoryContext::new(1);
        let vault = MockVault::new();
        let reward_policy = formulator_shared::RewardPolicy {
            reward_per_block: Amount::from_coins(1),
            pay_reward_every_blocks: 10,
            alpha_efficiency_1000: 1000,
            sigma_efficiency_1000: 1000,
            omega_efficiency_1000: 1000,
            hyper_efficiency_1000: 1000,
            staking_efficiency_1000: 1000,
        };
        policy::init_policy(
            &mut ctx,
            reward_policy,
            sample_alpha_policy(),
            sample_sigma_policy(),
            sample_omega_policy(),
            sample_hyper_policy(),
        )
        .unwrap();

        let h = addr(1);
        let s = addr(2);
        let mut validator_policy = sample_validator_policy();
        validator_policy.commission_ratio_1000 = 100;
        validator_policy.pay_out_interval = 1;
        ctx.seed_account(hyper_account(h, Amount::from_coins(1), validator_policy));

        crate::staking_ledger::add_staking_amount(&mut ctx, h, s, Amount::from_coins(1)).unwrap();
        // S staked before this epoch began: seed the prior-epoch snapshot
        // directly so the cross-amount computation sees a continuously
        // staked 1 COIN rather than treating S as new this epoch (that
        // omitted-cross-amount edge case is covered separately in
        // `staking_power::tests`).
        ctx.set_account_data(
            h,
            &[formulator_runtime::tags::TAG_STAKING_AMOUNT_MAP],
            AddressAmountMap::from_iter([(s, Amount::from_coins(1))]).encode_to_vec(),
        );

        for height in 1..=10u32 {
            ctx.set_target_height(height);
            after_execute_transactions(&mut ctx, &block(height, h), &vault).unwrap();
        }

        let half_coin = Amount::from_base_units(5 * 10u64.pow(17));
        assert_eq!(vault.balance(&ctx, h), Amount::from_coins(5).add(half_coin).unwrap());
        assert_eq!(vault.balance(&ctx, s), Amount::from_coins(4).add(half_coin).unwrap());
    }
}
