//! Hyper staking power accumulation (`spec.md` section 4.4).
//!
//! Runs once per Hyper per payout epoch, right after its generation count is
//! known and before this epoch's stack-reward contribution is computed: the
//! `current_stack_reward` it compounds in is always last epoch's value.

use formulator_runtime::{tags, Context, ProcessError};
use formulator_shared::{Address, AddressAmountMap, Amount, Decode, Encode};

use crate::staking_ledger;

fn load_map(ctx: &dyn Context, hyper: Address, tag: u8) -> Result<AddressAmountMap, ProcessError> {
    let bytes = ctx.account_data(hyper, &[tag]);
    if bytes.is_empty() {
        Ok(AddressAmountMap::new())
    } else {
        Ok(AddressAmountMap::decode_exact(&bytes)?)
    }
}

fn store_map(ctx: &mut dyn Context, hyper: Address, tag: u8, map: &AddressAmountMap) {
    if map.is_empty() {
        ctx.set_account_data(hyper, &[tag], Vec::new());
    } else {
        ctx.set_account_data(hyper, &[tag], map.encode_to_vec());
    }
}

/// Accumulates cross-staked amounts into `hyper`'s staking power, compounds
/// last epoch's unpaid stack-reward into that same power, and returns the
/// staking reward power this Hyper contributes to the block-level reward
/// pool this epoch.
pub fn accumulate(
    ctx: &mut dyn Context,
    hyper: Address,
    gen_count: u32,
    staking_efficiency_1000: u32,
    current_stack_reward: Amount,
) -> Result<Amount, ProcessError> {
    let prev_amount_map = load_map(ctx, hyper, tags::TAG_STAKING_AMOUNT_MAP)?;
    let amount_map = staking_ledger::get_staking_amount_map(ctx, hyper)?;

    let mut cross_map = AddressAmountMap::new();
    for (staker, current) in amount_map.iter() {
        if let Some(prev) = prev_amount_map.get(&staker) {
            if !prev.is_zero() && !current.is_zero() {
                let cross = if prev.base_units() < current.base_units() { prev } else { current };
                cross_map.put(staker, cross);
            }
        }
    }
    store_map(ctx, hyper, tags::TAG_STAKING_AMOUNT_MAP, &amount_map);

    let mut staking_power_map = load_map(ctx, hyper, tags::TAG_STAKING_POWER_MAP)?;
    let mut staking_reward_power = Amount::ZERO;

    let efficiency_coefficient = (gen_count as u64)
        .checked_mul(staking_efficiency_1000 as u64)
        .ok_or(formulator_shared::AmountError::Overflow)?;

    for (staker, cross_amt) in cross_map.iter() {
        let contribution = cross_amt.scale(efficiency_coefficient, 1000)?;
        staking_reward_power = staking_reward_power.add(contribution)?;
        let updated = staking_power_map.get(&staker).unwrap_or(Amount::ZERO).add(cross_amt)?;
        staking_power_map.put(staker, updated);
    }

    if !current_stack_reward.is_zero() {
        let staking_power_sum = staking_power_map.sum();
        if !staking_power_sum.is_zero() {
            let ratio = current_stack_reward.div(staking_power_sum)?;
            for staker in staking_power_map.keys_snapshot() {
                let power = staking_power_map.get(&staker).expect("snapshot key must be present");
                let stack_add = power.mul(ratio)?;
                staking_power_map.put(staker, power.add(stack_add)?);
                let bump = stack_add.scale(efficiency_coefficient, 1000)?;
                staking_reward_power = staking_reward_power.add(bump)?;
            }
        }
    }

    store_map(ctx, hyper, tags::TAG_STAKING_POWER_MAP, &staking_power_map);
    Ok(staking_reward_power)
}

/// Reads `tagStakingPowerMap(hyper)` without mutating it — used by the
/// staking payout.
pub fn staking_power_map(ctx: &dyn Context, hyper: Address) -> Result<AddressAmountMap, ProcessError> {
    load_map(ctx, hyper, tags::TAG_STAKING_POWER_MAP)
}

/// Clears `tagStakingPowerMap(hyper)`, the invariant that must hold after
/// every staking payout.
pub fn clear_staking_power_map(ctx: &mut dyn Context, hyper: Address) {
    ctx.set_account_data(hyper, &[tags::TAG_STAKING_POWER_MAP], Vec::new());
}
