//! The Hyper staking ledger (`spec.md` section 4.6).
//!
//! Mutations to this ledger are externally driven, by the staking-mutating
//! transactions in `crate::transactions`; the reward engine only reads it.

use formulator_runtime::{tags, Context};
use formulator_shared::{Address, AddressAmountMap, Amount, Decode, Encode};

fn load_map(ctx: &dyn Context, hyper: Address, tag: u8) -> Result<AddressAmountMap, formulator_runtime::ProcessError> {
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

/// All stakers of `hyper` with non-zero stake.
pub fn get_staking_amount_map(
    ctx: &dyn Context,
    hyper: Address,
) -> Result<AddressAmountMap, formulator_runtime::ProcessError> {
    load_map(ctx, hyper, tags::TAG_STAKING_AMOUNT)
}

pub fn get_staking_amount(
    ctx: &dyn Context,
    hyper: Address,
    staker: Address,
) -> Result<Amount, formulator_runtime::ProcessError> {
    Ok(get_staking_amount_map(ctx, hyper)?.get(&staker).unwrap_or(Amount::ZERO))
}

/// Additively increases `staker`'s bonded amount with `hyper`, creating the
/// entry if absent.
pub fn add_staking_amount(
    ctx: &mut dyn Context,
    hyper: Address,
    staker: Address,
    amount: Amount,
) -> Result<(), formulator_runtime::ProcessError> {
    let mut map = get_staking_amount_map(ctx, hyper)?;
    let current = map.get(&staker).unwrap_or(Amount::ZERO);
    let updated = current
        .add(amount)
        .map_err(|e| formulator_runtime::process_error!(state, "staking amount overflow: {e}"))?;
    map.put(staker, updated);
    store_map(ctx, hyper, tags::TAG_STAKING_AMOUNT, &map);
    Ok(())
}

/// Decreases `staker`'s bonded amount with `hyper`. Fails if the staker's
/// current stake is below `amount`.
pub fn sub_staking_amount(
    ctx: &mut dyn Context,
    hyper: Address,
    staker: Address,
    amount: Amount,
) -> Result<(), formulator_runtime::ProcessError> {
    let mut map = get_staking_amount_map(ctx, hyper)?;
    let current = map.get(&staker).unwrap_or(Amount::ZERO);
    let updated = current
        .sub(amount)
        .map_err(|e| formulator_runtime::process_error!(state, "insufficient staked amount: {e}"))?;
    if updated.is_zero() {
        map.remove(&staker);
    } else {
        map.put(staker, updated);
    }
    store_map(ctx, hyper, tags::TAG_STAKING_AMOUNT, &map);
    Ok(())
}

pub fn get_user_auto_staking(
    ctx: &dyn Context,
    hyper: Address,
    staker: Address,
) -> Result<bool, formulator_runtime::ProcessError> {
    let flags = load_map(ctx, hyper, tags::TAG_USER_AUTO_STAKING)?;
    Ok(flags.get(&staker).map(|v| !v.is_zero()).unwrap_or(false))
}

pub fn set_user_auto_staking(
    ctx: &mut dyn Context,
    hyper: Address,
    staker: Address,
    flag: bool,
) -> Result<(), formulator_runtime::ProcessError> {
    let mut flags = load_map(ctx, hyper, tags::TAG_USER_AUTO_STAKING)?;
    if flag {
        flags.put(staker, Amount::from_base_units(1));
    } else {
        flags.remove(&staker);
    }
    store_map(ctx, hyper, tags::TAG_USER_AUTO_STAKING, &flags);
    Ok(())
}
