//! Loading and storing the five genesis policy blobs.
//!
//! Policies are snapshotted fresh from the façade at the start of every
//! `AfterExecuteTransactions` call rather than cached across blocks, so a
//! governance mutation between blocks is observed on the very next block.

use formulator_runtime::{tags, Context, ProcessError};
use formulator_shared::{
    AlphaPolicy, Decode, Encode, GenesisPolicies, HyperPolicy, OmegaPolicy, RewardPolicy,
    SigmaPolicy,
};

fn load<T: Decode>(ctx: &dyn Context, tag: u8, name: &'static str) -> Result<T, ProcessError> {
    let bytes = ctx.process_data(&[tag]);
    if bytes.is_empty() {
        return Err(formulator_runtime::process_error!(missing_policy, name));
    }
    Ok(T::decode_exact(&bytes)?)
}

fn store<T: Encode>(ctx: &mut dyn Context, tag: u8, value: &T) {
    ctx.set_process_data(&[tag], value.encode_to_vec());
}

pub fn reward_policy(ctx: &dyn Context) -> Result<RewardPolicy, ProcessError> {
    load(ctx, tags::TAG_REWARD_POLICY, "RewardPolicy")
}

pub fn alpha_policy(ctx: &dyn Context) -> Result<AlphaPolicy, ProcessError> {
    load(ctx, tags::TAG_ALPHA_POLICY, "AlphaPolicy")
}

pub fn sigma_policy(ctx: &dyn Context) -> Result<SigmaPolicy, ProcessError> {
    load(ctx, tags::TAG_SIGMA_POLICY, "SigmaPolicy")
}

pub fn omega_policy(ctx: &dyn Context) -> Result<OmegaPolicy, ProcessError> {
    load(ctx, tags::TAG_OMEGA_POLICY, "OmegaPolicy")
}

pub fn hyper_policy(ctx: &dyn Context) -> Result<HyperPolicy, ProcessError> {
    load(ctx, tags::TAG_HYPER_POLICY, "HyperPolicy")
}

/// Asserts that all five policy blobs are present, the `OnLoadChain`
/// precondition.
pub fn assert_policies_loaded(ctx: &dyn Context) -> Result<(), ProcessError> {
    reward_policy(ctx)?;
    alpha_policy(ctx)?;
    sigma_policy(ctx)?;
    omega_policy(ctx)?;
    hyper_policy(ctx)?;
    log::debug!("formulator: all five genesis policy blobs present");
    Ok(())
}

/// Writes all five policy blobs. Called exactly once, at genesis.
pub fn init_policy(
    ctx: &mut dyn Context,
    reward: RewardPolicy,
    alpha: AlphaPolicy,
    sigma: SigmaPolicy,
    omega: OmegaPolicy,
    hyper: HyperPolicy,
) -> Result<(), ProcessError> {
    store(ctx, tags::TAG_REWARD_POLICY, &reward);
    store(ctx, tags::TAG_ALPHA_POLICY, &alpha);
    store(ctx, tags::TAG_SIGMA_POLICY, &sigma);
    store(ctx, tags::TAG_OMEGA_POLICY, &omega);
    store(ctx, tags::TAG_HYPER_POLICY, &hyper);
    Ok(())
}

/// Loads `GenesisPolicies` (the `serde`-friendly config mirror) and writes
/// the five policy blobs through `init_policy`, for an embedding
/// application that deserialized genesis parameters from TOML/JSON.
pub fn init_policy_from_config(
    ctx: &mut dyn Context,
    config: GenesisPolicies,
) -> Result<(), ProcessError> {
    init_policy(
        ctx,
        config.reward.into(),
        AlphaPolicy { required_amount: formulator_shared::Amount::from_coins(config.alpha.required_amount_coins) },
        SigmaPolicy { required_amount: formulator_shared::Amount::from_coins(config.sigma.required_amount_coins) },
        OmegaPolicy { required_amount: formulator_shared::Amount::from_coins(config.omega.required_amount_coins) },
        HyperPolicy {
            required_amount: formulator_shared::Amount::from_coins(config.hyper.required_amount_coins),
            minimum_staking_amount: formulator_shared::Amount::from_coins(
                config.hyper.minimum_staking_amount_coins,
            ),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulator_test_support::{
        sample_alpha_policy, sample_hyper_policy, sample_omega_policy, sample_reward_policy,
        sample_sigma_policy, InMemoryContext,
    };

    #[test]
    fn missing_policy_is_an_error() {
        let ctx = InMemoryContext::new(1);
        assert!(matches!(
            reward_policy(&ctx),
            Err(ProcessError::MissingPolicy("RewardPolicy"))
        ));
    }

    #[test]
    fn init_policy_round_trips_all_five() {
        let mut ctx = InMemoryContext::new(1);
        init_policy(
            &mut ctx,
            sample_reward_policy(),
            sample_alpha_policy(),
            sample_sigma_policy(),
            sample_omega_policy(),
            sample_hyper_policy(),
        )
        .unwrap();
        assert!(assert_policies_loaded(&ctx).is_ok());
        assert_eq!(reward_policy(&ctx).unwrap(), sample_reward_policy());
    }
}
