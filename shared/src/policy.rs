//! Process-wide policy blobs, set once at genesis and thereafter read-only.
//!
//! Policies are value types. The reward engine snapshots them fresh from
//! the context façade at the start of every `AfterExecuteTransactions`
//! call rather than caching them across blocks, so a governance mutation
//! between blocks is observed on the very next block — see the "Cyclic
//! policy references" design note.

use crate::amount::Amount;
use crate::codec::{CodecError, Decode, Encode, Reader};

/// Governs reward distribution: how much is minted per block, how often
/// the payout epoch fires, and the per-tier efficiency weights used to
/// turn self-bonded stake into reward power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPolicy {
    pub reward_per_block: Amount,
    pub pay_reward_every_blocks: u32,
    pub alpha_efficiency_1000: u32,
    pub sigma_efficiency_1000: u32,
    pub omega_efficiency_1000: u32,
    pub hyper_efficiency_1000: u32,
    pub staking_efficiency_1000: u32,
}

impl Encode for RewardPolicy {
    fn encode(&self, out: &mut Vec<u8>) {
        self.reward_per_block.encode(out);
        self.pay_reward_every_blocks.encode(out);
        self.alpha_efficiency_1000.encode(out);
        self.sigma_efficiency_1000.encode(out);
        self.omega_efficiency_1000.encode(out);
        self.hyper_efficiency_1000.encode(out);
        self.staking_efficiency_1000.encode(out);
    }
}

impl Decode for RewardPolicy {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(RewardPolicy {
            reward_per_block: Amount::decode(r)?,
            pay_reward_every_blocks: u32::decode(r)?,
            alpha_efficiency_1000: u32::decode(r)?,
            sigma_efficiency_1000: u32::decode(r)?,
            omega_efficiency_1000: u32::decode(r)?,
            hyper_efficiency_1000: u32::decode(r)?,
            staking_efficiency_1000: u32::decode(r)?,
        })
    }
}

impl RewardPolicy {
    pub fn efficiency_for(&self, t: crate::account::FormulatorType) -> u32 {
        use crate::account::FormulatorType::*;
        match t {
            Alpha => self.alpha_efficiency_1000,
            Sigma => self.sigma_efficiency_1000,
            Omega => self.omega_efficiency_1000,
            Hyper => self.hyper_efficiency_1000,
        }
    }
}

/// Tier-creation requirements. The reward engine does not consult these —
/// it only needs to know the five policy blobs exist at genesis (the
/// `OnLoadChain` precondition) — so each is represented by the minimum
/// required-bond field a creation transaction (out of this core's scope)
/// would enforce.
macro_rules! tier_policy {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub required_amount: Amount,
        }

        impl Encode for $name {
            fn encode(&self, out: &mut Vec<u8>) {
                self.required_amount.encode(out);
            }
        }

        impl Decode for $name {
            fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
                Ok($name { required_amount: Amount::decode(r)? })
            }
        }
    };
}

tier_policy!(AlphaPolicy);
tier_policy!(SigmaPolicy);
tier_policy!(OmegaPolicy);

/// Hyper creation policy. Unlike the other three tiers, a freshly created
/// Hyper also needs a default `ValidatorPolicy` to govern its staking
/// economics until the owner calls `UpdateValidatorPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyperPolicy {
    pub required_amount: Amount,
    pub minimum_staking_amount: Amount,
}

impl Encode for HyperPolicy {
    fn encode(&self, out: &mut Vec<u8>) {
        self.required_amount.encode(out);
        self.minimum_staking_amount.encode(out);
    }
}

impl Decode for HyperPolicy {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(HyperPolicy {
            required_amount: Amount::decode(r)?,
            minimum_staking_amount: Amount::decode(r)?,
        })
    }
}

/// All five policy blobs, bundled for `InitPolicy` and for genesis-config
/// deserialization by an embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenesisPolicies {
    pub reward: RewardPolicyConfig,
    pub alpha: TierPolicyConfig,
    pub sigma: TierPolicyConfig,
    pub omega: TierPolicyConfig,
    pub hyper: HyperPolicyConfig,
}

/// `serde`-friendly mirror of `RewardPolicy` for loading from an
/// application's TOML/JSON configuration, expressed in whole-coin and
/// per-mille units rather than raw base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RewardPolicyConfig {
    pub reward_per_block_coins: u64,
    pub pay_reward_every_blocks: u32,
    pub alpha_efficiency_1000: u32,
    pub sigma_efficiency_1000: u32,
    pub omega_efficiency_1000: u32,
    pub hyper_efficiency_1000: u32,
    pub staking_efficiency_1000: u32,
}

impl From<RewardPolicyConfig> for RewardPolicy {
    fn from(c: RewardPolicyConfig) -> Self {
        RewardPolicy {
            reward_per_block: Amount::from_coins(c.reward_per_block_coins),
            pay_reward_every_blocks: c.pay_reward_every_blocks,
            alpha_efficiency_1000: c.alpha_efficiency_1000,
            sigma_efficiency_1000: c.sigma_efficiency_1000,
            omega_efficiency_1000: c.omega_efficiency_1000,
            hyper_efficiency_1000: c.hyper_efficiency_1000,
            staking_efficiency_1000: c.staking_efficiency_1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TierPolicyConfig {
    pub required_amount_coins: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HyperPolicyConfig {
    pub required_amount_coins: u64,
    pub minimum_staking_amount_coins: u64,
}
