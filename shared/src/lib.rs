//! Shared data model for the PoF formulator reward accounting engine:
//! fixed-point amounts, addresses, the ordered address->amount map, account
//! variants, policy blobs, and the canonical binary codec they all share.

pub mod account;
pub mod address;
pub mod address_amount_map;
pub mod amount;
pub mod codec;
pub mod policy;

pub use account::{Account, FormulatorAccount, FormulatorType, OpaqueAccount, ValidatorPolicy};
pub use address::Address;
pub use address_amount_map::AddressAmountMap;
pub use amount::{Amount, AmountError, COIN};
pub use codec::{CodecError, Decode, Encode};
pub use policy::{
    AlphaPolicy, GenesisPolicies, HyperPolicy, HyperPolicyConfig, OmegaPolicy, RewardPolicy,
    RewardPolicyConfig, SigmaPolicy, TierPolicyConfig,
};
