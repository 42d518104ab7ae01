//! Stable, one-byte storage tag constants.
//!
//! These values are consensus-level: every node must agree on them
//! forever, the same way the chain store's byte-blob contract demands.

pub const TAG_REWARD_POLICY: u8 = 0x10;
pub const TAG_ALPHA_POLICY: u8 = 0x11;
pub const TAG_SIGMA_POLICY: u8 = 0x12;
pub const TAG_OMEGA_POLICY: u8 = 0x13;
pub const TAG_HYPER_POLICY: u8 = 0x14;

pub const TAG_GEN_COUNT_MAP: u8 = 0x20;
pub const TAG_STACK_REWARD_MAP: u8 = 0x21;
pub const TAG_LAST_PAID_HEIGHT: u8 = 0x22;

/// Epoch-boundary snapshot of a Hyper's per-staker balances, used to
/// compute the "cross" (min) amount against the current ledger.
pub const TAG_STAKING_AMOUNT_MAP: u8 = 0x30;
pub const TAG_STAKING_POWER_MAP: u8 = 0x31;
pub const TAG_LAST_STAKING_PAID_HEIGHT: u8 = 0x32;
/// Per-staker auto-compound flags for a Hyper, stored as one
/// `AddressAmountMap` (0/1) rather than one key per staker — the tag
/// bytes in `spec.md` section 6 are explicitly illustrative, and this
/// repo's `Context` has no key-enumeration primitive, so every
/// per-staker map the staking ledger needs is addressed as a single
/// account-scoped blob instead of exploding one storage key per staker.
pub const TAG_USER_AUTO_STAKING: u8 = 0x33;
/// The live staking ledger for a Hyper: current bonded amount per staker.
pub const TAG_STAKING_AMOUNT: u8 = 0x34;
