//! Formulator account variants.
//!
//! The chain's account model is an open variant set (`FormulatorAccount`,
//! `VaultAccount`, `MultiAccount`, ...); only the formulator variant and its
//! tier tag are owned here. Modeled as a closed, tagged enum rather than
//! dynamic dispatch by name, per the "Polymorphic account resolution"
//! design note — an unknown tag is always a decode error, never a silent
//! default.

use crate::address::Address;
use crate::amount::Amount;
use crate::codec::{write_u8, CodecError, Decode, Encode, Reader};

/// The four formulator tiers. Only `Hyper` accepts third-party staking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulatorType {
    Alpha,
    Sigma,
    Omega,
    Hyper,
}

impl FormulatorType {
    fn tag(self) -> u8 {
        match self {
            FormulatorType::Alpha => 1,
            FormulatorType::Sigma => 2,
            FormulatorType::Omega => 3,
            FormulatorType::Hyper => 4,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, CodecError> {
        match tag {
            1 => Ok(FormulatorType::Alpha),
            2 => Ok(FormulatorType::Sigma),
            3 => Ok(FormulatorType::Omega),
            4 => Ok(FormulatorType::Hyper),
            other => Err(CodecError::InvalidTag(other)),
        }
    }
}

impl Encode for FormulatorType {
    fn encode(&self, out: &mut Vec<u8>) {
        write_u8(out, self.tag());
    }
}

impl Decode for FormulatorType {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        FormulatorType::from_tag(r.read_u8()?)
    }
}

/// Governs a Hyper's staking economics. Only present on Hyper accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorPolicy {
    /// Commission withheld from staker payouts, in thousandths (0..=1000).
    pub commission_ratio_1000: u32,
    /// Multiple of `RewardPolicy::pay_reward_every_blocks` between this
    /// Hyper's own staking payouts. Zero is rejected at update time — see
    /// the open question in `spec.md` section 9: it would both divide by
    /// zero in the payout-due check and fire a payout on every epoch.
    pub pay_out_interval: u32,
    /// Minimum total stake a staker's first `Staking` transaction must
    /// reach.
    pub minimum_staking: Amount,
}

impl Encode for ValidatorPolicy {
    fn encode(&self, out: &mut Vec<u8>) {
        self.commission_ratio_1000.encode(out);
        self.pay_out_interval.encode(out);
        self.minimum_staking.encode(out);
    }
}

impl Decode for ValidatorPolicy {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(ValidatorPolicy {
            commission_ratio_1000: u32::decode(r)?,
            pay_out_interval: u32::decode(r)?,
            minimum_staking: Amount::decode(r)?,
        })
    }
}

/// A formulator (block-producing) account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulatorAccount {
    pub address: Address,
    pub formulator_type: FormulatorType,
    /// Self-bonded stake backing this formulator's reward power.
    pub amount: Amount,
    /// Height at which the account was created.
    pub pre_height: u32,
    /// Present only for `FormulatorType::Hyper`.
    pub policy: Option<ValidatorPolicy>,
}

impl FormulatorAccount {
    pub fn is_hyper(&self) -> bool {
        matches!(self.formulator_type, FormulatorType::Hyper)
    }

    /// The validator policy of a Hyper account. Accessing this on a
    /// non-Hyper account (or a Hyper missing its policy, which should
    /// never happen once admitted) is a programming error in the caller.
    pub fn hyper_policy(&self) -> Option<&ValidatorPolicy> {
        self.policy.as_ref()
    }
}

impl Encode for FormulatorAccount {
    fn encode(&self, out: &mut Vec<u8>) {
        self.address.encode(out);
        self.formulator_type.encode(out);
        self.amount.encode(out);
        self.pre_height.encode(out);
        match &self.policy {
            Some(policy) => {
                write_u8(out, 1);
                policy.encode(out);
            }
            None => write_u8(out, 0),
        }
    }
}

impl Decode for FormulatorAccount {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let address = Address::decode(r)?;
        let formulator_type = FormulatorType::decode(r)?;
        let amount = Amount::decode(r)?;
        let pre_height = u32::decode(r)?;
        let policy = match r.read_u8()? {
            0 => None,
            1 => Some(ValidatorPolicy::decode(r)?),
            other => return Err(CodecError::InvalidTag(other)),
        };
        Ok(FormulatorAccount { address, formulator_type, amount, pre_height, policy })
    }
}

/// Any other chain account variant the core treats opaquely: it knows such
/// accounts exist (a generator could in principle resolve to one, which is
/// an `InvalidAccountType` error) but never reads their fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueAccount {
    pub address: Address,
}

/// The open account variant set the context façade resolves addresses to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Formulator(FormulatorAccount),
    Other(OpaqueAccount),
}

impl Account {
    pub fn address(&self) -> Address {
        match self {
            Account::Formulator(acc) => acc.address,
            Account::Other(acc) => acc.address,
        }
    }

    pub fn as_formulator(&self) -> Option<&FormulatorAccount> {
        match self {
            Account::Formulator(acc) => Some(acc),
            Account::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        let mut bytes = [0u8; 24];
        bytes[23] = b;
        Address::from_bytes(bytes)
    }

    #[test]
    fn hyper_account_round_trips_with_policy() {
        let acc = FormulatorAccount {
            address: addr(1),
            formulator_type: FormulatorType::Hyper,
            amount: Amount::from_coins(10),
            pre_height: 42,
            policy: Some(ValidatorPolicy {
                commission_ratio_1000: 100,
                pay_out_interval: 2,
                minimum_staking: Amount::from_coins(1),
            }),
        };
        let encoded = acc.encode_to_vec();
        assert_eq!(FormulatorAccount::decode_exact(&encoded).unwrap(), acc);
    }

    #[test]
    fn alpha_account_round_trips_without_policy() {
        let acc = FormulatorAccount {
            address: addr(2),
            formulator_type: FormulatorType::Alpha,
            amount: Amount::from_coins(1),
            pre_height: 1,
            policy: None,
        };
        let encoded = acc.encode_to_vec();
        assert_eq!(FormulatorAccount::decode_exact(&encoded).unwrap(), acc);
    }

    #[test]
    fn unknown_formulator_type_tag_is_a_decode_error() {
        let bytes = vec![9u8];
        assert!(matches!(
            FormulatorType::decode_exact(&bytes),
            Err(CodecError::InvalidTag(9))
        ));
    }
}
