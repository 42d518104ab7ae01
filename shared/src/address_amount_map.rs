//! Ordered `Address -> Amount` mapping.
//!
//! Iteration order must match the insertion order observed during the
//! block's execution, and serialization must reproduce that order
//! byte-for-byte — this is a consensus determinism requirement, not a
//! convenience. Backed by `indexmap::IndexMap`, which (unlike a hash map or
//! a hash-keyed trie) preserves insertion order across inserts, removals of
//! other keys, and iteration.

use indexmap::IndexMap;

use crate::address::Address;
use crate::amount::Amount;
use crate::codec::{write_u32, CodecError, Decode, Encode, Reader};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressAmountMap {
    inner: IndexMap<Address, Amount>,
}

impl AddressAmountMap {
    pub fn new() -> Self {
        AddressAmountMap { inner: IndexMap::new() }
    }

    pub fn get(&self, addr: &Address) -> Option<Amount> {
        self.inner.get(addr).copied()
    }

    pub fn contains_key(&self, addr: &Address) -> bool {
        self.inner.contains_key(addr)
    }

    /// Inserts or overwrites an entry. Matches the reference `Put`: a
    /// fresh key is appended at the end of iteration order; an existing
    /// key keeps its original position but gets the new value.
    pub fn put(&mut self, addr: Address, amount: Amount) {
        self.inner.insert(addr, amount);
    }

    pub fn remove(&mut self, addr: &Address) -> Option<Amount> {
        self.inner.shift_remove(addr)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates in insertion order — the order every consumer (reward
    /// engine, staking payout, serialization) must use.
    pub fn iter(&self) -> impl Iterator<Item = (Address, Amount)> + '_ {
        self.inner.iter().map(|(k, v)| (*k, *v))
    }

    /// A snapshot of the current keys, for the "iterate a snapshot of keys
    /// while mutating values in place" compounding semantics `spec.md`
    /// section 9 requires.
    pub fn keys_snapshot(&self) -> Vec<Address> {
        self.inner.keys().copied().collect()
    }

    pub fn sum(&self) -> Amount {
        self.inner.values().copied().sum()
    }
}

impl FromIterator<(Address, Amount)> for AddressAmountMap {
    fn from_iter<I: IntoIterator<Item = (Address, Amount)>>(iter: I) -> Self {
        let mut map = AddressAmountMap::new();
        for (addr, amt) in iter {
            map.put(addr, amt);
        }
        map
    }
}

impl Encode for AddressAmountMap {
    fn encode(&self, out: &mut Vec<u8>) {
        write_u32(out, self.inner.len() as u32);
        for (addr, amount) in self.inner.iter() {
            addr.encode(out);
            amount.encode(out);
        }
    }
}

impl Decode for AddressAmountMap {
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let count = r.read_u32()? as usize;
        let mut map = AddressAmountMap::new();
        for _ in 0..count {
            let addr = Address::decode(r)?;
            let amount = Amount::decode(r)?;
            map.put(addr, amount);
        }
        Ok(map)
    }
}
