//! Generation counter: per-payout-epoch tally of blocks produced per
//! generator address.
//!
//! GenCount only counts blocks between two consecutive payout epochs; it
//! is cleared on flush (invariant 5 in `spec.md` section 3).

use std::collections::HashMap;

use formulator_runtime::{tags, Context};
use formulator_shared::{Address, CodecError, Decode, Encode};

/// A flushed generation-count snapshot. Unlike `AddressAmountMap`, this is
/// a plain map: the reward engine re-sorts its keys lexicographically
/// before iterating (see `reward_engine::sorted_addresses`), so the
/// flush's own iteration order carries no determinism requirement.
pub type CountMap = HashMap<Address, u32>;

struct SerializedCountMap(CountMap);

impl Encode for SerializedCountMap {
    fn encode(&self, out: &mut Vec<u8>) {
        formulator_shared::codec::write_u32(out, self.0.len() as u32);
        let mut addrs: Vec<&Address> = self.0.keys().collect();
        addrs.sort();
        for addr in addrs {
            addr.encode(out);
            self.0[addr].encode(out);
        }
    }
}

impl Decode for SerializedCountMap {
    fn decode(r: &mut formulator_shared::codec::Reader<'_>) -> Result<Self, CodecError> {
        let count = r.read_u32()? as usize;
        let mut map = CountMap::new();
        for _ in 0..count {
            let addr = Address::decode(r)?;
            let n = u32::decode(r)?;
            map.insert(addr, n);
        }
        Ok(SerializedCountMap(map))
    }
}

fn load(ctx: &dyn Context) -> Result<CountMap, CodecError> {
    let bytes = ctx.process_data(&[tags::TAG_GEN_COUNT_MAP]);
    if bytes.is_empty() {
        return Ok(CountMap::new());
    }
    Ok(SerializedCountMap::decode_exact(&bytes)?.0)
}

fn store(ctx: &mut dyn Context, map: &CountMap) {
    if map.is_empty() {
        ctx.set_process_data(&[tags::TAG_GEN_COUNT_MAP], Vec::new());
    } else {
        let encoded = SerializedCountMap(map.clone()).encode_to_vec();
        ctx.set_process_data(&[tags::TAG_GEN_COUNT_MAP], encoded);
    }
}

/// Increments the generation count for `generator` by one.
pub fn add_gen_count(
    ctx: &mut dyn Context,
    generator: Address,
) -> Result<(), formulator_runtime::ProcessError> {
    let mut map = load(ctx)?;
    *map.entry(generator).or_insert(0) += 1;
    store(ctx, &map);
    Ok(())
}

/// Loads and deletes the generation-count map, returning whatever it held
/// (empty if the map was missing or empty).
pub fn flush_gen_count_map(
    ctx: &mut dyn Context,
) -> Result<CountMap, formulator_runtime::ProcessError> {
    let map = load(ctx)?;
    ctx.set_process_data(&[tags::TAG_GEN_COUNT_MAP], Vec::new());
    Ok(map)
}
