//! An in-memory `Context` good enough to exercise the formulator process
//! without a real chain store behind it.

use std::collections::HashMap;

use indexmap::IndexMap;

use formulator_runtime::{Context, ProcessError, SnapshotId};
use formulator_shared::{Account, Address};

#[derive(Clone, Default)]
struct State {
    accounts: IndexMap<Address, Account>,
    seqs: HashMap<Address, u64>,
    process_data: HashMap<Vec<u8>, Vec<u8>>,
    account_data: HashMap<(Address, Vec<u8>), Vec<u8>>,
}

/// A journaled in-memory context. `snapshot`/`revert`/`commit` work by
/// cloning the whole state on `snapshot` and either restoring or discarding
/// that clone later — fine for test fixtures, nowhere near how a real chain
/// store would back this.
pub struct InMemoryContext {
    state: State,
    journal: Vec<State>,
    target_height: u32,
}

impl InMemoryContext {
    pub fn new(target_height: u32) -> Self {
        InMemoryContext { state: State::default(), journal: Vec::new(), target_height }
    }

    pub fn set_target_height(&mut self, height: u32) {
        self.target_height = height;
    }

    /// Seeds an account directly, bypassing `create_account`'s
    /// already-exists check — useful for constructing fixtures.
    pub fn seed_account(&mut self, account: Account) {
        self.state.accounts.insert(account.address(), account);
    }
}

impl Context for InMemoryContext {
    fn account(&self, addr: Address) -> Result<Account, ProcessError> {
        self.state
            .accounts
            .get(&addr)
            .cloned()
            .ok_or_else(|| formulator_runtime::process_error!(state, "no account at {addr}"))
    }

    fn has_account(&self, addr: Address) -> Result<bool, ProcessError> {
        Ok(self.state.accounts.contains_key(&addr))
    }

    fn create_account(&mut self, account: Account) -> Result<(), ProcessError> {
        let addr = account.address();
        if self.state.accounts.contains_key(&addr) {
            return Err(formulator_runtime::process_error!(
                state,
                "account already exists at {addr}"
            ));
        }
        self.state.accounts.insert(addr, account);
        Ok(())
    }

    fn set_account(&mut self, account: Account) -> Result<(), ProcessError> {
        let addr = account.address();
        if !self.state.accounts.contains_key(&addr) {
            return Err(formulator_runtime::process_error!(state, "no account at {addr}"));
        }
        self.state.accounts.insert(addr, account);
        Ok(())
    }

    fn seq(&self, addr: Address) -> u64 {
        self.state.seqs.get(&addr).copied().unwrap_or(0)
    }

    fn add_seq(&mut self, addr: Address) {
        *self.state.seqs.entry(addr).or_insert(0) += 1;
    }

    fn process_data(&self, tag: &[u8]) -> Vec<u8> {
        self.state.process_data.get(tag).cloned().unwrap_or_default()
    }

    fn set_process_data(&mut self, tag: &[u8], bytes: Vec<u8>) {
        if bytes.is_empty() {
            self.state.process_data.remove(tag);
        } else {
            self.state.process_data.insert(tag.to_vec(), bytes);
        }
    }

    fn account_data(&self, addr: Address, tag: &[u8]) -> Vec<u8> {
        self.state.account_data.get(&(addr, tag.to_vec())).cloned().unwrap_or_default()
    }

    fn set_account_data(&mut self, addr: Address, tag: &[u8], bytes: Vec<u8>) {
        let key = (addr, tag.to_vec());
        if bytes.is_empty() {
            self.state.account_data.remove(&key);
        } else {
            self.state.account_data.insert(key, bytes);
        }
    }

    fn snapshot(&mut self) -> SnapshotId {
        let id = self.journal.len() as SnapshotId;
        self.journal.push(self.state.clone());
        id
    }

    fn revert(&mut self, id: SnapshotId) {
        let id = id as usize;
        self.state = self.journal[id].clone();
        self.journal.truncate(id);
    }

    fn commit(&mut self, id: SnapshotId) {
        self.journal.truncate(id as usize);
    }

    fn target_height(&self) -> u32 {
        self.target_height
    }
}
