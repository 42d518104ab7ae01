//! The transactional context façade the process operates against.
//!
//! All mutations performed during one call are either committed atomically
//! with the block or discarded as a whole; reads are repeatable-read
//! within one block. Snapshot ids are LIFO markers over a journaled
//! overlay: reverting an outer snapshot discards every inner commit above
//! it.

use formulator_shared::{Account, Address};

use crate::error::ProcessError;

/// A snapshot marker returned by `Context::snapshot`.
pub type SnapshotId = u32;

pub trait Context {
    fn account(&self, addr: Address) -> Result<Account, ProcessError>;
    fn has_account(&self, addr: Address) -> Result<bool, ProcessError>;
    fn create_account(&mut self, account: Account) -> Result<(), ProcessError>;
    /// Writes back an already-existing account, e.g. after a transaction
    /// mutates one of its fields (`UpdateValidatorPolicy`). Fails if no
    /// account currently exists at `account`'s address.
    fn set_account(&mut self, account: Account) -> Result<(), ProcessError>;

    fn seq(&self, addr: Address) -> u64;
    fn add_seq(&mut self, addr: Address);

    /// Reads process-scoped data under `tag`. Returns an empty vec if
    /// absent.
    fn process_data(&self, tag: &[u8]) -> Vec<u8>;
    /// Writes process-scoped data under `tag`; an empty `bytes` deletes
    /// the entry.
    fn set_process_data(&mut self, tag: &[u8], bytes: Vec<u8>);

    /// Reads account-scoped data for `addr` under `tag`. Returns an empty
    /// vec if absent.
    fn account_data(&self, addr: Address, tag: &[u8]) -> Vec<u8>;
    /// Writes account-scoped data for `addr` under `tag`; an empty
    /// `bytes` deletes the entry.
    fn set_account_data(&mut self, addr: Address, tag: &[u8], bytes: Vec<u8>);

    fn snapshot(&mut self) -> SnapshotId;
    fn revert(&mut self, id: SnapshotId);
    fn commit(&mut self, id: SnapshotId);

    /// Height of the block currently being executed.
    fn target_height(&self) -> u32;
}

/// A façade whose process/account data tags are namespaced by a process
/// id, obtained via `switch_context`. Delegates every other operation to
/// the wrapped context unchanged.
pub struct ProcessView<'a, C: Context + ?Sized> {
    inner: &'a mut C,
    pid: u8,
}

impl<'a, C: Context + ?Sized> ProcessView<'a, C> {
    fn namespaced(&self, tag: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(1 + tag.len());
        key.push(self.pid);
        key.extend_from_slice(tag);
        key
    }
}

/// Returns a façade whose process/account data tags are namespaced by
/// `pid`, mirroring `types.SwitchContextWrapper` in the reference
/// implementation.
pub fn switch_context<C: Context + ?Sized>(ctx: &mut C, pid: u8) -> ProcessView<'_, C> {
    ProcessView { inner: ctx, pid }
}

impl<'a, C: Context + ?Sized> Context for ProcessView<'a, C> {
    fn account(&self, addr: Address) -> Result<Account, ProcessError> {
        self.inner.account(addr)
    }

    fn has_account(&self, addr: Address) -> Result<bool, ProcessError> {
        self.inner.has_account(addr)
    }

    fn create_account(&mut self, account: Account) -> Result<(), ProcessError> {
        self.inner.create_account(account)
    }

    fn set_account(&mut self, account: Account) -> Result<(), ProcessError> {
        self.inner.set_account(account)
    }

    fn seq(&self, addr: Address) -> u64 {
        self.inner.seq(addr)
    }

    fn add_seq(&mut self, addr: Address) {
        self.inner.add_seq(addr)
    }

    fn process_data(&self, tag: &[u8]) -> Vec<u8> {
        self.inner.process_data(&self.namespaced(tag))
    }

    fn set_process_data(&mut self, tag: &[u8], bytes: Vec<u8>) {
        let key = self.namespaced(tag);
        self.inner.set_process_data(&key, bytes)
    }

    fn account_data(&self, addr: Address, tag: &[u8]) -> Vec<u8> {
        self.inner.account_data(addr, &self.namespaced(tag))
    }

    fn set_account_data(&mut self, addr: Address, tag: &[u8], bytes: Vec<u8>) {
        let key = self.namespaced(tag);
        self.inner.set_account_data(addr, &key, bytes)
    }

    fn snapshot(&mut self) -> SnapshotId {
        self.inner.snapshot()
    }

    fn revert(&mut self, id: SnapshotId) {
        self.inner.revert(id)
    }

    fn commit(&mut self, id: SnapshotId) {
        self.inner.commit(id)
    }

    fn target_height(&self) -> u32 {
        self.inner.target_height()
    }
}
