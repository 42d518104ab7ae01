//! The chain process interface the formulator implements, and its block
//! hook types.

use std::rc::Rc;

use formulator_shared::Address;

use crate::admin::Admin;
use crate::context::Context;
use crate::error::ProcessError;
use crate::vault::Vault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub height: u32,
    pub generator: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
}

/// Resolves this process's collaborators by name, the way the reference
/// implementation's `pm.ProcessByName` does, but typed rather than
/// downcast at runtime.
pub trait ProcessManager {
    fn vault(&self) -> Rc<dyn Vault>;
    fn admin(&self) -> Rc<dyn Admin>;
}

/// A chain process: a pluggable unit of per-block bookkeeping hooked into
/// the block execution driver before and after its transactions run.
pub trait Process {
    fn id(&self) -> u8;
    fn name(&self) -> &'static str;
    fn version(&self) -> &'static str;

    /// Registers this process's account/transaction types and resolves its
    /// collaborators. Called once at chain construction.
    fn init(&mut self, pm: &dyn ProcessManager) -> Result<(), ProcessError>;

    /// Asserts whatever genesis-time preconditions this process requires
    /// (e.g. that its policy blobs were set up by the embedding
    /// application).
    fn on_load_chain(&self, ctx: &dyn Context) -> Result<(), ProcessError>;

    fn before_execute_transactions(&self, ctx: &mut dyn Context) -> Result<(), ProcessError>;

    fn after_execute_transactions(
        &self,
        block: &Block,
        ctx: &mut dyn Context,
    ) -> Result<(), ProcessError>;

    fn on_save_data(&self, block: &Block, ctx: &mut dyn Context) -> Result<(), ProcessError>;
}
