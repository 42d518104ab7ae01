//! A mock admin loader/resolver pair: a fixed address, no lookup required.

use std::collections::HashMap;

use formulator_runtime::{Admin, AdminLoader};
use formulator_shared::Address;

#[derive(Debug, Default, Clone)]
pub struct MockAdminLoader {
    data: HashMap<(u8, Vec<u8>), Vec<u8>>,
}

impl MockAdminLoader {
    pub fn new() -> Self {
        MockAdminLoader::default()
    }

    pub fn set(&mut self, pid: u8, tag: &[u8], bytes: Vec<u8>) {
        self.data.insert((pid, tag.to_vec()), bytes);
    }
}

impl AdminLoader for MockAdminLoader {
    fn process_data(&self, pid: u8, tag: &[u8]) -> Vec<u8> {
        self.data.get(&(pid, tag.to_vec())).cloned().unwrap_or_default()
    }
}

/// Always resolves to whatever fixed address it was built with, regardless
/// of process name — good enough for exercising code that merely needs an
/// admin address to exist.
#[derive(Debug, Clone, Copy)]
pub struct MockAdmin {
    address: Address,
}

impl MockAdmin {
    pub fn new(address: Address) -> Self {
        MockAdmin { address }
    }
}

impl Admin for MockAdmin {
    fn admin_address(&self, _loader: &dyn AdminLoader, _process_name: &str) -> Option<Address> {
        Some(self.address)
    }
}
