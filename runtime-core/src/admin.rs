//! Pure read-only admin lookups.

use formulator_shared::Address;

/// Loader-side view the admin process exposes; narrow enough that a test
/// harness can implement it trivially.
pub trait AdminLoader {
    fn process_data(&self, pid: u8, tag: &[u8]) -> Vec<u8>;
}

pub trait Admin {
    /// Returns the configured admin address for `process_name`, read
    /// straight off genesis state.
    fn admin_address(&self, loader: &dyn AdminLoader, process_name: &str) -> Option<Address>;
}
