//! Runtime interfaces the formulator process is built against: the
//! transactional context façade, the vault and admin collaborators, the
//! chain process hook trait, storage tag constants, and the error
//! taxonomy every fallible operation returns through.

pub mod admin;
pub mod context;
pub mod error;
pub mod process;
pub mod tags;
pub mod vault;

pub use admin::{Admin, AdminLoader};
pub use context::{switch_context, Context, ProcessView, SnapshotId};
pub use error::ProcessError;
pub use process::{Block, BlockHeader, Process, ProcessManager};
pub use vault::Vault;
