//! The error taxonomy every fallible core operation returns through.
//!
//! No error is recovered locally: any `Err` here aborts the whole
//! `AfterExecuteTransactions` call, and the outer block driver is expected
//! to discard the pending context snapshot rather than commit a partial
//! result.

use thiserror::Error;

use formulator_shared::{AmountError, CodecError};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("policy missing: {0}")]
    MissingPolicy(&'static str),

    #[error("invalid account type: {0}")]
    InvalidAccountType(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] CodecError),

    #[error("vault error: {0}")]
    Vault(String),

    #[error("state error: {0}")]
    State(String),

    #[error("amount arithmetic error: {0}")]
    Arithmetic(#[from] AmountError),
}

/// Builds a `ProcessError` with a formatted message, mirroring the
/// reference implementation's `actor_error!` helper: name the kind, supply
/// a `format!`-style message.
#[macro_export]
macro_rules! process_error {
    (missing_policy, $name:expr) => {
        $crate::error::ProcessError::MissingPolicy($name)
    };
    (invalid_account_type, $($arg:tt)*) => {
        $crate::error::ProcessError::InvalidAccountType(format!($($arg)*))
    };
    (vault, $($arg:tt)*) => {
        $crate::error::ProcessError::Vault(format!($($arg)*))
    };
    (state, $($arg:tt)*) => {
        $crate::error::ProcessError::State(format!($($arg)*))
    };
}
