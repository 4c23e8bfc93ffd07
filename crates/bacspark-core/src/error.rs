//! # Error Types
//!
//! Errors produced by the core. Redemption has exactly one failure mode
//! ([`SparkError::CodeRejected`]); the rest belong to admin operations.

use crate::{CategoryId, CodeId};
use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, SparkError>;

/// Errors from the code registry and session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparkError {
    /// The submitted code does not exist or has already been used.
    ///
    /// Deliberately unclassified: visitors only ever see one message.
    #[error("invalid code")]
    CodeRejected,

    /// No code with this id exists in the registry.
    #[error("unknown code id: {0}")]
    UnknownCode(CodeId),

    /// The code was already marked used; its original stamp is kept.
    #[error("code {0} is already marked used")]
    AlreadyUsed(CodeId),

    /// No category with this id exists in the catalog.
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),
}
