//! # BAC Spark Core
//!
//! The deterministic logic behind BAC Spark code gating.
//!
//! This crate owns:
//! - The fixed category catalog (six BAC tracks)
//! - Access code generation (one canonical, deterministic rule)
//! - The code registry (lookup, mark used, availability, history)
//! - The activation state machine (which category is unlocked)
//! - The [`Session`] object that ties them together
//!
//! Nothing here performs I/O, reads the clock, or spawns tasks.
//! Timestamps are passed in by the caller so every operation is reproducible.

pub mod activation;
pub mod catalog;
pub mod code;
pub mod error;
pub mod pagination;
pub mod registry;
pub mod session;

pub use activation::Activation;
pub use catalog::{Category, CategorySnapshot, CategoryStatus};
pub use code::AccessCode;
pub use error::{Result, SparkError};
pub use pagination::Page;
pub use registry::{CategorySummary, CodeRegistry};
pub use session::{Redemption, Session};

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// LIMITS
// =============================================================================

/// Number of codes generated for every category.
pub const CODES_PER_CATEGORY: usize = 100;

/// Inputs longer than this are rejected before any lookup.
pub const MAX_CODE_INPUT_LEN: usize = 64;

/// Timestamp type used for `used_at` stamps.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a category (e.g. `math`, `sciences`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an access code (e.g. `math_1`).
///
/// Distinct from the code *value* a visitor types in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeId(String);

impl CodeId {
    /// Create a code id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the id of the `index`-th code of a category.
    #[must_use]
    pub fn for_index(category: &CategoryId, index: usize) -> Self {
        Self(format!("{}_{}", category.as_str(), index))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_id_for_index_joins_with_underscore() {
        let id = CodeId::for_index(&CategoryId::new("math"), 7);
        assert_eq!(id.as_str(), "math_7");
    }

    #[test]
    fn ids_display_as_raw_string() {
        assert_eq!(CategoryId::new("lettres").to_string(), "lettres");
        assert_eq!(CodeId::new("eco_12").to_string(), "eco_12");
    }
}
