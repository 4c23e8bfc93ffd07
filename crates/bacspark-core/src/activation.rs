//! # Activation State Machine
//!
//! Tracks which category, if any, is unlocked for the session.
//!
//! ```text
//! NoneActive ──validate ok──► CategoryActive(id) ──validate ok──► CategoryActive(id')
//! ```
//!
//! There is no transition back to `NoneActive`: the unlock lasts until the
//! session is dropped. A failed validation never touches this state.

use crate::{CategoryId, CategoryStatus};
use serde::{Deserialize, Serialize};

/// Activation state of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "category", rename_all = "snake_case")]
pub enum Activation {
    #[default]
    NoneActive,
    CategoryActive(CategoryId),
}

impl Activation {
    /// Move to `CategoryActive(category)`, replacing any previous unlock.
    pub fn activate(&mut self, category: CategoryId) {
        *self = Self::CategoryActive(category);
    }

    /// The unlocked category, if any.
    #[must_use]
    pub fn active(&self) -> Option<&CategoryId> {
        match self {
            Self::NoneActive => None,
            Self::CategoryActive(id) => Some(id),
        }
    }

    /// Derived status of a category under this state.
    #[must_use]
    pub fn status_of(&self, category: &CategoryId) -> CategoryStatus {
        if self.active() == Some(category) {
            CategoryStatus::Active
        } else {
            CategoryStatus::Locked
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
