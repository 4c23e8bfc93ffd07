//! # Category Catalog
//!
//! The six BAC tracks a visitor can unlock.
//!
//! Categories are created once, in a fixed order, when a session starts and
//! are never removed. Their lock status is not stored here: it is derived
//! from the session's [`Activation`](crate::Activation), which keeps the
//! "at most one active" invariant true by construction.

use crate::CategoryId;
use serde::{Deserialize, Serialize};

// =============================================================================
// CATEGORY STATUS
// =============================================================================

/// Whether a category is unlocked for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    Locked,
    Active,
}

impl CategoryStatus {
    /// Check whether this is the active status.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Static definition of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique id, also the seed for code generation.
    pub id: CategoryId,
    /// Human-readable name.
    pub display_name: String,
    /// Uppercase prefix of every code value in this category.
    pub code_prefix: String,
    /// External document links, in display order.
    pub documents: Vec<String>,
}

impl Category {
    fn new(id: &str, display_name: &str, code_prefix: &str, documents: &[&str]) -> Self {
        Self {
            id: CategoryId::new(id),
            display_name: display_name.to_string(),
            code_prefix: code_prefix.to_string(),
            documents: documents.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    /// Produce a snapshot of this category with the given status.
    ///
    /// Document links are only disclosed for an active category.
    #[must_use]
    pub fn snapshot(&self, status: CategoryStatus) -> CategorySnapshot {
        CategorySnapshot {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            status,
            documents: if status.is_active() {
                self.documents.clone()
            } else {
                Vec::new()
            },
        }
    }
}

/// Point-in-time view of a category, as shown to visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub id: CategoryId,
    pub display_name: String,
    pub status: CategoryStatus,
    /// Empty unless `status` is [`CategoryStatus::Active`].
    pub documents: Vec<String>,
}

// =============================================================================
// BUILT-IN CATALOG
// =============================================================================

/// The fixed catalog, in display order.
#[must_use]
pub fn builtin() -> Vec<Category> {
    vec![
        Category::new(
            "math",
            "Mathématiques",
            "MATH",
            &[
                "https://drive.google.com/file/d/1abc123/view",
                "https://drive.google.com/file/d/1def456/view",
            ],
        ),
        Category::new(
            "sciences",
            "Sciences Expérimentales",
            "SCI",
            &[
                "https://drive.google.com/file/d/1ghi789/view",
                "https://drive.google.com/file/d/1jkl012/view",
            ],
        ),
        Category::new(
            "techniques",
            "Techniques",
            "TECH",
            &[
                "https://drive.google.com/file/d/1mno345/view",
                "https://drive.google.com/file/d/1pqr678/view",
            ],
        ),
        Category::new(
            "lettres",
            "Lettres",
            "LET",
            &[
                "https://drive.google.com/file/d/1stu901/view",
                "https://drive.google.com/file/d/1vwx234/view",
            ],
        ),
        Category::new(
            "informatique",
            "Sciences de l'informatique",
            "INFO",
            &[
                "https://drive.google.com/file/d/1yza567/view",
                "https://drive.google.com/file/d/1bcd890/view",
            ],
        ),
        Category::new(
            "economie",
            "Économie",
            "ECO",
            &[
                "https://drive.google.com/file/d/1efg123/view",
                "https://drive.google.com/file/d/1hij456/view",
            ],
        ),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
