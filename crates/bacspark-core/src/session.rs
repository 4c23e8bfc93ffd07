//! # Session
//!
//! The owned application state: catalog, code registry and activation.
//!
//! A `Session` is created once per process (or per test) and passed to
//! whoever needs it. Dropping it is the only way to reset activation and
//! used-code history.

use crate::activation::Activation;
use crate::catalog::{self, Category, CategorySnapshot};
use crate::code::{self, AccessCode};
use crate::error::{Result, SparkError};
use crate::pagination::{self, Page};
use crate::registry::{CategorySummary, CodeRegistry};
use crate::{CategoryId, CategoryStatus, CodeId, Timestamp};
use serde::{Deserialize, Serialize};

/// Outcome of a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redemption {
    pub category: CategoryId,
    pub display_name: String,
    pub documents: Vec<String>,
}

/// In-memory state for one visitor session.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Vec<Category>,
    registry: CodeRegistry,
    activation: Activation,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session over the built-in catalog with freshly generated codes.
    #[must_use]
    pub fn new() -> Self {
        let catalog = catalog::builtin();
        let registry = CodeRegistry::generate(&catalog);
        Self::with_parts(catalog, registry)
    }

    /// Create a session from an explicit catalog and registry.
    #[must_use]
    pub fn with_parts(catalog: Vec<Category>, registry: CodeRegistry) -> Self {
        Self {
            catalog,
            registry,
            activation: Activation::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Look up a category definition.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.catalog.iter().find(|c| c.id == *id)
    }

    fn require_category(&self, id: &CategoryId) -> Result<&Category> {
        self.category(id)
            .ok_or_else(|| SparkError::UnknownCategory(id.clone()))
    }

    /// Snapshots of every category, in catalog order, with derived status.
    #[must_use]
    pub fn categories(&self) -> Vec<CategorySnapshot> {
        self.catalog
            .iter()
            .map(|c| c.snapshot(self.activation.status_of(&c.id)))
            .collect()
    }

    /// Current status of one category.
    pub fn status_of(&self, id: &CategoryId) -> Result<CategoryStatus> {
        self.require_category(id)?;
        Ok(self.activation.status_of(id))
    }

    /// The unlocked category, if any.
    #[must_use]
    pub fn active_category(&self) -> Option<&CategoryId> {
        self.activation.active()
    }

    /// The full activation state.
    #[must_use]
    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    // -------------------------------------------------------------------------
    // Redemption
    // -------------------------------------------------------------------------

    /// Redeem a visitor-supplied code.
    ///
    /// Input is trimmed and case-folded. On a match against an unused code
    /// the owning category becomes the only active one. The code itself is
    /// not consumed; only [`Session::mark_used`] does that.
    pub fn redeem(&mut self, input: &str) -> Result<Redemption> {
        let value = code::normalize_input(input).ok_or(SparkError::CodeRejected)?;
        let category_id = self
            .registry
            .find_available(&value)
            .map(|c| c.category.clone())
            .ok_or(SparkError::CodeRejected)?;

        let category = self.require_category(&category_id)?;
        let redemption = Redemption {
            category: category.id.clone(),
            display_name: category.display_name.clone(),
            documents: category.documents.clone(),
        };

        self.activation.activate(category_id);
        Ok(redemption)
    }

    /// Boolean form of [`Session::redeem`].
    pub fn validate(&mut self, input: &str) -> bool {
        self.redeem(input).is_ok()
    }

    // -------------------------------------------------------------------------
    // Admin
    // -------------------------------------------------------------------------

    /// Get a code by id.
    #[must_use]
    pub fn code(&self, id: &CodeId) -> Option<&AccessCode> {
        self.registry.get(id)
    }

    /// Mark a code used at `at`. See [`CodeRegistry::mark_used`].
    pub fn mark_used(&mut self, id: &CodeId, at: Timestamp) -> Result<&AccessCode> {
        self.registry.mark_used(id, at)
    }

    /// Unused codes, optionally restricted to one category.
    pub fn available_codes(&self, category: Option<&CategoryId>) -> Result<Vec<&AccessCode>> {
        if let Some(id) = category {
            self.require_category(id)?;
        }
        Ok(self.registry.available(category).collect())
    }

    /// One page of unused codes.
    pub fn available_page(
        &self,
        category: Option<&CategoryId>,
        page: usize,
        per_page: usize,
    ) -> Result<Page<&AccessCode>> {
        let codes = self.available_codes(category)?;
        Ok(pagination::paginate(codes, page, per_page))
    }

    /// Used codes in the order they were marked.
    #[must_use]
    pub fn used_history(&self) -> Vec<&AccessCode> {
        self.registry.history().collect()
    }

    /// Available/used counts for every category, in catalog order.
    #[must_use]
    pub fn summary(&self) -> Vec<CategorySummary> {
        self.catalog
            .iter()
            .map(|c| self.registry.summary_for(&c.id))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
