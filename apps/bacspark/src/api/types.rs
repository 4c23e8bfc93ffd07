//! Request and response bodies for the HTTP API.

use bacspark_core::registry::CategorySummary;
use bacspark_core::{AccessCode, CategoryId, CodeId, Page, Redemption, Timestamp};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Current activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationResponse {
    pub active: Option<CategoryId>,
}

/// Redemption request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub code: String,
}

/// Successful redemption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub success: bool,
    pub category: CategoryId,
    pub display_name: String,
    /// Links the client should open.
    pub documents: Vec<String>,
}

impl From<Redemption> for RedeemResponse {
    fn from(r: Redemption) -> Self {
        Self {
            success: true,
            category: r.category,
            display_name: r.display_name,
            documents: r.documents,
        }
    }
}

/// An access code as shown to admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeResponse {
    pub id: CodeId,
    pub code: String,
    pub category: CategoryId,
    pub used: bool,
    pub used_at: Option<Timestamp>,
}

impl From<&AccessCode> for CodeResponse {
    fn from(c: &AccessCode) -> Self {
        Self {
            id: c.id.clone(),
            code: c.value.clone(),
            category: c.category.clone(),
            used: c.used,
            used_at: c.used_at,
        }
    }
}

/// Query string for `GET /admin/codes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodesQuery {
    pub category: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// One page of available codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodePageResponse {
    pub codes: Vec<CodeResponse>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// Page numbers for a pager around the current page.
    pub pages: Vec<usize>,
}

impl From<Page<CodeResponse>> for CodePageResponse {
    fn from(page: Page<CodeResponse>) -> Self {
        let pages = page.window(bacspark_core::pagination::DEFAULT_WINDOW);
        Self {
            pages,
            page: page.page,
            per_page: page.per_page,
            total_items: page.total_items,
            total_pages: page.total_pages,
            codes: page.items,
        }
    }
}

/// Per-category counts for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub category: CategoryId,
    pub display_name: String,
    pub available: usize,
    pub used: usize,
}

impl SummaryEntry {
    pub fn new(summary: CategorySummary, display_name: impl Into<String>) -> Self {
        Self {
            category: summary.category,
            display_name: display_name.into(),
            available: summary.available,
            used: summary.used,
        }
    }
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
