//! # CLI Commands
//!
//! Each command runs against a fresh [`Session`], the same state a new
//! visitor would see. Nothing is written back: the only command with a
//! side effect is `export`, which writes a file of codes.

use crate::error::AppError;
use bacspark_core::{AccessCode, CategoryId, Session, SparkError};
use clap::ValueEnum;
use serde::Serialize;
use std::fs;
use std::path::Path;

// =============================================================================
// EXPORT FORMAT
// =============================================================================

/// Output format for `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// JSON array of code objects
    #[default]
    Json,
    /// One code value per line
    #[value(alias = "txt")]
    Text,
}

#[derive(Serialize)]
struct CodeRow<'a> {
    id: &'a str,
    code: &'a str,
    category: &'a str,
}

impl<'a> From<&'a AccessCode> for CodeRow<'a> {
    fn from(code: &'a AccessCode) -> Self {
        Self {
            id: code.id.as_str(),
            code: &code.value,
            category: code.category.as_str(),
        }
    }
}

fn category_arg(category: Option<&str>) -> Option<CategoryId> {
    category.filter(|c| !c.is_empty()).map(CategoryId::new)
}

// =============================================================================
// COMMANDS
// =============================================================================

/// List the catalog.
pub fn cmd_categories(json: bool) -> Result<(), AppError> {
    let session = Session::new();
    let categories = session.categories();

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!("{:<14} {:<28} STATUS", "ID", "NAME");
    for category in &categories {
        let status = if category.status.is_active() {
            "active"
        } else {
            "locked"
        };
        println!(
            "{:<14} {:<28} {}",
            category.id.as_str(),
            category.display_name,
            status
        );
    }
    Ok(())
}

/// List one page of available codes.
pub fn cmd_codes(
    category: Option<&str>,
    page: usize,
    per_page: usize,
    json: bool,
) -> Result<(), AppError> {
    let session = Session::new();
    let category = category_arg(category);
    let page = session.available_page(category.as_ref(), page, per_page)?;

    if json {
        let page = page.map(CodeRow::from);
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    for code in &page.items {
        println!("{:<18} {:<12} {}", code.id.as_str(), code.value, code.category.as_str());
    }

    let last = (page.first_item() + page.items.len()).saturating_sub(1);
    println!(
        "Page {} of {} ({}-{} of {})",
        page.page,
        page.total_pages,
        page.first_item(),
        last,
        page.total_items
    );
    Ok(())
}

/// Redeem a code and print the unlocked category.
pub fn cmd_redeem(code: &str, json: bool) -> Result<(), AppError> {
    let mut session = Session::new();
    let redemption = session.redeem(code)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&redemption)?);
        return Ok(());
    }

    println!("Unlocked: {} ({})", redemption.display_name, redemption.category);
    for document in &redemption.documents {
        println!("  {document}");
    }
    Ok(())
}

/// Write available codes to `output`.
pub fn cmd_export(
    output: &Path,
    category: Option<&str>,
    format: ExportFormat,
) -> Result<(), AppError> {
    let session = Session::new();
    let category = category_arg(category);
    let codes = session.available_codes(category.as_ref())?;

    let content = match format {
        ExportFormat::Json => {
            let rows: Vec<CodeRow<'_>> = codes.iter().map(|c| CodeRow::from(*c)).collect();
            serde_json::to_string_pretty(&rows)?
        }
        ExportFormat::Text => {
            let mut text = codes
                .iter()
                .map(|c| c.value.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            text.push('\n');
            text
        }
    };

    fs::write(output, content)?;
    println!("Exported {} codes to {}", codes.len(), output.display());
    Ok(())
}

/// Check whether an error is the visitor-facing rejection.
pub fn is_rejection(err: &AppError) -> bool {
    matches!(err, AppError::Core(SparkError::CodeRejected))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_from_flag_value() {
        assert_eq!(ExportFormat::from_str("JSON", true).ok(), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_str("txt", false).ok(), Some(ExportFormat::Text));
        assert!(ExportFormat::from_str("csv", true).is_err());
        assert_eq!(ExportFormat::default(), ExportFormat::Json);
    }

    #[test]
    fn empty_category_arg_means_all() {
        assert_eq!(category_arg(Some("")), None);
        assert_eq!(category_arg(Some("math")), Some(CategoryId::new("math")));
    }
}
