//! # Access Codes
//!
//! The access code type and the one canonical generation rule.
//!
//! ## Generation Rule
//!
//! For every category (catalog order) and every `i` in `1..=100`:
//!
//! ```text
//! seed   = (byte(id[0]) + byte(id[1]) + i) mod 36
//! suffix = ALPHABET[(seed + 7j) mod 36]  for j in 0..4
//! value  = PREFIX + zero-padded(i, 3) + suffix
//! ```
//!
//! The zero-padded index makes values unique within a category and the
//! distinct prefixes make them unique across categories. Codes are
//! predictable by construction; nothing here is a secret.

use crate::catalog::Category;
use crate::{CODES_PER_CATEGORY, CategoryId, CodeId, MAX_CODE_INPUT_LEN, Timestamp};
use serde::{Deserialize, Serialize};

/// Characters used for the code suffix.
const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Stride between consecutive suffix characters.
const SUFFIX_STRIDE: usize = 7;

/// Number of characters in the suffix.
const SUFFIX_LEN: usize = 4;

// =============================================================================
// ACCESS CODE
// =============================================================================

/// A single-use token that unlocks one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCode {
    pub id: CodeId,
    /// The uppercase value a visitor types in.
    pub value: String,
    pub category: CategoryId,
    pub used: bool,
    /// Set exactly once, when the code is marked used.
    pub used_at: Option<Timestamp>,
}

impl AccessCode {
    /// Create a fresh, unused code.
    #[must_use]
    pub fn new(id: CodeId, value: impl Into<String>, category: CategoryId) -> Self {
        Self {
            id,
            value: value.into(),
            category,
            used: false,
            used_at: None,
        }
    }

    /// Check whether this code can still be redeemed.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.used
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Compute the value of the `index`-th code (1-based) of a category.
#[must_use]
pub fn code_value(category: &Category, index: usize) -> String {
    let id = category.id.as_str().as_bytes();
    let first = id.first().copied().unwrap_or(0) as usize;
    let second = id.get(1).copied().unwrap_or(0) as usize;
    let seed = (first + second + index) % ALPHABET.len();

    let suffix: String = (0..SUFFIX_LEN)
        .map(|j| char::from(ALPHABET[(seed + j * SUFFIX_STRIDE) % ALPHABET.len()]))
        .collect();

    format!("{}{:03}{}", category.code_prefix, index, suffix)
}

/// Generate the full code set for a catalog, in catalog order.
#[must_use]
pub fn generate(catalog: &[Category]) -> Vec<AccessCode> {
    catalog
        .iter()
        .flat_map(|category| {
            (1..=CODES_PER_CATEGORY).map(move |index| {
                AccessCode::new(
                    CodeId::for_index(&category.id, index),
                    code_value(category, index),
                    category.id.clone(),
                )
            })
        })
        .collect()
}

/// Normalize visitor input for lookup.
///
/// Trims surrounding whitespace and folds to uppercase. Returns `None` for
/// empty or oversized input, which can never match a code.
#[must_use]
pub fn normalize_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_CODE_INPUT_LEN {
        return None;
    }
    Some(trimmed.to_uppercase())
}

// =============================================================================
// TESTS
// =============================================================================
