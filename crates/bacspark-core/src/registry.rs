//! # Code Registry
//!
//! Storage for the generated access codes.
//!
//! Codes are kept in generation order so listings are stable. Two
//! `BTreeMap` indexes give lookup by value and by id without ever
//! reordering the backing vector.

use crate::catalog::Category;
use crate::code::{self, AccessCode};
use crate::error::{Result, SparkError};
use crate::{CategoryId, CodeId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category availability counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: CategoryId,
    pub available: usize,
    pub used: usize,
}

/// The fixed set of access codes for one session.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
    /// All codes, in generation order.
    codes: Vec<AccessCode>,

    /// Value -> position in `codes`.
    by_value: BTreeMap<String, usize>,

    /// Id -> position in `codes`.
    by_id: BTreeMap<CodeId, usize>,

    /// Positions of used codes, in the order they were marked.
    history: Vec<usize>,
}

impl CodeRegistry {
    /// Generate the registry for a catalog.
    #[must_use]
    pub fn generate(catalog: &[Category]) -> Self {
        Self::from_codes(code::generate(catalog))
    }

    /// Build a registry from an explicit code list.
    ///
    /// Later duplicates of a value or id are shadowed by the first one.
    #[must_use]
    pub fn from_codes(codes: Vec<AccessCode>) -> Self {
        let mut by_value = BTreeMap::new();
        let mut by_id = BTreeMap::new();

        for (pos, code) in codes.iter().enumerate() {
            by_value.entry(code.value.clone()).or_insert(pos);
            by_id.entry(code.id.clone()).or_insert(pos);
        }

        Self {
            codes,
            by_value,
            by_id,
            history: Vec::new(),
        }
    }

    /// Total number of codes, used or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the registry holds no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Get a code by id.
    #[must_use]
    pub fn get(&self, id: &CodeId) -> Option<&AccessCode> {
        self.by_id.get(id).map(|&pos| &self.codes[pos])
    }

    /// Find an unused code by its already-normalized value.
    #[must_use]
    pub fn find_available(&self, value: &str) -> Option<&AccessCode> {
        self.by_value
            .get(value)
            .map(|&pos| &self.codes[pos])
            .filter(|code| code.is_available())
    }

    /// Mark a code used at the given time.
    ///
    /// A code is marked at most once; a second call is rejected and the
    /// first timestamp stays in place.
    pub fn mark_used(&mut self, id: &CodeId, at: Timestamp) -> Result<&AccessCode> {
        let pos = *self
            .by_id
            .get(id)
            .ok_or_else(|| SparkError::UnknownCode(id.clone()))?;

        let code = &mut self.codes[pos];
        if code.used {
            return Err(SparkError::AlreadyUsed(id.clone()));
        }

        code.used = true;
        code.used_at = Some(at);
        self.history.push(pos);

        Ok(&self.codes[pos])
    }

    /// Unused codes in generation order, optionally for one category.
    ///
    /// The iterator borrows only the registry, not the filter argument.
    pub fn available<'a>(
        &'a self,
        category: Option<&CategoryId>,
    ) -> impl Iterator<Item = &'a AccessCode> + use<'a> {
        let category = category.cloned();
        self.codes
            .iter()
            .filter(|code| code.is_available())
            .filter(move |code| category.as_ref().is_none_or(|c| code.category == *c))
    }

    /// Used codes in the order they were marked.
    pub fn history(&self) -> impl Iterator<Item = &AccessCode> {
        self.history.iter().map(|&pos| &self.codes[pos])
    }

    /// Available/used counts for one category.
    #[must_use]
    pub fn summary_for(&self, category: &CategoryId) -> CategorySummary {
        let (used, available) = self
            .codes
            .iter()
            .filter(|code| code.category == *category)
            .fold((0usize, 0usize), |(used, available), code| {
                if code.used {
                    (used + 1, available)
                } else {
                    (used, available + 1)
                }
            });

        CategorySummary {
            category: category.clone(),
            available,
            used,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CODES_PER_CATEGORY;
    use crate::catalog::builtin;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
    }

    fn registry() -> CodeRegistry {
        CodeRegistry::generate(&builtin())
    }

    #[test]
    fn generate_holds_every_code() {
        let reg = registry();
        assert!(!reg.is_empty());
        assert_eq!(reg.len(), builtin().len() * CODES_PER_CATEGORY);
        assert!(CodeRegistry::default().is_empty());
    }

    #[test]
    fn available_outlives_filter_argument() {
        let reg = registry();
        let codes: Vec<&AccessCode> = {
            let eco = CategoryId::new("economie");
            reg.available(Some(&eco)).collect()
        };
        assert_eq!(codes.len(), CODES_PER_CATEGORY);
        assert!(codes.iter().all(|c| c.category.as_str() == "economie"));
    }

    #[test]
    fn find_available_matches_exact_value() {
        let reg = registry();
        let found = reg.find_available("MATH00118FM").map(|c| c.id.clone());
        assert_eq!(found, Some(CodeId::new("math_1")));
        assert!(reg.find_available("math00118fm").is_none());
    }

    #[test]
    fn mark_used_stamps_and_records_history() {
        let mut reg = registry();
        let id = CodeId::new("math_1");

        let marked = reg.mark_used(&id, at(1_000)).map(|c| (c.used, c.used_at));
        assert_eq!(marked, Ok((true, Some(at(1_000)))));

        let history: Vec<_> = reg.history().map(|c| c.id.clone()).collect();
        assert_eq!(history, vec![id]);
    }

    #[test]
    fn used_code_is_not_available() {
        let mut reg = registry();
        let id = CodeId::new("math_1");
        let math = CategoryId::new("math");

        assert!(reg.mark_used(&id, at(0)).is_ok());

        assert!(reg.find_available("MATH00118FM").is_none());
        assert!(reg.available(None).all(|c| c.id != id));
        assert_eq!(reg.available(Some(&math)).count(), CODES_PER_CATEGORY - 1);
    }

    #[test]
    fn mark_used_twice_keeps_first_stamp() {
        let mut reg = registry();
        let id = CodeId::new("economie_3");

        assert!(reg.mark_used(&id, at(10)).is_ok());
        let second = reg.mark_used(&id, at(20)).map(|c| c.id.clone());

        assert_eq!(second, Err(SparkError::AlreadyUsed(id.clone())));
        assert_eq!(reg.get(&id).and_then(|c| c.used_at), Some(at(10)));
        assert_eq!(reg.history().count(), 1);
    }

    #[test]
    fn mark_unknown_code_fails() {
        let mut reg = registry();
        let id = CodeId::new("history_1");
        let result = reg.mark_used(&id, at(0)).map(|c| c.id.clone());
        assert_eq!(result, Err(SparkError::UnknownCode(id)));
    }

    #[test]
    fn available_preserves_generation_order() {
        let reg = registry();
        let math = CategoryId::new("math");
        let ids: Vec<_> = reg
            .available(Some(&math))
            .take(11)
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids[9], "math_10");
        assert_eq!(ids[10], "math_11");
    }

    #[test]
    fn history_is_in_marking_order() {
        let mut reg = registry();
        for id in ["lettres_5", "math_2", "info_9"] {
            let _ = reg.mark_used(&CodeId::new(id), at(0));
        }
        // info_9 does not exist: the category id is "informatique"
        let history: Vec<_> = reg.history().map(|c| c.id.to_string()).collect();
        assert_eq!(history, vec!["lettres_5", "math_2"]);
    }

    #[test]
    fn summary_counts_used_and_available() {
        let mut reg = registry();
        let tech = CategoryId::new("techniques");
        assert!(reg.mark_used(&CodeId::new("techniques_1"), at(0)).is_ok());
        assert!(reg.mark_used(&CodeId::new("techniques_2"), at(0)).is_ok());

        let summary = reg.summary_for(&tech);
        assert_eq!(summary.used, 2);
        assert_eq!(summary.available, CODES_PER_CATEGORY - 2);
    }
}
