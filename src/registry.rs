//! Insertion-ordered accumulation of per-rule failure masks.

use std::sync::Arc;

use arrow::compute::kernels::boolean::or;
use arrow::datatypes::Schema;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow_array::{Array, ArrayRef, BooleanArray};

use crate::errors::ValidationError;

/// Rule names as they appear in registries, mask frames and fragment tables.
pub mod names {
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const ISNULL: &str = "isnull";
    pub const NONUNIQUE: &str = "nonunique";
    pub const NONINTEGER: &str = "noninteger";
    pub const TOO_LOW: &str = "too_low";
    pub const TOO_HIGH: &str = "too_high";
    pub const TOO_EARLY: &str = "too_early";
    pub const TOO_LATE: &str = "too_late";
    pub const TOO_SHORT: &str = "too_short";
    pub const TOO_LONG: &str = "too_long";
    pub const WRONG_CASE: &str = "wrong_case";
    pub const NEWLINES: &str = "newlines";
    pub const TRAILING_SPACE: &str = "trailing_space";
    pub const WHITESPACE: &str = "whitespace";
    pub const REGEX_MISMATCH: &str = "regex_mismatch";
    pub const REGEX_MATCH: &str = "regex_match";
    pub const NOT_IN_WHITELIST: &str = "not_in_whitelist";
    pub const IN_BLACKLIST: &str = "in_blacklist";
}

/// Ordered mapping from rule name to its failure mask.
///
/// Insertion order is the canonical rule order of the validator that built
/// the registry, not the order the caller supplied options in. Message
/// composition and the mask-frame projection both iterate in this order.
pub struct MaskRegistry {
    row_count: usize,
    masks: Vec<(&'static str, BooleanArray)>,
}

impl MaskRegistry {
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            masks: Vec::new(),
        }
    }

    /// Register a rule's mask. Masks must be non-null and aligned to the
    /// column the registry was created for.
    pub fn register(&mut self, name: &'static str, mask: BooleanArray) {
        debug_assert_eq!(mask.len(), self.row_count);
        debug_assert_eq!(mask.null_count(), 0);
        self.masks.push((name, mask));
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn rule_count(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &BooleanArray)> {
        self.masks.iter().map(|(name, mask)| (*name, mask))
    }

    pub fn get(&self, name: &str) -> Option<&BooleanArray> {
        self.masks
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, mask)| mask)
    }

    /// True when at least one registered rule flagged at least one row.
    pub fn has_failures(&self) -> bool {
        self.masks.iter().any(|(_, mask)| mask.true_count() > 0)
    }

    /// Logical OR across all registered masks; an all-false mask of the
    /// column's length when the registry is empty.
    pub fn any_row_failed(&self) -> Result<BooleanArray, ValidationError> {
        let mut combined = BooleanArray::from(vec![false; self.row_count]);
        for (_, mask) in &self.masks {
            combined = or(&combined, mask)?;
        }
        Ok(combined)
    }

    /// One boolean column per registered rule, in insertion order.
    pub fn to_frame(&self) -> Result<RecordBatch, ValidationError> {
        if self.masks.is_empty() {
            let options = RecordBatchOptions::new().with_row_count(Some(self.row_count));
            let batch =
                RecordBatch::try_new_with_options(Arc::new(Schema::empty()), vec![], &options)?;
            return Ok(batch);
        }
        let columns = self
            .masks
            .iter()
            .map(|(name, mask)| (*name, Arc::new(mask.clone()) as ArrayRef));
        Ok(RecordBatch::try_from_iter(columns)?)
    }
}
