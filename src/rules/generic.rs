//! Rules that apply to every column kind: nullability, uniqueness and set
//! membership.

use std::collections::HashSet;

use arrow::datatypes::ToByteSlice;
use arrow_array::{Array, ArrowPrimitiveType, BooleanArray, PrimitiveArray, StringArray};

use crate::utils::hasher::{Xxh3Builder, digest};

/// Flags missing values.
pub struct NullCheck;

impl NullCheck {
    pub fn mask(&self, array: &dyn Array) -> BooleanArray {
        (0..array.len()).map(|i| Some(array.is_null(i))).collect()
    }
}

/// Flags repeated values.
///
/// The first occurrence of a value is canonical and never flagged; every
/// later occurrence is. Missing values are ignored entirely. Values are
/// compared through their xxh3 digest, the same scheme the membership rule
/// uses.
pub struct UnicityCheck;

impl UnicityCheck {
    pub fn mask_string(&self, array: &StringArray) -> BooleanArray {
        let mut seen: HashSet<u64, Xxh3Builder> = HashSet::with_hasher(Xxh3Builder);
        array
            .iter()
            .map(|value| {
                Some(match value {
                    Some(s) => !seen.insert(digest(s.as_bytes())),
                    None => false,
                })
            })
            .collect()
    }

    pub fn mask_primitive<T: ArrowPrimitiveType>(&self, array: &PrimitiveArray<T>) -> BooleanArray
    where
        T::Native: ToByteSlice,
    {
        let mut seen: HashSet<u64, Xxh3Builder> = HashSet::with_hasher(Xxh3Builder);
        array
            .iter()
            .map(|value| {
                Some(match value {
                    Some(v) => !seen.insert(digest(v.to_byte_slice())),
                    None => false,
                })
            })
            .collect()
    }
}

enum MembershipMode {
    /// Flag values absent from the set
    Whitelist,
    /// Flag values present in the set
    Blacklist,
}

/// Set membership over string values, backed by xxh3 digests.
pub struct MembershipCheck {
    members: HashSet<u64, Xxh3Builder>,
    mode: MembershipMode,
}

impl MembershipCheck {
    pub fn whitelist<S: AsRef<str>>(members: &[S]) -> Self {
        Self::new(members, MembershipMode::Whitelist)
    }

    pub fn blacklist<S: AsRef<str>>(members: &[S]) -> Self {
        Self::new(members, MembershipMode::Blacklist)
    }

    fn new<S: AsRef<str>>(members: &[S], mode: MembershipMode) -> Self {
        let mut set = HashSet::with_hasher(Xxh3Builder);
        for member in members {
            let _ = set.insert(digest(member.as_ref().as_bytes()));
        }
        Self { members: set, mode }
    }

    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| {
                Some(match value {
                    Some(s) => {
                        let hit = self.members.contains(&digest(s.as_bytes()));
                        match self.mode {
                            MembershipMode::Whitelist => !hit,
                            MembershipMode::Blacklist => hit,
                        }
                    }
                    None => false,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use arrow_array::Int64Array;

    use super::*;

    fn bools(mask: &BooleanArray) -> Vec<bool> {
        mask.iter().map(|v| v.unwrap()).collect()
    }

    #[test]
    fn test_null_check() {
        let array = Int64Array::from(vec![Some(1), None, Some(3)]);
        let mask = NullCheck.mask(&array);
        assert_eq!(bools(&mask), vec![false, true, false]);
    }

    #[test]
    fn test_unicity_first_occurrence_unflagged() {
        let array = StringArray::from(vec![Some("a"), Some("b"), Some("a"), Some("a"), None]);
        let mask = UnicityCheck.mask_string(&array);
        assert_eq!(bools(&mask), vec![false, false, true, true, false]);
    }

    #[test]
    fn test_unicity_nulls_are_not_duplicates() {
        let array = StringArray::from(vec![None::<&str>, None, None]);
        let mask = UnicityCheck.mask_string(&array);
        assert_eq!(bools(&mask), vec![false, false, false]);
    }

    #[test]
    fn test_unicity_primitive_flags_count_minus_one() {
        let array = Int64Array::from(vec![Some(73), Some(42), Some(73), Some(73), None]);
        let mask = UnicityCheck.mask_primitive(&array);
        assert_eq!(bools(&mask), vec![false, false, true, true, false]);
        assert_eq!(mask.true_count(), 2); // count(73) - 1
    }

    #[test]
    fn test_whitelist_flags_absentees() {
        let check = MembershipCheck::whitelist(&["apple", "banana"]);
        let array = StringArray::from(vec![Some("apple"), Some("orange"), None, Some("")]);
        let mask = check.mask(&array);
        assert_eq!(bools(&mask), vec![false, true, false, true]);
    }

    #[test]
    fn test_blacklist_flags_members() {
        let check = MembershipCheck::blacklist(&["blacklist", "blocked"]);
        let array = StringArray::from(vec![Some("ok"), Some("blocked"), None]);
        let mask = check.mask(&array);
        assert_eq!(bools(&mask), vec![false, true, false]);
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let check = MembershipCheck::whitelist(&["apple"]);
        let array = StringArray::from(vec![Some("apple"), Some("Apple")]);
        let mask = check.mask(&array);
        assert_eq!(bools(&mask), vec![false, true]);
    }
}
