//! Content-shape rules over string arrays: length, case, whitespace and
//! regular expression constraints.

use std::str::FromStr;

use arrow_array::{BooleanArray, StringArray};
use regex::Regex;

use crate::errors::ValidationError;

/// Flags strings with fewer characters than the minimum.
pub struct MinLengthCheck {
    min: usize,
}

impl MinLengthCheck {
    pub fn new(min: usize) -> Self {
        Self { min }
    }

    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(s) if s.chars().count() < self.min)))
            .collect()
    }
}

/// Flags strings with more characters than the maximum.
pub struct MaxLengthCheck {
    max: usize,
}

impl MaxLengthCheck {
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(s) if s.chars().count() > self.max)))
            .collect()
    }
}

/// Character case constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Lower,
    Upper,
    Title,
}

impl CaseStyle {
    pub fn apply(&self, s: &str) -> String {
        match self {
            CaseStyle::Lower => s.to_lowercase(),
            CaseStyle::Upper => s.to_uppercase(),
            CaseStyle::Title => title_case(s),
        }
    }
}

impl FromStr for CaseStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(CaseStyle::Lower),
            "upper" => Ok(CaseStyle::Upper),
            "title" => Ok(CaseStyle::Title),
            other => Err(ValidationError::InvalidCaseStyle(other.to_string())),
        }
    }
}

/// Every alphabetic run starts uppercase, the rest is lowered.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(c);
            at_boundary = true;
        }
    }
    out
}

/// Flags strings that the case transform would change.
pub struct CaseCheck {
    style: CaseStyle,
}

impl CaseCheck {
    pub fn new(style: CaseStyle) -> Self {
        Self { style }
    }

    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(s) if self.style.apply(s) != s)))
            .collect()
    }
}

/// Flags strings containing a newline sequence.
pub struct NewlineCheck;

impl NewlineCheck {
    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(s) if s.contains('\n'))))
            .collect()
    }
}

/// Flags strings that start or end with whitespace.
pub struct TrailingWhitespaceCheck;

impl TrailingWhitespaceCheck {
    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| {
                Some(match value {
                    Some(s) => {
                        s.chars().next().is_some_and(char::is_whitespace)
                            || s.chars().next_back().is_some_and(char::is_whitespace)
                    }
                    None => false,
                })
            })
            .collect()
    }
}

/// Flags strings containing any whitespace character.
pub struct WhitespaceCheck;

impl WhitespaceCheck {
    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(s) if s.chars().any(char::is_whitespace))))
            .collect()
    }
}

/// Match-anywhere regular expression constraint. Text patterns only; the
/// pattern is compiled up front so a malformed one fails the call instead
/// of being silently skipped.
pub struct RegexCheck {
    pattern: Regex,
    flag_on_match: bool,
}

impl RegexCheck {
    /// Strings must match the pattern somewhere; non-matching strings are
    /// flagged.
    pub fn matching(pattern: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            pattern: compile(pattern)?,
            flag_on_match: false,
        })
    }

    /// Strings must not match the pattern; matching strings are flagged.
    pub fn non_matching(pattern: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            pattern: compile(pattern)?,
            flag_on_match: true,
        })
    }

    pub fn mask(&self, array: &StringArray) -> BooleanArray {
        array
            .iter()
            .map(|value| {
                Some(match value {
                    Some(s) => self.pattern.is_match(s) == self.flag_on_match,
                    None => false,
                })
            })
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(pattern).map_err(|source| ValidationError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}
