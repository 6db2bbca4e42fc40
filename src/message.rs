//! Diagnostic message composition and the external warning sink.
//!
//! Each validation call produces at most one message: either a Range
//! message listing every failed rule's fragment in canonical order, or a
//! Datatype message when the column's storage classification does not match
//! what the validator expects. The core never writes to a terminal itself;
//! the composed text goes through a caller-supplied [`WarningSink`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::column::StorageClass;
use crate::registry::{MaskRegistry, names};

/// Destination for composed diagnostics. Injected into every validator
/// call; the crate ships [`ConsoleSink`] and [`CollectingSink`] but callers
/// can bring their own.
pub trait WarningSink {
    fn print_warning(&self, text: &str);
}

/// Writes each diagnostic to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl WarningSink for ConsoleSink {
    fn print_warning(&self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Buffers diagnostics for later inspection; useful in tests and for
/// callers that aggregate warnings themselves.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink poisoned").clone()
    }
}

impl WarningSink for CollectingSink {
    fn print_warning(&self, text: &str) {
        self.messages.lock().expect("sink poisoned").push(text.to_string());
    }
}

/// Severity category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// One or more constraint rules flagged rows
    Range,
    /// The column's storage classification is structurally wrong
    Datatype,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Range => write!(f, "RangeWarning"),
            Category::Datatype => write!(f, "DatatypeWarning"),
        }
    }
}

/// A composed diagnostic. `text` is empty when nothing failed, in which
/// case nothing was sent to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub category: Category,
    pub column_name: String,
    pub text: String,
}

impl DiagnosticMessage {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub type FragmentTable = HashMap<&'static str, &'static str>;

/// Fragments for `validate_numeric`, keyed by rule name.
pub static NUMERIC_FRAGMENTS: Lazy<FragmentTable> = Lazy::new(|| {
    HashMap::from([
        (names::INVALID_TYPE, "Non-numeric value(s) set as NaN"),
        (names::ISNULL, "NaN value(s)"),
        (names::NONUNIQUE, "duplicates"),
        (names::NONINTEGER, "non-integer(s)"),
        (names::TOO_LOW, "value(s) too low"),
        (names::TOO_HIGH, "value(s) too high"),
    ])
});

/// Fragments for `validate_string`.
pub static STRING_FRAGMENTS: Lazy<FragmentTable> = Lazy::new(|| {
    HashMap::from([
        (names::INVALID_TYPE, "Non-string value(s) set as NaN"),
        (names::ISNULL, "NaN value(s)"),
        (names::NONUNIQUE, "duplicates"),
        (names::TOO_SHORT, "string(s) too short"),
        (names::TOO_LONG, "string(s) too long"),
        (names::WRONG_CASE, "wrong case letter(s)"),
        (names::NEWLINES, "newline character(s)"),
        (names::TRAILING_SPACE, "trailing whitespace"),
        (names::WHITESPACE, "whitespace"),
        (
            names::REGEX_MISMATCH,
            "mismatch(es) for \"matching regular expression\"",
        ),
        (
            names::REGEX_MATCH,
            "match(es) for \"non-matching regular expression\"",
        ),
        (names::NOT_IN_WHITELIST, "string(s) not in whitelist"),
        (names::IN_BLACKLIST, "string(s) in blacklist"),
    ])
});

/// Fragments for `validate_date`.
pub static DATE_FRAGMENTS: Lazy<FragmentTable> = Lazy::new(|| {
    HashMap::from([
        (names::INVALID_TYPE, "Value(s) not of type date set as NaT"),
        (names::ISNULL, "NaT value(s)"),
        (names::NONUNIQUE, "duplicates"),
        (names::TOO_EARLY, "date(s) too early"),
        (names::TOO_LATE, "date(s) too late"),
    ])
});

/// Fragments for `validate_timestamp`.
pub static TIMESTAMP_FRAGMENTS: Lazy<FragmentTable> = Lazy::new(|| {
    HashMap::from([
        (
            names::INVALID_TYPE,
            "Value(s) not of type timestamp set as NaT",
        ),
        (names::ISNULL, "NaT value(s)"),
        (names::NONUNIQUE, "duplicates"),
        (names::TOO_EARLY, "timestamp(s) too early"),
        (names::TOO_LATE, "timestamp(s) too late"),
    ])
});

/// Compose the Range message for a registry: one fragment per rule with at
/// least one flagged row, joined with "; " in registry order. Sends the
/// text to the sink exactly once; a clean registry produces an empty
/// message and no sink call.
pub fn compose_range(
    column_name: &str,
    registry: &MaskRegistry,
    fragments: &FragmentTable,
    sink: &dyn WarningSink,
) -> DiagnosticMessage {
    let failed: Vec<&str> = registry
        .iter()
        .filter(|(_, mask)| mask.true_count() > 0)
        .map(|(name, _)| fragments.get(name).copied().unwrap_or(name))
        .collect();
    let text = if failed.is_empty() {
        String::new()
    } else {
        format!(
            "[{}]: '{}': {}.",
            Category::Range,
            column_name,
            failed.join("; ")
        )
    };
    if !text.is_empty() {
        sink.print_warning(&text);
    }
    DiagnosticMessage {
        category: Category::Range,
        column_name: column_name.to_string(),
        text,
    }
}

/// Compose the Datatype message for a failed storage gate and send it to
/// the sink.
pub fn compose_datatype(
    column_name: &str,
    expected: &str,
    received: StorageClass,
    sink: &dyn WarningSink,
) -> DiagnosticMessage {
    let text = format!(
        "[{}]: '{}': Expected {}, received {}. Please address and re-validate.",
        Category::Datatype,
        column_name,
        expected,
        received
    );
    sink.print_warning(&text);
    DiagnosticMessage {
        category: Category::Datatype,
        column_name: column_name.to_string(),
        text,
    }
}
