//! Column validators.
//!
//! Each validator coerces its column to a typed view, runs the configured
//! rules in a fixed order, composes a single diagnostic through the sink
//! and optionally projects a result. Rule options are gathered in a checks
//! struct built with chained setters:
//!
//! ```
//! use seriesguard::{Column, NumericChecks, ReturnType, validate_numeric};
//! use seriesguard::message::CollectingSink;
//!
//! let column = Column::new("Prices", vec![13.0.into(), 42.5.into()]);
//! let mut checks = NumericChecks::default();
//! checks.not_nullable().is_integer().returning(ReturnType::MaskSeries);
//! let sink = CollectingSink::default();
//! let outcome = validate_numeric(&column, &checks, &sink).unwrap();
//! assert!(outcome.is_some());
//! ```

use std::sync::Arc;

use arrow::datatypes::{Date32Type, Float64Type, TimestampMicrosecondType};
use arrow_array::{Array, ArrayRef};
use chrono::{NaiveDate, NaiveDateTime};

use crate::coerce::{self, Coerced};
use crate::column::Column;
use crate::errors::ValidationError;
use crate::message::{
    self, DATE_FRAGMENTS, DiagnosticMessage, NUMERIC_FRAGMENTS, STRING_FRAGMENTS,
    TIMESTAMP_FRAGMENTS, WarningSink,
};
use crate::projection::{self, Projection, ReturnType};
use crate::registry::{MaskRegistry, names};
use crate::rules::{
    CaseCheck, CaseStyle, IntegerCheck, MaxCheck, MaxLengthCheck, MembershipCheck, MinCheck,
    MinLengthCheck, NewlineCheck, NullCheck, RegexCheck, TrailingWhitespaceCheck, UnicityCheck,
    WhitespaceCheck,
};

/// Outcome of a validation call: the requested projection (when a return
/// type was set) together with the composed diagnostic text, which is
/// empty when every rule passed.
pub type Validated = Option<(Projection, String)>;

/// Rule configuration for [`validate_numeric`].
///
/// Defaults allow missing values, leave every other rule off and return
/// no projection; setters are chainable on a mutable binding.
#[derive(Debug, Clone)]
pub struct NumericChecks {
    nullable: bool,
    unique: bool,
    integer: bool,
    min_value: Option<f64>,
    max_value: Option<f64>,
    return_type: Option<ReturnType>,
}

impl Default for NumericChecks {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            integer: false,
            min_value: None,
            max_value: None,
            return_type: None,
        }
    }
}

impl NumericChecks {
    pub fn not_nullable(&mut self) -> &mut Self {
        self.nullable = false;
        self
    }

    pub fn is_unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    pub fn is_integer(&mut self) -> &mut Self {
        self.integer = true;
        self
    }

    pub fn min_value(&mut self, min: f64) -> &mut Self {
        self.min_value = Some(min);
        self
    }

    pub fn max_value(&mut self, max: f64) -> &mut Self {
        self.max_value = Some(max);
        self
    }

    pub fn returning(&mut self, return_type: ReturnType) -> &mut Self {
        self.return_type = Some(return_type);
        self
    }
}

/// Rule configuration for [`validate_string`].
///
/// The `newlines`, `trailing_whitespace` and `whitespace` flags state what
/// the column is allowed to contain; the matching rule runs only once the
/// corresponding `no_*` setter turns the allowance off.
#[derive(Debug, Clone)]
pub struct StringChecks {
    nullable: bool,
    unique: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    case: Option<CaseStyle>,
    newlines: bool,
    trailing_whitespace: bool,
    whitespace: bool,
    matching_regex: Option<String>,
    non_matching_regex: Option<String>,
    whitelist: Option<Vec<String>>,
    blacklist: Option<Vec<String>>,
    return_type: Option<ReturnType>,
}

impl Default for StringChecks {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            min_length: None,
            max_length: None,
            case: None,
            newlines: true,
            trailing_whitespace: true,
            whitespace: true,
            matching_regex: None,
            non_matching_regex: None,
            whitelist: None,
            blacklist: None,
            return_type: None,
        }
    }
}

impl StringChecks {
    pub fn not_nullable(&mut self) -> &mut Self {
        self.nullable = false;
        self
    }

    pub fn is_unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    pub fn with_min_length(&mut self, min: usize) -> &mut Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(&mut self, max: usize) -> &mut Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_case(&mut self, case: CaseStyle) -> &mut Self {
        self.case = Some(case);
        self
    }

    pub fn no_newlines(&mut self) -> &mut Self {
        self.newlines = false;
        self
    }

    pub fn no_trailing_whitespace(&mut self) -> &mut Self {
        self.trailing_whitespace = false;
        self
    }

    pub fn no_whitespace(&mut self) -> &mut Self {
        self.whitespace = false;
        self
    }

    pub fn matching_regex(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.matching_regex = Some(pattern.into());
        self
    }

    pub fn non_matching_regex(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.non_matching_regex = Some(pattern.into());
        self
    }

    pub fn with_whitelist(&mut self, members: Vec<String>) -> &mut Self {
        self.whitelist = Some(members);
        self
    }

    pub fn with_blacklist(&mut self, members: Vec<String>) -> &mut Self {
        self.blacklist = Some(members);
        self
    }

    pub fn returning(&mut self, return_type: ReturnType) -> &mut Self {
        self.return_type = Some(return_type);
        self
    }
}

/// Rule configuration for [`validate_date`].
#[derive(Debug, Clone)]
pub struct DateChecks {
    nullable: bool,
    unique: bool,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    convert_format: Option<String>,
    return_type: Option<ReturnType>,
}

impl Default for DateChecks {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            min_date: None,
            max_date: None,
            convert_format: None,
            return_type: None,
        }
    }
}

impl DateChecks {
    pub fn not_nullable(&mut self) -> &mut Self {
        self.nullable = false;
        self
    }

    pub fn is_unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    pub fn min_date(&mut self, min: NaiveDate) -> &mut Self {
        self.min_date = Some(min);
        self
    }

    pub fn max_date(&mut self, max: NaiveDate) -> &mut Self {
        self.max_date = Some(max);
        self
    }

    /// Parse string values with this `chrono` format before validating.
    pub fn convert_strings(&mut self, format: impl Into<String>) -> &mut Self {
        self.convert_format = Some(format.into());
        self
    }

    pub fn returning(&mut self, return_type: ReturnType) -> &mut Self {
        self.return_type = Some(return_type);
        self
    }
}

/// Rule configuration for [`validate_timestamp`].
#[derive(Debug, Clone)]
pub struct TimestampChecks {
    nullable: bool,
    unique: bool,
    min_timestamp: Option<NaiveDateTime>,
    max_timestamp: Option<NaiveDateTime>,
    return_type: Option<ReturnType>,
}

impl Default for TimestampChecks {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            min_timestamp: None,
            max_timestamp: None,
            return_type: None,
        }
    }
}

impl TimestampChecks {
    pub fn not_nullable(&mut self) -> &mut Self {
        self.nullable = false;
        self
    }

    pub fn is_unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    pub fn min_timestamp(&mut self, min: NaiveDateTime) -> &mut Self {
        self.min_timestamp = Some(min);
        self
    }

    pub fn max_timestamp(&mut self, max: NaiveDateTime) -> &mut Self {
        self.max_timestamp = Some(max);
        self
    }

    pub fn returning(&mut self, return_type: ReturnType) -> &mut Self {
        self.return_type = Some(return_type);
        self
    }
}

fn finish(
    registry: &MaskRegistry,
    values: ArrayRef,
    return_type: Option<ReturnType>,
    message: DiagnosticMessage,
) -> Result<Validated, ValidationError> {
    match return_type {
        Some(rt) => Ok(Some((
            projection::project(registry, values, rt)?,
            message.text,
        ))),
        None => Ok(None),
    }
}

/// Validate a column as numeric.
///
/// The column must classify as a numeric storage type; otherwise a
/// Datatype diagnostic is emitted and only the coercion mask is recorded.
pub fn validate_numeric(
    column: &Column,
    checks: &NumericChecks,
    sink: &dyn WarningSink,
) -> Result<Validated, ValidationError> {
    let Coerced {
        values,
        invalid_type,
    } = coerce::numeric_values(column);
    let mut registry = MaskRegistry::new(column.len());
    registry.register(names::INVALID_TYPE, invalid_type);

    let storage = column.storage_class();
    if !storage.is_numeric() {
        let msg = message::compose_datatype(column.name(), "numeric", storage, sink);
        return finish(&registry, Arc::new(values), checks.return_type, msg);
    }

    if !checks.nullable {
        registry.register(names::ISNULL, NullCheck.mask(&values));
    }
    if checks.unique {
        registry.register(names::NONUNIQUE, UnicityCheck.mask_primitive(&values));
    }
    if checks.integer {
        registry.register(names::NONINTEGER, IntegerCheck.mask(&values));
    }
    if let Some(min) = checks.min_value {
        registry.register(names::TOO_LOW, MinCheck::<Float64Type>::new(min).mask(&values));
    }
    if let Some(max) = checks.max_value {
        registry.register(names::TOO_HIGH, MaxCheck::<Float64Type>::new(max).mask(&values));
    }

    let msg = message::compose_range(column.name(), &registry, &NUMERIC_FRAGMENTS, sink);
    finish(&registry, Arc::new(values), checks.return_type, msg)
}

/// Validate a column as strings.
///
/// The column must classify as object storage; otherwise a Datatype
/// diagnostic is emitted and only the coercion mask is recorded. The
/// content-shape rules (case, whitespace, regex) only run when the column
/// holds at least one actual string.
pub fn validate_string(
    column: &Column,
    checks: &StringChecks,
    sink: &dyn WarningSink,
) -> Result<Validated, ValidationError> {
    let Coerced {
        values,
        invalid_type,
    } = coerce::string_values(column);
    let mut registry = MaskRegistry::new(column.len());
    registry.register(names::INVALID_TYPE, invalid_type);

    let storage = column.storage_class();
    if storage != crate::column::StorageClass::Object {
        let msg = message::compose_datatype(column.name(), "object", storage, sink);
        return finish(&registry, Arc::new(values), checks.return_type, msg);
    }

    if !checks.nullable {
        registry.register(names::ISNULL, NullCheck.mask(&values));
    }
    if checks.unique {
        registry.register(names::NONUNIQUE, UnicityCheck.mask_string(&values));
    }
    if let Some(min) = checks.min_length {
        registry.register(names::TOO_SHORT, MinLengthCheck::new(min).mask(&values));
    }
    if let Some(max) = checks.max_length {
        registry.register(names::TOO_LONG, MaxLengthCheck::new(max).mask(&values));
    }
    if let Some(whitelist) = checks.whitelist.as_deref().filter(|w| !w.is_empty()) {
        registry.register(
            names::NOT_IN_WHITELIST,
            MembershipCheck::whitelist(whitelist).mask(&values),
        );
    }
    if let Some(blacklist) = checks.blacklist.as_deref().filter(|b| !b.is_empty()) {
        registry.register(
            names::IN_BLACKLIST,
            MembershipCheck::blacklist(blacklist).mask(&values),
        );
    }

    let has_text = values.len() > values.null_count();
    if has_text {
        if let Some(case) = checks.case {
            registry.register(names::WRONG_CASE, CaseCheck::new(case).mask(&values));
        }
        if !checks.newlines {
            registry.register(names::NEWLINES, NewlineCheck.mask(&values));
        }
        if !checks.trailing_whitespace {
            registry.register(
                names::TRAILING_SPACE,
                TrailingWhitespaceCheck.mask(&values),
            );
        }
        if !checks.whitespace {
            registry.register(names::WHITESPACE, WhitespaceCheck.mask(&values));
        }
        if let Some(pattern) = checks.matching_regex.as_deref() {
            registry.register(
                names::REGEX_MISMATCH,
                RegexCheck::matching(pattern)?.mask(&values),
            );
        }
        if let Some(pattern) = checks.non_matching_regex.as_deref() {
            registry.register(
                names::REGEX_MATCH,
                RegexCheck::non_matching(pattern)?.mask(&values),
            );
        }
    }

    let msg = message::compose_range(column.name(), &registry, &STRING_FRAGMENTS, sink);
    finish(&registry, Arc::new(values), checks.return_type, msg)
}

/// Validate a column as calendar dates.
pub fn validate_date(
    column: &Column,
    checks: &DateChecks,
    sink: &dyn WarningSink,
) -> Result<Validated, ValidationError> {
    let Coerced {
        values,
        invalid_type,
    } = coerce::date_values(column, checks.convert_format.as_deref());
    let mut registry = MaskRegistry::new(column.len());
    registry.register(names::INVALID_TYPE, invalid_type);

    if !checks.nullable {
        registry.register(names::ISNULL, NullCheck.mask(&values));
    }
    if checks.unique {
        registry.register(names::NONUNIQUE, UnicityCheck.mask_primitive(&values));
    }
    if let Some(min) = checks.min_date {
        registry.register(
            names::TOO_EARLY,
            MinCheck::<Date32Type>::new(coerce::date_to_days(min)).mask(&values),
        );
    }
    if let Some(max) = checks.max_date {
        registry.register(
            names::TOO_LATE,
            MaxCheck::<Date32Type>::new(coerce::date_to_days(max)).mask(&values),
        );
    }

    let msg = message::compose_range(column.name(), &registry, &DATE_FRAGMENTS, sink);
    finish(&registry, Arc::new(values), checks.return_type, msg)
}

/// Validate a column as timestamps with microsecond precision.
pub fn validate_timestamp(
    column: &Column,
    checks: &TimestampChecks,
    sink: &dyn WarningSink,
) -> Result<Validated, ValidationError> {
    let Coerced {
        values,
        invalid_type,
    } = coerce::timestamp_values(column);
    let mut registry = MaskRegistry::new(column.len());
    registry.register(names::INVALID_TYPE, invalid_type);

    if !checks.nullable {
        registry.register(names::ISNULL, NullCheck.mask(&values));
    }
    if checks.unique {
        registry.register(names::NONUNIQUE, UnicityCheck.mask_primitive(&values));
    }
    if let Some(min) = checks.min_timestamp {
        registry.register(
            names::TOO_EARLY,
            MinCheck::<TimestampMicrosecondType>::new(coerce::timestamp_to_micros(min))
                .mask(&values),
        );
    }
    if let Some(max) = checks.max_timestamp {
        registry.register(
            names::TOO_LATE,
            MaxCheck::<TimestampMicrosecondType>::new(coerce::timestamp_to_micros(max))
                .mask(&values),
        );
    }

    let msg = message::compose_range(column.name(), &registry, &TIMESTAMP_FRAGMENTS, sink);
    finish(&registry, Arc::new(values), checks.return_type, msg)
}
