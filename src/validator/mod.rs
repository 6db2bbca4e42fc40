mod validation;

pub use validation::{
    DateChecks, NumericChecks, StringChecks, TimestampChecks, Validated, validate_date,
    validate_numeric, validate_string, validate_timestamp,
};
