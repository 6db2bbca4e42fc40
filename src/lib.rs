//! Declarative quality validation for columnar series.
//!
//! A [`Column`] holds heterogeneous values as read from the outside world.
//! The validators in [`validator`] coerce a column to one typed view
//! (numeric, string, date or timestamp), evaluate the configured rules
//! into per-rule boolean masks, report every failure in a single
//! diagnostic through a [`message::WarningSink`] and hand back the result
//! shaped as a combined mask, a mask frame or the cleaned values.
//!
//! ```
//! use seriesguard::message::ConsoleSink;
//! use seriesguard::{Column, NumericChecks, ReturnType, validate_numeric};
//!
//! let prices = Column::new("Prices", vec![13.into(), 42.into(), 42.into()]);
//! let mut checks = NumericChecks::default();
//! checks.is_unique().min_value(0.0).returning(ReturnType::MaskSeries);
//! let outcome = validate_numeric(&prices, &checks, &ConsoleSink)?;
//! let (projection, text) = outcome.unwrap();
//! assert_eq!(text, "[RangeWarning]: 'Prices': duplicates.");
//! assert_eq!(projection.as_mask_series().unwrap().true_count(), 1);
//! # Ok::<(), seriesguard::ValidationError>(())
//! ```

pub mod coerce;
pub mod column;
pub mod errors;
pub mod message;
pub mod projection;
pub mod registry;
pub mod rules;
pub mod utils;
pub mod validator;

pub use coerce::{Coerced, FloatFormat, TargetKind};
pub use column::{Column, StorageClass, Value};
pub use errors::ValidationError;
pub use projection::{Projection, ReturnType};
pub use registry::MaskRegistry;
pub use rules::CaseStyle;
pub use validator::{
    DateChecks, NumericChecks, StringChecks, TimestampChecks, Validated, validate_date,
    validate_numeric, validate_string, validate_timestamp,
};
