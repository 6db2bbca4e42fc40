//! Caller-selectable result views over a mask registry.

use std::str::FromStr;

use arrow::compute::kernels::nullif::nullif;
use arrow::record_batch::RecordBatch;
use arrow_array::{ArrayRef, BooleanArray};

use crate::errors::ValidationError;
use crate::registry::MaskRegistry;

/// Requested output shape of a validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// Combined OR of all rule masks
    MaskSeries,
    /// One boolean column per rule, in canonical rule order
    MaskFrame,
    /// Coerced column with every flagged row replaced by the missing marker
    Values,
}

impl FromStr for ReturnType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mask_series" => Ok(ReturnType::MaskSeries),
            "mask_frame" => Ok(ReturnType::MaskFrame),
            "values" => Ok(ReturnType::Values),
            other => Err(ValidationError::InvalidReturnType(other.to_string())),
        }
    }
}

/// The projected result of a validation call.
#[derive(Debug, Clone)]
pub enum Projection {
    MaskSeries(BooleanArray),
    MaskFrame(RecordBatch),
    Values(ArrayRef),
}

impl Projection {
    pub fn as_mask_series(&self) -> Option<&BooleanArray> {
        match self {
            Projection::MaskSeries(mask) => Some(mask),
            _ => None,
        }
    }

    pub fn as_mask_frame(&self) -> Option<&RecordBatch> {
        match self {
            Projection::MaskFrame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn as_values(&self) -> Option<&ArrayRef> {
        match self {
            Projection::Values(values) => Some(values),
            _ => None,
        }
    }
}

/// Build the requested view from a registry and the coerced column.
///
/// For `Values`, rows flagged by any rule are nulled out; rows that were
/// already null (missing or non-coercible) stay null either way.
pub fn project(
    registry: &MaskRegistry,
    values: ArrayRef,
    return_type: ReturnType,
) -> Result<Projection, ValidationError> {
    match return_type {
        ReturnType::MaskSeries => Ok(Projection::MaskSeries(registry.any_row_failed()?)),
        ReturnType::MaskFrame => Ok(Projection::MaskFrame(registry.to_frame()?)),
        ReturnType::Values => {
            let combined = registry.any_row_failed()?;
            let kept = if combined.true_count() == 0 {
                values
            } else {
                nullif(values.as_ref(), &combined)?
            };
            Ok(Projection::Values(kept))
        }
    }
}
