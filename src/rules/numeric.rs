//! Bound and integrality rules over primitive arrays.
//!
//! The bound checks are generic over the Arrow primitive type so the same
//! evaluators serve numeric values (`Float64`), dates (`Date32`, days since
//! epoch) and timestamps (microseconds since epoch).

use arrow_array::{ArrowPrimitiveType, BooleanArray, Float64Array, PrimitiveArray};
use num_traits::Num;

/// Flags values strictly below the bound. Values equal to the bound pass.
pub struct MinCheck<T: ArrowPrimitiveType> {
    min: T::Native,
}

impl<T> MinCheck<T>
where
    T: ArrowPrimitiveType,
    T::Native: Num + PartialOrd + Copy,
{
    pub fn new(min: T::Native) -> Self {
        Self { min }
    }

    pub fn mask(&self, array: &PrimitiveArray<T>) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(v) if v < self.min)))
            .collect()
    }
}

/// Flags values strictly above the bound. Values equal to the bound pass.
pub struct MaxCheck<T: ArrowPrimitiveType> {
    max: T::Native,
}

impl<T> MaxCheck<T>
where
    T: ArrowPrimitiveType,
    T::Native: Num + PartialOrd + Copy,
{
    pub fn new(max: T::Native) -> Self {
        Self { max }
    }

    pub fn mask(&self, array: &PrimitiveArray<T>) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(v) if v > self.max)))
            .collect()
    }
}

/// Flags values whose integer truncation differs from the value itself.
pub struct IntegerCheck;

impl IntegerCheck {
    pub fn mask(&self, array: &Float64Array) -> BooleanArray {
        array
            .iter()
            .map(|value| Some(matches!(value, Some(v) if v.trunc() != v)))
            .collect()
    }
}
