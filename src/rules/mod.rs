//! Constraint rule evaluators.
//!
//! Each evaluator is a pure mask producer: it takes a coerced Arrow array
//! and returns a non-null `BooleanArray` of the same length, true where the
//! rule is violated. Null (missing) positions are always false; a missing
//! value cannot violate a content constraint on its own.

pub mod generic;
pub mod numeric;
pub mod string;

pub use generic::{MembershipCheck, NullCheck, UnicityCheck};
pub use numeric::{IntegerCheck, MaxCheck, MinCheck};
pub use string::{
    CaseCheck, CaseStyle, MaxLengthCheck, MinLengthCheck, NewlineCheck, RegexCheck,
    TrailingWhitespaceCheck, WhitespaceCheck,
};
