//! Logic errors for the value model and builders.
//!
//! These report contract violations by the caller (indexing a string,
//! coercing an array to an integer, configuring a builder with a bad
//! setting). They are distinct from the reader's data errors, which
//! describe problems in parsed input and live in [`crate::reader`].

use thiserror::Error;

use crate::value::ValueTag;

/// A programmer error: an operation invoked on a value whose variant does
/// not support it, or a coercion outside the convertibility matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    /// A coercion was requested that the convertibility matrix forbids,
    /// e.g. a real outside `i32` range to int, or an array to string.
    #[error("{actual} value is not convertible to {target}")]
    NotConvertible {
        /// Variant of the value the coercion was invoked on.
        actual: ValueTag,
        /// Variant the caller asked for.
        target: ValueTag,
    },

    /// A container operation was invoked on a non-matching variant,
    /// e.g. `resize` on an object or `member_names` on an array.
    #[error("{op} requires a {expected} value, got {actual}")]
    WrongType {
        /// Name of the operation.
        op: &'static str,
        /// Variant the operation requires.
        expected: ValueTag,
        /// Variant it was invoked on.
        actual: ValueTag,
    },

    /// A builder setting had an unusable value, e.g. `commentStyle`
    /// neither `"None"` nor `"All"`.
    #[error("invalid builder setting: {0}")]
    InvalidSetting(String),
}

/// Result type for value-model and builder operations.
pub type LogicResult<T> = Result<T, LogicError>;
