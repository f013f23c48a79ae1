//! Error type shared by the codec and every engine.
use thiserror::Error;

/// Result alias used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure kinds reported by the codec and the engines.
///
/// The boundary adapter collapses all of them into a single `false`; inside
/// the engine they stay distinct so tests and callers can tell them apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum EngineError {
    /// An operation was called before the process-wide context was initialized.
    #[error("engine is not initialized")]
    Uninitialized,
    /// A buffer does not have the width required by its element kind.
    #[error("invalid buffer length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Width required by the element kind.
        expected: usize,
        /// Width that was supplied.
        actual: usize,
    },
    /// A buffer with a non-zero length was passed as a null pointer.
    #[error("null pointer for a {len}-byte buffer")]
    NullPointer {
        /// Length that accompanied the pointer.
        len: usize,
    },
    /// A field element encodes an integer that is not below its modulus.
    #[error("field element is not below the modulus")]
    OutOfRange,
    /// A point encoding has an unknown flag byte or a non-canonical identity.
    #[error("invalid point encoding")]
    InvalidEncoding,
    /// Point coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,
    /// Point is on the curve but outside the prime-order subgroup.
    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,
    /// An internal invariant was violated.
    #[error("internal failure: {0}")]
    InternalFailure(&'static str),
}

impl EngineError {
    /// Returns an [`EngineError::InvalidLength`] for the given widths.
    pub fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    /// Returns `true` if the error was raised while decoding caller input.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. }
                | Self::OutOfRange
                | Self::InvalidEncoding
                | Self::NotOnCurve
                | Self::NotInSubgroup
        )
    }
}
