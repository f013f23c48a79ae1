//! Conversion of caller `(pointer, length)` pairs into slices.
use engine::{EngineError, EngineResult};
use std::{ptr, slice};

/// Borrows an input buffer.
///
/// A zero length yields an empty slice whatever the pointer. A null pointer
/// with a non-zero length is rejected.
///
/// # Safety
///
/// When `ptr` is non-null it must be valid for reads of `len` bytes for `'a`.
pub(crate) unsafe fn input<'a>(ptr: *const u8, len: usize) -> EngineResult<&'a [u8]> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(EngineError::NullPointer { len });
    }
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Destination buffer of one call.
///
/// The buffer is checked up front but only written by [`Output::write`], after
/// every input has been read, so it may overlap an input buffer.
#[derive(Debug)]
pub(crate) struct Output {
    ptr: *mut u8,
    len: usize,
}

impl Output {
    /// Accepts a destination that is exactly `expected` bytes long.
    pub(crate) fn new(ptr: *mut u8, len: usize, expected: usize) -> EngineResult<Self> {
        if len != expected {
            return Err(EngineError::invalid_length(expected, len));
        }
        if ptr.is_null() {
            return Err(EngineError::NullPointer { len });
        }
        Ok(Self { ptr, len })
    }

    /// Copies `bytes` into the destination.
    ///
    /// # Safety
    ///
    /// The pointer given to [`Output::new`] must be valid for writes of its
    /// length, and no live reference may point into it.
    pub(crate) unsafe fn write(self, bytes: &[u8]) -> EngineResult<()> {
        if bytes.len() != self.len {
            return Err(EngineError::InternalFailure("result width mismatch"));
        }
        unsafe { ptr::copy_nonoverlapping(bytes.as_ptr(), self.ptr, self.len) };
        Ok(())
    }
}
