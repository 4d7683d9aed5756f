// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Unsupported record type: {0}")]
    UnsupportedType(String),
    #[error("No record supplied")]
    NullRecord,
    #[error("Buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },
    #[error("Slot {index} out of range for {len} slots")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("Field not found")]
    FieldNotFound,
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: u8, actual: u8 },
    #[error("Allocation of {size} bytes (align {align}) failed")]
    AllocationFailed { size: usize, align: usize },
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

impl RecordError {
    /// Returns `BufferTooSmall` unless `actual >= required`.
    #[inline]
    pub fn check_len(required: usize, actual: usize) -> Result<(), RecordError> {
        if actual < required {
            return Err(RecordError::BufferTooSmall { required, actual });
        }
        Ok(())
    }
}
