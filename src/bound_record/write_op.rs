use super::read_op::RecordReadable;
use crate::error::RecordError;
use crate::layout::Record;
use crate::types::*;

/// In-place field writes. Payload layouts are fixed, so every write is a
/// same-width overwrite: no splicing, no allocation.
pub trait RecordWritable: RecordReadable {
    /// Copy `data` into the payload starting at `offset`.
    fn write_payload(&mut self, offset: usize, data: &[u8]);

    // ════════════════════════════════════════════════════════════════════════
    // Generic setter
    // ════════════════════════════════════════════════════════════════════════

    /// Set any field. The value's kind must match the field's kind exactly.
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), RecordError> {
        let (_, desc) = self.find_field(name)?;
        let actual = value.kind().tag();
        if desc.kind.tag() != actual {
            return Err(RecordError::TypeMismatch {
                expected: desc.kind.tag(),
                actual,
            });
        }
        self.write_payload(desc.offset, &value.encode());
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Typed setters
    // ════════════════════════════════════════════════════════════════════════

    /// Set an i32 field.
    #[inline]
    fn set_i32(&mut self, name: &str, value: i32) -> Result<(), RecordError> {
        self.set_field(name, FieldValue::I32(value))
    }

    /// Set a u32 field.
    #[inline]
    fn set_u32(&mut self, name: &str, value: u32) -> Result<(), RecordError> {
        self.set_field(name, FieldValue::U32(value))
    }

    /// Set an i64 field.
    #[inline]
    fn set_i64(&mut self, name: &str, value: i64) -> Result<(), RecordError> {
        self.set_field(name, FieldValue::I64(value))
    }

    /// Set a u64 field.
    #[inline]
    fn set_u64(&mut self, name: &str, value: u64) -> Result<(), RecordError> {
        self.set_field(name, FieldValue::U64(value))
    }

    /// Set an f32 field.
    #[inline]
    fn set_f32(&mut self, name: &str, value: f32) -> Result<(), RecordError> {
        self.set_field(name, FieldValue::F32(value))
    }

    /// Set an f64 field.
    #[inline]
    fn set_f64(&mut self, name: &str, value: f64) -> Result<(), RecordError> {
        self.set_field(name, FieldValue::F64(value))
    }

    // ════════════════════════════════════════════════════════════════════════
    // FieldSlot cached access
    // ════════════════════════════════════════════════════════════════════════

    /// Set a field using a cached FieldSlot.
    #[inline]
    fn set_field_at(&mut self, slot: &FieldSlot, value: FieldValue) -> Result<(), RecordError> {
        let actual = value.kind().tag();
        if slot.kind.tag() != actual {
            return Err(RecordError::TypeMismatch {
                expected: slot.kind.tag(),
                actual,
            });
        }
        self.write_payload(slot.data_offset, &value.encode());
        Ok(())
    }
}

// ─── Owned records ──────────────────────────────────────────────────────────

impl<R: Record> RecordWritable for R {
    #[inline]
    fn write_payload(&mut self, offset: usize, data: &[u8]) {
        let bytes = bytemuck::bytes_of_mut(self.payload_mut());
        bytes[offset..offset + data.len()].copy_from_slice(data);
    }
}
