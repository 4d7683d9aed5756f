use std::collections::BTreeMap;

use crate::error::RecordError;
use crate::layout::{Record, find_in};
use crate::types::*;

/// Typed, name-based read access to a record payload, wherever it lives.
pub trait RecordReadable {
    /// Field table of the underlying record type.
    fn fields(&self) -> &'static [FieldDesc];

    /// Copy `out.len()` payload bytes starting at `offset` into `out`.
    fn read_payload(&self, offset: usize, out: &mut [u8]);

    #[inline]
    fn read_value(&self, desc: &FieldDesc) -> Option<FieldValue> {
        let mut scratch = [0u8; MAX_FIELD_WIDTH];
        let data = scratch.get_mut(..desc.kind.width())?;
        self.read_payload(desc.offset, data);
        FieldValue::decode(desc.kind, data)
    }

    /// Find a field by name. Returns (index_position, descriptor).
    #[inline]
    fn find_field(&self, name: &str) -> Result<(usize, &'static FieldDesc), RecordError> {
        find_in(self.fields(), name)
    }

    /// Iterate over all fields in table order.
    #[inline]
    fn iter_fields(&self) -> FieldIter<'_, Self> {
        FieldIter {
            source: self,
            fields: self.fields(),
            pos: 0,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Read access
    // ════════════════════════════════════════════════════════════════════════

    /// Get any field as a FieldValue.
    fn get_field(&self, name: &str) -> Option<FieldValue> {
        let (_, desc) = self.find_field(name).ok()?;
        self.read_value(desc)
    }

    /// Get an i32 field.
    #[inline]
    fn get_i32(&self, name: &str) -> Option<i32> {
        match self.get_field(name)? {
            FieldValue::I32(v) => Some(v),
            _ => None,
        }
    }

    /// Get a u32 field.
    #[inline]
    fn get_u32(&self, name: &str) -> Option<u32> {
        match self.get_field(name)? {
            FieldValue::U32(v) => Some(v),
            _ => None,
        }
    }

    /// Get an i64 field.
    #[inline]
    fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get_field(name)? {
            FieldValue::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Get a u64 field.
    #[inline]
    fn get_u64(&self, name: &str) -> Option<u64> {
        match self.get_field(name)? {
            FieldValue::U64(v) => Some(v),
            _ => None,
        }
    }

    /// Get an f32 field.
    #[inline]
    fn get_f32(&self, name: &str) -> Option<f32> {
        match self.get_field(name)? {
            FieldValue::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Get an f64 field.
    #[inline]
    fn get_f64(&self, name: &str) -> Option<f64> {
        match self.get_field(name)? {
            FieldValue::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Check if a field exists.
    #[inline]
    fn has_field(&self, name: &str) -> bool {
        self.find_field(name).is_ok()
    }

    /// Get the type tag for a field.
    #[inline]
    fn field_type(&self, name: &str) -> Option<u8> {
        self.find_field(name).ok().map(|(_, d)| d.kind.tag())
    }

    /// Field name → value, for display.
    fn to_map(&self) -> BTreeMap<&'static str, FieldValue> {
        self.iter_fields().map(|(d, v)| (d.name, v)).collect()
    }

    // ════════════════════════════════════════════════════════════════════════
    // FieldSlot cached access
    // ════════════════════════════════════════════════════════════════════════

    /// Resolve a field by name once; reuse the slot with `get_field_at` /
    /// `set_field_at` on any storage of the same record type.
    fn resolve(&self, name: &str) -> Result<FieldSlot, RecordError> {
        let (index_pos, desc) = self.find_field(name)?;
        Ok(FieldSlot {
            index_pos,
            data_offset: desc.offset,
            kind: desc.kind,
        })
    }

    /// Read a field through a cached FieldSlot.
    #[inline]
    fn get_field_at(&self, slot: &FieldSlot) -> Option<FieldValue> {
        debug_assert!(
            self.fields()
                .get(slot.index_pos)
                .is_some_and(|d| d.offset == slot.data_offset && d.kind == slot.kind),
            "FieldSlot resolved against a different record type"
        );
        let mut scratch = [0u8; MAX_FIELD_WIDTH];
        let data = scratch.get_mut(..slot.kind.width())?;
        self.read_payload(slot.data_offset, data);
        FieldValue::decode(slot.kind, data)
    }
}

// ─── Owned records ──────────────────────────────────────────────────────────

impl<R: Record> RecordReadable for R {
    #[inline]
    fn fields(&self) -> &'static [FieldDesc] {
        R::FIELDS
    }

    #[inline]
    fn read_payload(&self, offset: usize, out: &mut [u8]) {
        let bytes = bytemuck::bytes_of(self.payload());
        out.copy_from_slice(&bytes[offset..offset + out.len()]);
    }
}
