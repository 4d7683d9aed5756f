//! A small record used by the demo, the benches and the tests.

use std::mem::offset_of;
use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::{Pod, Zeroable};

use crate::layout::Record;
use crate::types::{FieldDesc, FieldKind};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SamplePayload {
    pub long_field: i64,
    pub int_field: i32,
    pub float_field: f32,
    pub index: i32,
    pub _reserved: u32,
}

/// Payload plus a per-instance identity that only normal construction assigns.
#[derive(Debug)]
pub struct SampleRecord {
    id: u64,
    payload: SamplePayload,
}

impl SampleRecord {
    pub fn new(int_field: i32, long_field: i64, float_field: f32) -> Self {
        let mut record = Self::default();
        record.payload.int_field = int_field;
        record.payload.long_field = long_field;
        record.payload.float_field = float_field;
        record
    }

    pub fn with_index(mut self, index: i32) -> Self {
        self.payload.index = index;
        self
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Default for SampleRecord {
    fn default() -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            payload: SamplePayload::default(),
        }
    }
}

impl Record for SampleRecord {
    type Payload = SamplePayload;

    const FIELDS: &'static [FieldDesc] = &[
        FieldDesc::new("longField", FieldKind::I64, offset_of!(SamplePayload, long_field)),
        FieldDesc::new("intField", FieldKind::I32, offset_of!(SamplePayload, int_field)),
        FieldDesc::new("floatField", FieldKind::F32, offset_of!(SamplePayload, float_field)),
        FieldDesc::new("index", FieldKind::I32, offset_of!(SamplePayload, index)),
    ];

    #[inline]
    fn payload(&self) -> &SamplePayload {
        &self.payload
    }

    #[inline]
    fn payload_mut(&mut self) -> &mut SamplePayload {
        &mut self.payload
    }

    #[inline]
    fn identity(&self) -> Option<u64> {
        Some(self.id)
    }
}
