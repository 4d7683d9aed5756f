//! Back-to-back storage of many records in one region.
//!
//! ```text
//!  ┌──────────────┬──────────────┬─────┬──────────────┐
//!  │ slot 0       │ slot 1       │ ... │ slot N-1     │
//!  │ [0, size)    │ [size, 2size)│     │              │
//!  └──────────────┴──────────────┴─────┴──────────────┘
//! ```
//!
//! The buffer itself holds no slot count or size; [`PackedBuffer`] keeps both
//! on the side and checks every slot index against them.

use std::marker::PhantomData;

use crate::bound_record::RecordView;
use crate::deserialization::materialize;
use crate::error::RecordError;
use crate::layout::{Record, size_of};
use crate::region::{Region, StorageClass};
use crate::serialization::write_into;

pub struct PackedBuffer<'a, R: Record> {
    region: Region<'a>,
    slots: usize,
    slot_size: usize,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> std::fmt::Debug for PackedBuffer<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedBuffer")
            .field("record", &std::any::type_name::<R>())
            .field("slots", &self.slots)
            .field("slot_size", &self.slot_size)
            .field("storage", &self.region.storage_class())
            .finish()
    }
}

impl<'a, R: Record> PackedBuffer<'a, R> {
    /// Bytes needed for `slots` records.
    pub fn required_len(slots: usize) -> Result<usize, RecordError> {
        let size = size_of::<R>()?;
        slots.checked_mul(size).ok_or_else(|| {
            RecordError::InvalidLayout(format!("{slots} slots of {size} bytes overflow usize"))
        })
    }

    /// Partition the start of `region` into `slots` equal slots.
    pub fn new(region: Region<'a>, slots: usize) -> Result<Self, RecordError> {
        let slot_size = size_of::<R>()?;
        let required = Self::required_len(slots)?;
        Ok(Self {
            region: region.prefix(required)?,
            slots,
            slot_size,
            _record: PhantomData,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots == 0
    }

    #[inline]
    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    #[inline]
    pub fn storage_class(&self) -> StorageClass {
        self.region.storage_class()
    }

    /// Bytes `[i*size, (i+1)*size)`, or `SlotOutOfRange` for `i >= len()`.
    pub fn slot_region(&self, index: usize) -> Result<Region<'a>, RecordError> {
        if index >= self.slots {
            return Err(RecordError::SlotOutOfRange {
                index,
                len: self.slots,
            });
        }
        Ok(self.slot_region_unchecked(index))
    }

    /// Slot bytes without checking `index` against the slot count.
    ///
    /// The caller owns the bounds check. An index past the backing region
    /// panics rather than reading foreign memory.
    #[inline]
    pub fn slot_region_unchecked(&self, index: usize) -> Region<'a> {
        let (start, end) = index
            .checked_mul(self.slot_size)
            .and_then(|start| Some((start, start.checked_add(self.slot_size)?)))
            .unwrap_or_else(|| {
                panic!("slot {index} of {} bytes overflows usize offsets", self.slot_size)
            });
        let cells = &self.region.cells()[start..end];
        Region::from_cells(cells, self.region.storage_class())
    }

    /// Copy `record`'s payload into slot `index`.
    pub fn write(&self, index: usize, record: &R) -> Result<(), RecordError> {
        write_into::<R>(record, &self.slot_region(index)?)
    }

    /// Aliasing view over slot `index`.
    pub fn view(&self, index: usize) -> Result<RecordView<'a, R>, RecordError> {
        Ok(RecordView::from_exact(self.slot_region(index)?))
    }

    /// Independent copy of slot `index`.
    pub fn materialize(&self, index: usize) -> Result<R, RecordError> {
        materialize::<R>(&self.slot_region(index)?)
    }

    /// Views over every slot, in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = RecordView<'a, R>> + '_ {
        (0..self.slots).map(|i| RecordView::from_exact(self.slot_region_unchecked(i)))
    }
}
