use std::marker::PhantomData;

use bytemuck::Zeroable;

use super::read_op::RecordReadable;
use super::write_op::RecordWritable;
use crate::error::RecordError;
use crate::layout::{Record, size_of};
use crate::region::{Region, StorageClass};
use crate::types::FieldDesc;

// ─── Aliasing view ─────────────────────────────────────────────────────────

/// A record whose payload *is* the first `size_of::<R>()` bytes of a region.
///
/// Nothing is copied at bind time. Every read goes to the region and every
/// write lands in it, so two views over the same bytes see each other's
/// changes immediately. The view borrows the region's backing buffer for
/// `'a`; the buffer cannot be freed, returned to a pool, or moved while the
/// view exists.
pub struct RecordView<'a, R: Record> {
    region: Region<'a>,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record> Clone for RecordView<'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R: Record> Copy for RecordView<'a, R> {}

impl<'a, R: Record> std::fmt::Debug for RecordView<'a, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordView")
            .field("record", &std::any::type_name::<R>())
            .field("storage", &self.region.storage_class())
            .field("fields", &self.to_map())
            .finish()
    }
}

impl<'a, R: Record> RecordView<'a, R> {
    /// Bind to the start of `region`.
    pub fn bind(region: Region<'a>) -> Result<Self, RecordError> {
        let size = size_of::<R>()?;
        Ok(Self::from_exact(region.prefix(size)?))
    }

    /// `region` must already be exactly one payload long.
    #[inline]
    pub(crate) fn from_exact(region: Region<'a>) -> Self {
        debug_assert_eq!(region.len(), crate::layout::payload_size::<R>());
        Self {
            region,
            _record: PhantomData,
        }
    }

    /// Read the whole payload out of the region. Works at any alignment.
    pub fn load(&self) -> R::Payload {
        let mut payload = R::Payload::zeroed();
        self.region
            .read_at(0, bytemuck::bytes_of_mut(&mut payload));
        payload
    }

    /// Overwrite the whole payload in the region.
    pub fn store(&self, payload: &R::Payload) {
        self.region.write_at(0, bytemuck::bytes_of(payload));
    }

    /// Load, modify, store.
    pub fn update<T>(&self, f: impl FnOnce(&mut R::Payload) -> T) -> T {
        let mut payload = self.load();
        let out = f(&mut payload);
        self.store(&payload);
        out
    }

    /// Independent copy built through `R::default()`.
    pub fn materialize(&self) -> R {
        let mut record = R::default();
        *record.payload_mut() = self.load();
        record
    }

    #[inline]
    pub fn storage_class(&self) -> StorageClass {
        self.region.storage_class()
    }

    #[inline]
    pub fn as_region(&self) -> Region<'a> {
        self.region
    }

    /// Snapshot of the payload bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.region.to_vec()
    }

    /// True when both views alias the same bytes.
    #[inline]
    pub fn same_storage(&self, other: &RecordView<'_, R>) -> bool {
        self.region.same_bytes(&other.region)
    }
}

impl<'a, R: Record> RecordReadable for RecordView<'a, R> {
    #[inline]
    fn fields(&self) -> &'static [FieldDesc] {
        R::FIELDS
    }

    #[inline]
    fn read_payload(&self, offset: usize, out: &mut [u8]) {
        self.region.read_at(offset, out);
    }
}

impl<'a, R: Record> RecordWritable for RecordView<'a, R> {
    #[inline]
    fn write_payload(&mut self, offset: usize, data: &[u8]) {
        self.region.write_at(offset, data);
    }
}
