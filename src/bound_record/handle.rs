use super::read_op::RecordReadable;
use super::view::RecordView;
use super::write_op::RecordWritable;
use crate::layout::Record;
use crate::region::StorageClass;
use crate::types::FieldDesc;

/// A record that is either an ordinary owned value or resident in a region.
///
/// [`adopt`](crate::serialization::adopt) turns an owned handle into a
/// resident one. The identity travels with the handle, never with the bytes.
pub enum RecordHandle<'a, R: Record> {
    Owned(R),
    Resident {
        view: RecordView<'a, R>,
        identity: Option<u64>,
    },
}

impl<'a, R: Record> RecordHandle<'a, R> {
    pub fn new(record: R) -> Self {
        RecordHandle::Owned(record)
    }

    #[inline]
    pub fn is_resident(&self) -> bool {
        matches!(self, RecordHandle::Resident { .. })
    }

    pub fn storage_class(&self) -> StorageClass {
        match self {
            RecordHandle::Owned(_) => StorageClass::Owned,
            RecordHandle::Resident { view, .. } => view.storage_class(),
        }
    }

    pub fn identity(&self) -> Option<u64> {
        match self {
            RecordHandle::Owned(record) => record.identity(),
            RecordHandle::Resident { identity, .. } => *identity,
        }
    }

    /// The aliasing view, if resident.
    pub fn view(&self) -> Option<RecordView<'a, R>> {
        match self {
            RecordHandle::Owned(_) => None,
            RecordHandle::Resident { view, .. } => Some(*view),
        }
    }

    /// Current payload, wherever it lives.
    pub fn load(&self) -> R::Payload {
        match self {
            RecordHandle::Owned(record) => *record.payload(),
            RecordHandle::Resident { view, .. } => view.load(),
        }
    }

    /// Independent copy built through `R::default()`.
    pub fn materialize(&self) -> R {
        let mut record = R::default();
        *record.payload_mut() = self.load();
        record
    }
}

impl<'a, R: Record> From<R> for RecordHandle<'a, R> {
    fn from(record: R) -> Self {
        RecordHandle::Owned(record)
    }
}

impl<'a, R: Record> RecordReadable for RecordHandle<'a, R> {
    #[inline]
    fn fields(&self) -> &'static [FieldDesc] {
        R::FIELDS
    }

    #[inline]
    fn read_payload(&self, offset: usize, out: &mut [u8]) {
        match self {
            RecordHandle::Owned(record) => record.read_payload(offset, out),
            RecordHandle::Resident { view, .. } => view.read_payload(offset, out),
        }
    }
}

impl<'a, R: Record> RecordWritable for RecordHandle<'a, R> {
    #[inline]
    fn write_payload(&mut self, offset: usize, data: &[u8]) {
        match self {
            RecordHandle::Owned(record) => record.write_payload(offset, data),
            RecordHandle::Resident { view, .. } => view.write_payload(offset, data),
        }
    }
}
