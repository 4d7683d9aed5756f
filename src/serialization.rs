use log::trace;

use crate::bound_record::{RecordHandle, RecordView};
use crate::error::RecordError;
use crate::layout::{Record, size_of};
use crate::region::Region;

// ─── Writer ─────────────────────────────────────────────────────────────────

/// Copy a record's payload, byte for byte, into the start of `region`.
///
/// The record itself is not touched. Passing `None` yields
/// [`RecordError::NullRecord`]; a region shorter than the payload yields
/// [`RecordError::BufferTooSmall`]. Both are checked before the first byte is
/// written, so a failed call leaves the region as it was.
///
/// ```
/// use record_region::region::Region;
/// use record_region::sample::SampleRecord;
/// use record_region::serialization::write_into;
///
/// let record = SampleRecord::new(342, 356, f32::NAN);
/// let mut buf = [0u8; 24];
/// write_into(&record, &Region::stack(&mut buf)).unwrap();
/// assert!(write_into::<SampleRecord>(None, &Region::stack(&mut buf)).is_err());
/// ```
pub fn write_into<'r, R: Record + 'r>(
    record: impl Into<Option<&'r R>>,
    region: &Region<'_>,
) -> Result<(), RecordError> {
    let record = record.into().ok_or(RecordError::NullRecord)?;
    let size = size_of::<R>()?;
    let target = region.prefix(size)?;
    target.write_at(0, bytemuck::bytes_of(record.payload()));
    trace!(
        "wrote {size}-byte {} payload into {} region",
        std::any::type_name::<R>(),
        region.storage_class()
    );
    Ok(())
}

/// Write the handle's payload into `region` and repoint the handle there.
///
/// After this call, reads and writes through `handle` act on `region`, and
/// the handle reports the region's storage class. An already-resident handle
/// moves to the new region, carrying its current bytes along; the old region
/// keeps its last contents. On error the handle is left as it was.
pub fn adopt<'a, R: Record>(
    handle: &mut RecordHandle<'a, R>,
    region: Region<'a>,
) -> Result<(), RecordError> {
    let size = size_of::<R>()?;
    let target = region.prefix(size)?;
    let payload = handle.load();
    target.write_at(0, bytemuck::bytes_of(&payload));
    let identity = handle.identity();
    *handle = RecordHandle::Resident {
        view: RecordView::from_exact(target),
        identity,
    };
    trace!(
        "adopted {} into {} region",
        std::any::type_name::<R>(),
        region.storage_class()
    );
    Ok(())
}
