use log::trace;

use crate::bound_record::RecordView;
use crate::error::RecordError;
use crate::layout::{Record, size_of};
use crate::region::Region;

// ─── Aliasing Reader ────────────────────────────────────────────────────────

/// Bind a view whose payload storage is the first `size_of::<R>()` bytes of
/// `region`. No bytes are copied.
///
/// The view borrows the region's buffer for `'a`: releasing, reusing or
/// moving the buffer while the view is alive does not compile.
pub fn bind_view<'a, R: Record>(region: Region<'a>) -> Result<RecordView<'a, R>, RecordError> {
    let view = RecordView::bind(region)?;
    trace!(
        "bound {} view over {} region",
        std::any::type_name::<R>(),
        region.storage_class()
    );
    Ok(view)
}

// ─── Materializing Copier ───────────────────────────────────────────────────

/// Build a fresh `R` through `R::default()` and overwrite its payload with the
/// first `size_of::<R>()` bytes of `region`.
///
/// Identity comes from construction, not from the bytes. The result shares
/// nothing with the region afterwards.
pub fn materialize<R: Record>(region: &Region<'_>) -> Result<R, RecordError> {
    let size = size_of::<R>()?;
    let source = region.prefix(size)?;
    let mut record = R::default();
    source.read_at(0, bytemuck::bytes_of_mut(record.payload_mut()));
    trace!(
        "materialized {} from {} region",
        std::any::type_name::<R>(),
        region.storage_class()
    );
    Ok(record)
}
