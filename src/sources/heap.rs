use std::alloc::{self, Layout};
use std::ptr::NonNull;

use log::debug;

use crate::error::RecordError;
use crate::region::{Region, StorageClass};

/// Alignment used by [`HeapBlock::new`]; enough for any scalar field.
pub const DEFAULT_ALIGN: usize = 16;

/// An explicitly managed, zero-initialized allocation outside any Rust
/// collection. Freed when dropped.
#[derive(Debug)]
pub struct HeapBlock {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl HeapBlock {
    pub fn new(len: usize) -> Result<Self, RecordError> {
        Self::with_align(len, DEFAULT_ALIGN)
    }

    pub fn with_align(len: usize, align: usize) -> Result<Self, RecordError> {
        if len == 0 {
            return Err(RecordError::InvalidLayout("zero-length heap block".into()));
        }
        let layout = Layout::from_size_align(len, align)
            .map_err(|e| RecordError::InvalidLayout(e.to_string()))?;
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(RecordError::AllocationFailed { size: len, align })?;
        debug!("heap: allocated {len} bytes (align {align}) at {raw:p}");
        Ok(Self { ptr, layout })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    #[inline]
    pub fn align(&self) -> usize {
        self.layout.align()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` points to `len()` initialized bytes owned by `self`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }

    pub fn region(&mut self) -> Region<'_> {
        Region::new(self.as_mut_slice(), StorageClass::External)
    }
}

impl Drop for HeapBlock {
    fn drop(&mut self) {
        debug!("heap: freeing {} bytes at {:p}", self.len(), self.ptr);
        // SAFETY: allocated in `with_align` with exactly this layout.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_is_zeroed_and_aligned() {
        let block = HeapBlock::with_align(48, 64).unwrap();
        assert_eq!(block.len(), 48);
        assert!(block.as_slice().iter().all(|b| *b == 0));
        assert_eq!(block.as_slice().as_ptr() as usize % 64, 0);
    }

    #[test]
    fn test_region_writes_reach_block() {
        let mut block = HeapBlock::new(4).unwrap();
        block.region().write_at(1, &[5, 6]);
        assert_eq!(block.as_slice(), &[0, 5, 6, 0]);
        assert_eq!(block.region().storage_class(), StorageClass::External);
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(matches!(HeapBlock::new(0), Err(RecordError::InvalidLayout(_))));
        assert!(matches!(
            HeapBlock::with_align(8, 3),
            Err(RecordError::InvalidLayout(_))
        ));
    }
}
