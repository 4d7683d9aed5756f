use std::cell::Cell;
use std::ops::Range;

use serde::Serialize;

use crate::error::RecordError;

// ─── Storage Class ──────────────────────────────────────────────────────────

/// Where a record's bytes live. Diagnostic only; nothing branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StorageClass {
    /// A buffer on the call stack.
    Stack,
    /// A buffer checked out of a [`BufferPool`](crate::sources::BufferPool).
    Pooled,
    /// An explicitly managed allocation such as a [`HeapBlock`](crate::sources::HeapBlock).
    External,
    /// An ordinary Rust value.
    Owned,
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StorageClass::Stack => "stack",
            StorageClass::Pooled => "pooled",
            StorageClass::External => "external",
            StorageClass::Owned => "owned",
        })
    }
}

// ─── Region ─────────────────────────────────────────────────────────────────

/// A borrowed, contiguous span of caller-owned bytes.
///
/// Built from `&'a mut [u8]`, so the backing buffer cannot be freed, moved or
/// touched directly while any `Region` or view derived from it is alive. The
/// bytes are held as `Cell<u8>`: views bound to the same span share storage and
/// see each other's writes, and none of them can cross a thread.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    cells: &'a [Cell<u8>],
    class: StorageClass,
}

impl<'a> Region<'a> {
    #[inline]
    pub fn new(bytes: &'a mut [u8], class: StorageClass) -> Self {
        Self {
            cells: Cell::from_mut(bytes).as_slice_of_cells(),
            class,
        }
    }

    /// Shorthand for a region over a stack buffer.
    #[inline]
    pub fn stack(bytes: &'a mut [u8]) -> Self {
        Self::new(bytes, StorageClass::Stack)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn storage_class(&self) -> StorageClass {
        self.class
    }

    /// Sub-region over `range`, same storage class.
    pub fn slice(&self, range: Range<usize>) -> Result<Region<'a>, RecordError> {
        if range.start > range.end {
            return Err(RecordError::InvalidLayout(format!(
                "reversed range {}..{}",
                range.start, range.end
            )));
        }
        RecordError::check_len(range.end, self.len())?;
        Ok(Region {
            cells: &self.cells[range],
            class: self.class,
        })
    }

    /// The first `len` bytes, or `BufferTooSmall`.
    #[inline]
    pub fn prefix(&self, len: usize) -> Result<Region<'a>, RecordError> {
        self.slice(0..len)
    }

    /// Copy `out.len()` bytes starting at `offset` into `out`.
    ///
    /// Panics if the range runs past the region.
    #[inline]
    pub fn read_at(&self, offset: usize, out: &mut [u8]) {
        let src = &self.cells[offset..offset + out.len()];
        for (dst, cell) in out.iter_mut().zip(src) {
            *dst = cell.get();
        }
    }

    /// Copy `data` into the region starting at `offset`.
    ///
    /// Panics if the range runs past the region.
    #[inline]
    pub fn write_at(&self, offset: usize, data: &[u8]) {
        let dst = &self.cells[offset..offset + data.len()];
        for (cell, byte) in dst.iter().zip(data) {
            cell.set(*byte);
        }
    }

    /// Snapshot of every byte in the region.
    pub fn to_vec(&self) -> Vec<u8> {
        self.cells.iter().map(Cell::get).collect()
    }

    pub fn fill(&self, byte: u8) {
        for cell in self.cells {
            cell.set(byte);
        }
    }

    #[inline]
    pub(crate) fn from_cells(cells: &'a [Cell<u8>], class: StorageClass) -> Self {
        Self { cells, class }
    }

    #[inline]
    pub(crate) fn cells(&self) -> &'a [Cell<u8>] {
        self.cells
    }

    /// True when both regions cover exactly the same bytes.
    #[inline]
    pub fn same_bytes(&self, other: &Region<'_>) -> bool {
        std::ptr::eq(self.cells.as_ptr(), other.cells.as_ptr()) && self.len() == other.len()
    }
}
