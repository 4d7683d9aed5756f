use arrayvec::ArrayVec;
use serde::Serialize;
use xxhash_rust::const_xxh64::xxh64;

use crate::bound_record::RecordReadable;

// ─── Type Tags ──────────────────────────────────────────────────────────────
pub const TAG_I8: u8 = 1;
pub const TAG_U8: u8 = 2;
pub const TAG_I16: u8 = 3;
pub const TAG_U16: u8 = 4;
pub const TAG_I32: u8 = 5;
pub const TAG_U32: u8 = 6;
pub const TAG_I64: u8 = 7;
pub const TAG_U64: u8 = 8;
pub const TAG_F32: u8 = 9;
pub const TAG_F64: u8 = 10;

/// Widest scalar a field may hold.
pub const MAX_FIELD_WIDTH: usize = 8;

// ─── Field Kinds ────────────────────────────────────────────────────────────

/// Fixed-size semantic type of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl FieldKind {
    #[inline]
    pub const fn tag(self) -> u8 {
        match self {
            FieldKind::I8 => TAG_I8,
            FieldKind::U8 => TAG_U8,
            FieldKind::I16 => TAG_I16,
            FieldKind::U16 => TAG_U16,
            FieldKind::I32 => TAG_I32,
            FieldKind::U32 => TAG_U32,
            FieldKind::I64 => TAG_I64,
            FieldKind::U64 => TAG_U64,
            FieldKind::F32 => TAG_F32,
            FieldKind::F64 => TAG_F64,
        }
    }

    /// Width of the field in bytes.
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            FieldKind::I8 | FieldKind::U8 => 1,
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::I64 | FieldKind::U64 | FieldKind::F64 => 8,
        }
    }
}

// ─── Field Descriptor ───────────────────────────────────────────────────────

/// One entry of a record's static field table.
///
/// `offset` is relative to the start of the payload, not the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: &'static str,
    pub name_hash: u64,
    pub kind: FieldKind,
    pub offset: usize,
}

impl FieldDesc {
    pub const fn new(name: &'static str, kind: FieldKind, offset: usize) -> Self {
        Self {
            name,
            name_hash: xxh64(name.as_bytes(), 0),
            kind,
            offset,
        }
    }

    /// One past the last payload byte covered by this field.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.kind.width()
    }
}

// ─── Field Values ───────────────────────────────────────────────────────────

/// A scalar read from, or about to be written to, a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::I8(_) => FieldKind::I8,
            FieldValue::U8(_) => FieldKind::U8,
            FieldValue::I16(_) => FieldKind::I16,
            FieldValue::U16(_) => FieldKind::U16,
            FieldValue::I32(_) => FieldKind::I32,
            FieldValue::U32(_) => FieldKind::U32,
            FieldValue::I64(_) => FieldKind::I64,
            FieldValue::U64(_) => FieldKind::U64,
            FieldValue::F32(_) => FieldKind::F32,
            FieldValue::F64(_) => FieldKind::F64,
        }
    }

    /// Decode native-endian bytes of the given kind. `None` if `data` has the
    /// wrong width.
    pub fn decode(kind: FieldKind, data: &[u8]) -> Option<FieldValue> {
        Some(match kind {
            FieldKind::I8 => FieldValue::I8(i8::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::U8 => FieldValue::U8(u8::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::I16 => FieldValue::I16(i16::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::U16 => FieldValue::U16(u16::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::I32 => FieldValue::I32(i32::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::U32 => FieldValue::U32(u32::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::I64 => FieldValue::I64(i64::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::U64 => FieldValue::U64(u64::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::F32 => FieldValue::F32(f32::from_ne_bytes(data.try_into().ok()?)),
            FieldKind::F64 => FieldValue::F64(f64::from_ne_bytes(data.try_into().ok()?)),
        })
    }

    /// Native-endian bytes, exactly `self.kind().width()` long.
    pub fn encode(&self) -> ArrayVec<u8, MAX_FIELD_WIDTH> {
        let mut out = ArrayVec::new();
        match self {
            FieldValue::I8(v) => out.extend(v.to_ne_bytes()),
            FieldValue::U8(v) => out.extend(v.to_ne_bytes()),
            FieldValue::I16(v) => out.extend(v.to_ne_bytes()),
            FieldValue::U16(v) => out.extend(v.to_ne_bytes()),
            FieldValue::I32(v) => out.extend(v.to_ne_bytes()),
            FieldValue::U32(v) => out.extend(v.to_ne_bytes()),
            FieldValue::I64(v) => out.extend(v.to_ne_bytes()),
            FieldValue::U64(v) => out.extend(v.to_ne_bytes()),
            FieldValue::F32(v) => out.extend(v.to_ne_bytes()),
            FieldValue::F64(v) => out.extend(v.to_ne_bytes()),
        }
        out
    }

    /// Numeric value widened to f64, for display and loose comparisons.
    pub fn as_f64(&self) -> f64 {
        match *self {
            FieldValue::I8(v) => v as f64,
            FieldValue::U8(v) => v as f64,
            FieldValue::I16(v) => v as f64,
            FieldValue::U16(v) => v as f64,
            FieldValue::I32(v) => v as f64,
            FieldValue::U32(v) => v as f64,
            FieldValue::I64(v) => v as f64,
            FieldValue::U64(v) => v as f64,
            FieldValue::F32(v) => v as f64,
            FieldValue::F64(v) => v,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::I8(v) => write!(f, "{v}"),
            FieldValue::U8(v) => write!(f, "{v}"),
            FieldValue::I16(v) => write!(f, "{v}"),
            FieldValue::U16(v) => write!(f, "{v}"),
            FieldValue::I32(v) => write!(f, "{v}"),
            FieldValue::U32(v) => write!(f, "{v}"),
            FieldValue::I64(v) => write!(f, "{v}"),
            FieldValue::U64(v) => write!(f, "{v}"),
            FieldValue::F32(v) => write!(f, "{v}"),
            FieldValue::F64(v) => write!(f, "{v}"),
        }
    }
}

// ─── FieldSlot (Cached Field Position) ─────────────────────────────────────

/// Cached field position for repeat access without a name lookup.
///
/// Payload layouts never change, so a slot stays valid for every storage of
/// the record type it was resolved from.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
    pub(crate) index_pos: usize,
    pub(crate) data_offset: usize,
    pub(crate) kind: FieldKind,
}

impl FieldSlot {
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[inline]
    pub fn index_pos(&self) -> usize {
        self.index_pos
    }
}

// ─── Iterator ───────────────────────────────────────────────────────────────

pub struct FieldIter<'r, S: RecordReadable + ?Sized> {
    pub(crate) source: &'r S,
    pub(crate) fields: &'static [FieldDesc],
    pub(crate) pos: usize,
}

impl<'r, S: RecordReadable + ?Sized> Iterator for FieldIter<'r, S> {
    type Item = (&'static FieldDesc, FieldValue);

    fn next(&mut self) -> Option<Self::Item> {
        let desc = self.fields.get(self.pos)?;
        self.pos += 1;
        let value = self.source.read_value(desc)?;
        Some((desc, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.fields.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'r, S: RecordReadable + ?Sized> ExactSizeIterator for FieldIter<'r, S> {}
