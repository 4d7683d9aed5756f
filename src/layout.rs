use crate::error::RecordError;
use crate::types::FieldDesc;
use xxhash_rust::xxh64::xxh64;

// ─── Record Trait ───────────────────────────────────────────────────────────

/// A fixed-layout record: a plain-old-data payload plus whatever the type
/// keeps outside of it (an identity counter, for example).
///
/// Only the payload ever travels through a byte region. `Default` is the
/// normal construction path used when materializing a copy, so any identity
/// is assigned there and never copied from bytes.
///
/// ```
/// use bytemuck::{Pod, Zeroable};
/// use record_region::layout::Record;
/// use record_region::types::{FieldDesc, FieldKind};
///
/// #[repr(C)]
/// #[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     type Payload = Point;
///     const FIELDS: &'static [FieldDesc] = &[
///         FieldDesc::new("x", FieldKind::I32, std::mem::offset_of!(Point, x)),
///         FieldDesc::new("y", FieldKind::I32, std::mem::offset_of!(Point, y)),
///     ];
///     fn payload(&self) -> &Point { self }
///     fn payload_mut(&mut self) -> &mut Point { self }
/// }
///
/// assert_eq!(record_region::layout::size_of::<Point>(), Ok(8));
/// ```
pub trait Record: Default {
    /// The field data. Its size is the record's payload size.
    type Payload: bytemuck::Pod;

    /// Field table, offsets relative to the payload start.
    const FIELDS: &'static [FieldDesc];

    fn payload(&self) -> &Self::Payload;

    fn payload_mut(&mut self) -> &mut Self::Payload;

    /// Per-instance identity, if the type carries one.
    fn identity(&self) -> Option<u64> {
        None
    }
}

// ─── Layout Inspector ───────────────────────────────────────────────────────

/// Payload size of `R` without validating its field table.
#[inline]
pub const fn payload_size<R: Record>() -> usize {
    std::mem::size_of::<R::Payload>()
}

/// Number of payload bytes of one `R` instance, excluding anything the record
/// keeps outside its payload.
///
/// Fails with [`RecordError::UnsupportedType`] when the type has no usable
/// fixed layout: an empty payload, an empty field table, fields that run past
/// the payload, overlapping fields, or two fields sharing a name.
pub fn size_of<R: Record>() -> Result<usize, RecordError> {
    let size = payload_size::<R>();
    let unsupported = |why: String| {
        RecordError::UnsupportedType(format!("{}: {why}", std::any::type_name::<R>()))
    };

    if size == 0 {
        return Err(unsupported("zero-sized payload".into()));
    }
    if R::FIELDS.is_empty() {
        return Err(unsupported("empty field table".into()));
    }

    for (i, field) in R::FIELDS.iter().enumerate() {
        if field.end() > size {
            return Err(unsupported(format!(
                "field `{}` ends at byte {} of a {size}-byte payload",
                field.name,
                field.end()
            )));
        }
        for other in &R::FIELDS[i + 1..] {
            if field.name_hash == other.name_hash && field.name == other.name {
                return Err(unsupported(format!("duplicate field `{}`", field.name)));
            }
            if field.offset < other.end() && other.offset < field.end() {
                return Err(unsupported(format!(
                    "fields `{}` and `{}` overlap",
                    field.name, other.name
                )));
            }
        }
    }
    Ok(size)
}

/// Find a field by name. Returns (index_position, descriptor).
pub fn find_field<R: Record>(name: &str) -> Result<(usize, &'static FieldDesc), RecordError> {
    find_in(R::FIELDS, name)
}

pub(crate) fn find_in(
    fields: &'static [FieldDesc],
    name: &str,
) -> Result<(usize, &'static FieldDesc), RecordError> {
    let hash = xxh64(name.as_bytes(), 0);
    fields
        .iter()
        .enumerate()
        .find(|(_, f)| f.name_hash == hash && f.name == name)
        .ok_or(RecordError::FieldNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleRecord;
    use crate::types::FieldKind;
    use bytemuck::{Pod, Zeroable};

    #[repr(C)]
    #[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
    struct Pair {
        a: u32,
        b: u32,
    }

    macro_rules! pair_record {
        ($name:ident, $fields:expr) => {
            #[derive(Default)]
            struct $name(Pair);
            impl Record for $name {
                type Payload = Pair;
                const FIELDS: &'static [FieldDesc] = $fields;
                fn payload(&self) -> &Pair {
                    &self.0
                }
                fn payload_mut(&mut self) -> &mut Pair {
                    &mut self.0
                }
            }
        };
    }

    pair_record!(
        GoodPair,
        &[FieldDesc::new("a", FieldKind::U32, 0), FieldDesc::new("b", FieldKind::U32, 4)]
    );
    pair_record!(NoFields, &[]);
    pair_record!(PastEnd, &[FieldDesc::new("a", FieldKind::U64, 4)]);
    pair_record!(
        Overlapping,
        &[FieldDesc::new("a", FieldKind::U64, 0), FieldDesc::new("b", FieldKind::U32, 4)]
    );
    pair_record!(
        Duplicate,
        &[FieldDesc::new("a", FieldKind::U32, 0), FieldDesc::new("a", FieldKind::U32, 4)]
    );

    #[derive(Default)]
    struct Empty(());
    impl Record for Empty {
        type Payload = ();
        const FIELDS: &'static [FieldDesc] = &[];
        fn payload(&self) -> &() {
            &self.0
        }
        fn payload_mut(&mut self) -> &mut () {
            &mut self.0
        }
    }

    #[test]
    fn test_size_is_stable() {
        let first = size_of::<SampleRecord>().unwrap();
        for _ in 0..16 {
            assert_eq!(size_of::<SampleRecord>().unwrap(), first);
        }
        assert_eq!(first, payload_size::<SampleRecord>());
    }

    #[test]
    fn test_size_excludes_identity() {
        assert_eq!(size_of::<SampleRecord>().unwrap(), 24);
        assert!(std::mem::size_of::<SampleRecord>() > 24);
    }

    #[test]
    fn test_valid_pair() {
        assert_eq!(size_of::<GoodPair>(), Ok(8));
    }

    #[test]
    fn test_unsupported_layouts() {
        for result in [
            size_of::<Empty>(),
            size_of::<NoFields>(),
            size_of::<PastEnd>(),
            size_of::<Overlapping>(),
            size_of::<Duplicate>(),
        ] {
            assert!(matches!(result, Err(RecordError::UnsupportedType(_))), "{result:?}");
        }
    }

    #[test]
    fn test_find_field() {
        let (pos, desc) = find_field::<GoodPair>("b").unwrap();
        assert_eq!(pos, 1);
        assert_eq!(desc.offset, 4);
        assert_eq!(find_field::<GoodPair>("c"), Err(RecordError::FieldNotFound));
    }
}
