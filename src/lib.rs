//! Fixed-layout records stored in caller-owned byte regions.
//!
//! A [`Record`](layout::Record) exposes its field data as a plain-old-data
//! payload. That payload can be
//!
//! - measured: [`layout::size_of`],
//! - copied into a region: [`serialization::write_into`],
//! - viewed in place, reads and writes going straight to the region:
//!   [`deserialization::bind_view`],
//! - copied back out into an independent value:
//!   [`deserialization::materialize`].
//!
//! Many records can share one region through [`packed::PackedBuffer`].
//!
//! ## Binary layout
//!
//! A payload is stored verbatim: native endianness, the payload type's own
//! field order and padding. Nothing is prepended. Anything a record keeps
//! outside its payload (such as an identity counter) never reaches the bytes.
//!
//! ## Lifetimes
//!
//! A [`Region`](region::Region) borrows its backing buffer, and every view
//! borrows the region. Freeing a heap block, returning a pooled buffer or
//! leaving the stack frame of a local array while a view is still in use is a
//! compile error, not a runtime fault. Regions and views are single-threaded.

pub mod bound_record;
pub mod deserialization;
pub mod error;
pub mod layout;
pub mod packed;
pub mod region;
pub mod sample;
pub mod serialization;
pub mod sources;
pub mod types;

pub use bound_record::{RecordHandle, RecordReadable, RecordView, RecordWritable};
pub use deserialization::{bind_view, materialize};
pub use error::RecordError;
pub use layout::{Record, size_of};
pub use packed::PackedBuffer;
pub use region::{Region, StorageClass};
pub use serialization::{adopt, write_into};
