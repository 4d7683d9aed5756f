pub mod handle;
mod read_op;
pub mod view;
mod write_op;

pub use handle::RecordHandle;
pub use read_op::RecordReadable;
pub use view::RecordView;
pub use write_op::RecordWritable;
