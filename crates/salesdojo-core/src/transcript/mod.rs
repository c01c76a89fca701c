//! Transcript domain: the CSV row shape and the in-memory coach-row buffer.

pub mod buffer;
pub mod row;

pub use buffer::RowBuffer;
pub use row::{TranscriptRow, CSV_HEADER};
