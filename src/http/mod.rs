//! HTTP protocol helpers shared by the request handlers.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

pub use range::{interpret_range, ByteRange, RangeOutcome};
pub use response::{internal_error, not_modified, ok_file, partial_content, range_not_satisfiable};
