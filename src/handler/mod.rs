//! Request handling: path resolution and file responses.

pub mod router;
pub mod spa;
pub mod static_files;

pub use router::handle_request;
