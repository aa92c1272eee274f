//! Sink implementations
//!
//! Any `std::io::Write + Send` value can be a logger's sink. These are the
//! ones the crate ships.

pub mod buffer;
pub mod file;

pub use buffer::SharedBuffer;
pub use file::FileSink;
#[cfg(feature = "file")]
pub use file::LockedFileSink;
