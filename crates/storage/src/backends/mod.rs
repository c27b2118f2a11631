//! [`crate::MediaStore`] implementations.

pub mod local;
pub mod memory;
pub mod s3;

pub use local::LocalMediaStore;
pub use memory::MemoryMediaStore;
pub use s3::S3MediaStore;
