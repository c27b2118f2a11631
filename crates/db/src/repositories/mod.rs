//! [`crate::ProjectStore`] implementations.

pub mod memory_repo;
pub mod project_repo;

pub use memory_repo::MemoryProjectStore;
pub use project_repo::PgProjectStore;
