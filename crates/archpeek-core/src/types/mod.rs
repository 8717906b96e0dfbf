//! Type-safe wrappers guarding transient writes.
//!
//! Both types are validated upon construction and cannot be created from raw
//! paths without going through validation.

pub mod safe_path;
pub mod staging_dir;

pub use safe_path::SafePath;
pub use staging_dir::StagingDir;
