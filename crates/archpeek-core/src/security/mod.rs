//! Entry path security: sanitization, exclusion rules and staging
//! containment.

pub mod entry_path;
pub mod path;

pub use entry_path::is_directory_marker;
pub use entry_path::is_excluded;
pub use entry_path::item_name;
pub use entry_path::sanitize;
pub use path::validate_entry_path;
