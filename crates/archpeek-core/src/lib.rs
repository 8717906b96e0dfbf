//! Size-bounded content peeks for uploaded archives.
//!
//! `archpeek-core` walks zip containers, tar archives (plain, gzip, bzip2,
//! xz or zstd compressed), 7z archives and single-file gzip streams, and
//! returns a flat catalog of the nested entries together with an indented
//! HTML listing. Entry payloads are only ever written transiently, inside a
//! private scratch directory, to sniff their media type.
//!
//! # Examples
//!
//! ```no_run
//! use archpeek_core::InspectionRequest;
//! use archpeek_core::InspectorConfig;
//! use archpeek_core::inspect;
//!
//! let request = InspectionRequest::new(
//!     "photos.zip",
//!     "/var/uploads/photos.zip",
//!     "task-17",
//!     "application/zip",
//! );
//! let result = inspect(request, &InspectorConfig::default());
//! for item in &result.nested_items {
//!     println!("{} {} {}", item.item_path, item.item_size, item.media_type);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod catalog;
pub mod config;
pub mod copy;
pub mod error;
pub mod formats;
pub mod inspection;
pub mod media_type;
pub mod render;
pub mod report;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::classify;
pub use api::inspect;
pub use api::inspect_path;
pub use api::inspect_with_progress;
pub use catalog::CatalogEntry;
pub use config::DEFAULT_MAX_PATH_DEPTH;
pub use config::InspectorConfig;
pub use error::InspectionError;
pub use error::Result;
pub use inspection::Inspection;
pub use inspection::InspectionRequest;
pub use report::ErrorKind;
pub use report::ErrorRecord;
pub use report::InspectionResult;
pub use report::NoopProgress;
pub use report::PeekType;
pub use report::ProgressCallback;
pub use report::ResultDocument;
pub use report::Status;

pub use types::SafePath;
pub use types::StagingDir;
