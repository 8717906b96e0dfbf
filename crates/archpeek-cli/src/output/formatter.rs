//! Output formatter trait for CLI results.

use anyhow::Result;
use archpeek_core::ResultDocument;
use archpeek_core::config::SubtypeClass;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a finished inspection
    fn format_document(&self, document: &ResultDocument) -> Result<()>;

    /// Format the reader class of a declared media type
    fn format_classification(&self, media_type: &str, class: Option<SubtypeClass>) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
        }
    }
}
