//! Inspection outcome: status, error records, result document and progress
//! reporting.

use serde::Serialize;

use crate::catalog::CatalogEntry;

/// Terminal status of an inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The listing (or lack of one) is trustworthy.
    #[default]
    Success,
    /// Something went wrong; see the error records.
    Error,
}

/// Kind of peek produced for the inspected file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeekType {
    /// No peek text.
    #[default]
    None,
    /// Indented HTML listing of nested entries.
    Listing,
}

/// Source of an error record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Raised while inspecting the archive.
    Extraction,
    /// Raised by the surrounding workflow while fetching the object.
    StorageGet,
    /// Raised by the surrounding workflow while publishing the result.
    StoragePut,
}

/// One human-readable error report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    /// Where the error came from.
    pub error_type: ErrorKind,
    /// Description of the problem.
    pub report: String,
}

impl ErrorRecord {
    /// Creates a record of the given kind.
    pub fn new(error_type: ErrorKind, report: impl Into<String>) -> Self {
        Self {
            error_type,
            report: report.into(),
        }
    }

    /// Creates an [`ErrorKind::Extraction`] record.
    pub fn extraction(report: impl Into<String>) -> Self {
        Self::new(ErrorKind::Extraction, report)
    }
}

/// Append-only list of error records for one request.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
}

impl ErrorLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an [`ErrorKind::Extraction`] record.
    pub fn extraction(&mut self, report: impl Into<String>) {
        let record = ErrorRecord::extraction(report);
        tracing::warn!(report = %record.report, "inspection problem");
        self.records.push(record);
    }

    /// Returns the records in order.
    #[must_use]
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Returns `true` if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the log, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }
}

/// Outcome of one inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionResult {
    /// Terminal status.
    pub status: Status,
    /// Kind of peek produced.
    pub peek_type: PeekType,
    /// Rendered listing, present only for [`PeekType::Listing`].
    pub peek_text: Option<String>,
    /// Cataloged entries in traversal order.
    pub nested_items: Vec<CatalogEntry>,
    /// Error records in the order they were raised.
    pub errors: Vec<ErrorRecord>,
}

impl InspectionResult {
    /// Returns `true` if the inspection succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Outbound result document for one request.
///
/// Combines the caller's identifier and error records with the inspection
/// result. Caller records come first.
///
/// # Examples
///
/// ```
/// use archpeek_core::ErrorKind;
/// use archpeek_core::ErrorRecord;
/// use archpeek_core::InspectionResult;
/// use archpeek_core::ResultDocument;
///
/// let doc = ResultDocument::new(
///     "task-1",
///     vec![ErrorRecord::new(ErrorKind::StorageGet, "object missing")],
///     InspectionResult::default(),
/// );
/// let json = serde_json::to_value(&doc).unwrap();
/// assert_eq!(json["web_id"], "task-1");
/// assert_eq!(json["error"][0]["error_type"], "storage_get");
/// assert_eq!(json["peek_type"], "none");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultDocument {
    /// Caller-owned request identifier.
    pub web_id: String,
    /// Terminal status.
    pub status: Status,
    /// Caller error records followed by inspection error records.
    pub error: Vec<ErrorRecord>,
    /// Kind of peek produced.
    pub peek_type: PeekType,
    /// Rendered listing.
    pub peek_text: Option<String>,
    /// Cataloged entries.
    pub nested_items: Vec<CatalogEntry>,
}

impl ResultDocument {
    /// Builds the document for a finished inspection.
    ///
    /// Any caller error record forces [`Status::Error`].
    pub fn new(
        web_id: impl Into<String>,
        caller_errors: Vec<ErrorRecord>,
        result: InspectionResult,
    ) -> Self {
        let status = if caller_errors.is_empty() {
            result.status
        } else {
            Status::Error
        };
        let mut error = caller_errors;
        error.extend(result.errors);

        Self {
            web_id: web_id.into(),
            status,
            error,
            peek_type: result.peek_type,
            peek_text: result.peek_text,
            nested_items: result.nested_items,
        }
    }
}

/// Callback trait for progress reporting during inspection.
///
/// The trait requires `Send` to allow use in multi-threaded contexts.
///
/// # Examples
///
/// ```
/// use archpeek_core::ProgressCallback;
///
/// struct Counter(usize);
///
/// impl ProgressCallback for Counter {
///     fn on_entry(&mut self, path: &str, is_directory: bool) {
///         self.0 += 1;
///         println!("{path} (dir: {is_directory})");
///     }
///
///     fn on_complete(&mut self) {
///         println!("{} entries", self.0);
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called after an entry has been cataloged.
    fn on_entry(&mut self, path: &str, is_directory: bool);

    /// Called once when the inspection has finished, successfully or not.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback` that does nothing.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry(&mut self, _path: &str, _is_directory: bool) {}

    fn on_complete(&mut self) {}
}
