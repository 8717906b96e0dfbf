//! Inspection controller: dispatch, traversal, empty-result and encoding
//! policies.

use std::path::PathBuf;

use crate::InspectorConfig;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::catalog::AcceptedPaths;
use crate::catalog::Catalog;
use crate::copy::CopyBuffer;
use crate::formats::FormatReader;
use crate::formats::Reader;
use crate::formats::TraversalContext;
use crate::formats::TraversalOutcome;
use crate::formats::common::ScratchSpace;
use crate::render::render;
use crate::report::ErrorLog;
use crate::report::InspectionResult;
use crate::report::PeekType;
use crate::report::Status;

/// Inputs of one inspection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionRequest {
    /// Name shown at the root of the listing.
    pub display_name: String,
    /// Local file to inspect.
    pub path: PathBuf,
    /// Request identifier, quoted in error reports.
    pub id: String,
    /// Declared media type, `type/subtype`.
    pub media_type: String,
}

impl InspectionRequest {
    /// Creates a request.
    pub fn new(
        display_name: impl Into<String>,
        path: impl Into<PathBuf>,
        id: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            path: path.into(),
            id: id.into(),
            media_type: media_type.into(),
        }
    }
}

/// One inspection run.
///
/// Consumed by [`process`](Self::process), which never fails: every problem
/// ends up as an error record and an [`Status::Error`] status on the
/// returned [`InspectionResult`].
///
/// # Examples
///
/// ```no_run
/// use archpeek_core::Inspection;
/// use archpeek_core::InspectionRequest;
/// use archpeek_core::InspectorConfig;
///
/// let config = InspectorConfig::default();
/// let request =
///     InspectionRequest::new("test.zip", "/tmp/upload/test.zip", "42", "application/zip");
/// let result = Inspection::new(request, &config).process();
/// println!("{:?}: {} entries", result.status, result.nested_items.len());
/// ```
#[derive(Debug)]
pub struct Inspection<'c> {
    request: InspectionRequest,
    config: &'c InspectorConfig,
    status: Status,
    peek_type: PeekType,
    peek_text: Option<Vec<u8>>,
    catalog: Catalog,
    errors: ErrorLog,
}

impl<'c> Inspection<'c> {
    /// Prepares a run for `request`.
    #[must_use]
    pub fn new(request: InspectionRequest, config: &'c InspectorConfig) -> Self {
        Self {
            request,
            config,
            status: Status::Success,
            peek_type: PeekType::None,
            peek_text: None,
            catalog: Catalog::new(),
            errors: ErrorLog::new(),
        }
    }

    /// Runs the inspection.
    #[must_use]
    pub fn process(self) -> InspectionResult {
        self.process_with_progress(&mut NoopProgress)
    }

    /// Runs the inspection, reporting each cataloged entry to `progress`.
    #[must_use]
    pub fn process_with_progress(
        mut self,
        progress: &mut dyn ProgressCallback,
    ) -> InspectionResult {
        let span = tracing::info_span!("inspection", id = %self.request.id);
        let _guard = span.enter();
        tracing::info!(
            name = %self.request.display_name,
            media_type = %self.request.media_type,
            "inspecting"
        );

        match Reader::for_media_type(&self.request.media_type, &self.config.classes) {
            Ok(reader) => self.run(reader, progress),
            Err(e) => {
                let report = format!(
                    "problem creating default peek for task {}: {e}",
                    self.request.id
                );
                self.fail(report);
            }
        }

        progress.on_complete();
        self.finish()
    }

    fn run(&mut self, reader: Reader, progress: &mut dyn ProgressCallback) {
        let mut scratch = ScratchSpace::new(self.config.staging_dir.as_deref(), &self.request.path);
        let mut buffer = CopyBuffer::new();

        let outcome = {
            let mut ctx = TraversalContext {
                display_name: &self.request.display_name,
                scratch: &mut scratch,
                max_path_depth: self.config.max_path_depth,
                catalog: &mut self.catalog,
                errors: &mut self.errors,
                progress,
                buffer: &mut buffer,
            };
            reader.traverse(&self.request.path, &mut ctx)
        };
        scratch.close(&mut self.errors);

        match outcome {
            Ok(TraversalOutcome::Entries(paths)) => self.handle_paths(&paths),
            Ok(TraversalOutcome::NoListing) => self.peek_type = PeekType::None,
            Err(e) => {
                let report = format!(
                    "problem {} for task {}: {e}",
                    reader.failure_context(),
                    self.request.id
                );
                self.fail(report);
            }
        }
    }

    fn handle_paths(&mut self, paths: &AcceptedPaths) {
        if paths.is_empty() {
            self.peek_type = PeekType::None;
            self.status = Status::Error;
            self.errors.extraction(format!(
                "no items found for archive listing for task {}",
                self.request.id
            ));
        } else {
            self.peek_type = PeekType::Listing;
            self.peek_text = Some(render(&self.request.display_name, paths));
        }
    }

    fn fail(&mut self, report: String) {
        self.status = Status::Error;
        self.peek_type = PeekType::None;
        self.errors.extraction(report);
    }

    fn finish(mut self) -> InspectionResult {
        let peek_text = match self.peek_text.take().map(String::from_utf8) {
            Some(Ok(text)) => Some(text),
            Some(Err(_)) => {
                self.peek_type = PeekType::None;
                self.errors.extraction("invalid encoding for peek text");
                None
            }
            None => None,
        };

        tracing::info!(
            status = ?self.status,
            entries = self.catalog.len(),
            "inspection finished"
        );

        InspectionResult {
            status: self.status,
            peek_type: self.peek_type,
            peek_text,
            nested_items: self.catalog.into_entries(),
            errors: self.errors.into_records(),
        }
    }
}
