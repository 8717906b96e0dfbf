//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use archpeek_core::ErrorKind;
use archpeek_core::ErrorRecord;
use archpeek_core::InspectionRequest;
use archpeek_core::InspectionResult;
use archpeek_core::InspectorConfig;
use archpeek_core::NoopProgress;
use archpeek_core::ProgressCallback;
use archpeek_core::ResultDocument;
use archpeek_core::Status;
use archpeek_core::inspect_with_progress;
use std::path::Path;

pub fn execute(args: &InspectArgs, formatter: &dyn OutputFormatter, silent: bool) -> Result<()> {
    let file_name = default_name(&args.file);
    let name = args.name.clone().unwrap_or_else(|| file_name.clone());
    let id = args.id.clone().unwrap_or(file_name);

    let config = InspectorConfig {
        staging_dir: args.staging_dir.clone(),
        max_path_depth: usize::from(args.max_path_depth),
        ..Default::default()
    };

    // A file that cannot be opened never reaches the inspector; it is
    // reported the way a failed object fetch would be.
    let (caller_errors, result) = match std::fs::File::open(&args.file) {
        Ok(_) => {
            let mut spinner;
            let mut noop = NoopProgress;
            let progress: &mut dyn ProgressCallback = if !silent && CliProgress::should_show() {
                spinner = CliProgress::new("Inspecting");
                &mut spinner
            } else {
                &mut noop
            };

            let request = InspectionRequest::new(name, &args.file, id.clone(), &args.media_type);
            (Vec::new(), inspect_with_progress(request, &config, progress))
        }
        Err(e) => {
            tracing::debug!(path = %args.file.display(), error = %e, "cannot open input");
            let record = ErrorRecord::new(
                ErrorKind::StorageGet,
                format!("failed to open {}: {e}", args.file.display()),
            );
            (vec![record], InspectionResult::default())
        }
    };

    let document = ResultDocument::new(id, caller_errors, result);
    formatter.format_document(&document)?;

    if document.status == Status::Error {
        bail!(
            "inspection of '{}' finished with {} error(s)",
            args.file.display(),
            document.error.len()
        );
    }
    Ok(())
}

fn default_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}
