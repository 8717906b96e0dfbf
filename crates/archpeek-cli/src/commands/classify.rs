//! Classify command implementation

use crate::cli::ClassifyArgs;
use crate::error::add_media_type_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use archpeek_core::InspectorConfig;
use archpeek_core::classify;

pub fn execute(args: &ClassifyArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = InspectorConfig::default();
    let class = add_media_type_context(classify(&args.media_type, &config), &args.media_type)?;
    formatter.format_classification(&args.media_type, class)
}
