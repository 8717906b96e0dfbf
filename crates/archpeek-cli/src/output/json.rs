//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use archpeek_core::ResultDocument;
use archpeek_core::config::SubtypeClass;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ClassificationOutput<'a> {
    media_type: &'a str,
    class: Option<&'static str>,
}

impl OutputFormatter for JsonFormatter {
    fn format_document(&self, document: &ResultDocument) -> Result<()> {
        Self::output(document)
    }

    fn format_classification(&self, media_type: &str, class: Option<SubtypeClass>) -> Result<()> {
        let data = ClassificationOutput {
            media_type,
            class: class.map(SubtypeClass::name),
        };
        Self::output(&JsonOutput::success("classify", data))
    }
}
