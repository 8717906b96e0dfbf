//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use archpeek_core::ErrorKind;
use archpeek_core::PeekType;
use archpeek_core::ResultDocument;
use archpeek_core::Status;
use archpeek_core::config::SubtypeClass;
use console::Term;
use console::style;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    const fn error_kind_label(kind: ErrorKind) -> &'static str {
        match kind {
            ErrorKind::Extraction => "extraction",
            ErrorKind::StorageGet => "storage_get",
            ErrorKind::StoragePut => "storage_put",
        }
    }

    fn headline(document: &ResultDocument) -> String {
        let count = document.nested_items.len();
        match (document.status, document.peek_type) {
            (Status::Success, PeekType::Listing) => format!(
                "{}: {count} {}",
                document.web_id,
                if count == 1 { "entry" } else { "entries" }
            ),
            (Status::Success, PeekType::None) => format!("{}: no listing", document.web_id),
            (Status::Error, _) => format!("{}: inspection failed", document.web_id),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_document(&self, document: &ResultDocument) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = Self::headline(document);
        if self.use_colors {
            let mark = match document.status {
                Status::Success => style("✓").green().bold(),
                Status::Error => style("✗").red().bold(),
            };
            let _ = self.term.write_line(&format!("{mark} {headline}"));
        } else {
            let _ = self.term.write_line(&headline);
        }

        for item in &document.nested_items {
            let size = if item.is_directory {
                "-".to_string()
            } else {
                Self::format_size(item.item_size)
            };
            let path = if item.is_directory {
                format!("{}/", item.item_path)
            } else {
                item.item_path.clone()
            };
            let _ = self
                .term
                .write_line(&format!("  {size:>10}  {:<24}  {path}", item.media_type));
        }

        if self.verbose
            && let Some(text) = &document.peek_text
        {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(text);
        }

        if !document.error.is_empty() {
            let _ = self.term.write_line("");
            let _ = self.term.write_line("Errors:");
            for record in &document.error {
                let label = Self::error_kind_label(record.error_type);
                if self.use_colors {
                    let _ = self.term.write_line(&format!(
                        "  {} [{label}] {}",
                        style("⚠").yellow().bold(),
                        record.report
                    ));
                } else {
                    let _ = self
                        .term
                        .write_line(&format!("  [{label}] {}", record.report));
                }
            }
        }

        Ok(())
    }

    fn format_classification(&self, media_type: &str, class: Option<SubtypeClass>) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let reader = class.map_or("none (no listing)", SubtypeClass::name);
        let _ = self.term.write_line(&format!("{media_type}: {reader}"));
        Ok(())
    }
}
