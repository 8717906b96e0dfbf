//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "archpeek")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Produce a listing of an archive's contents
    Inspect(InspectArgs),
    /// Show which reader a declared media type dispatches to
    Classify(ClassifyArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Declared media type of the file (e.g. application/zip)
    #[arg(short = 't', long, value_name = "TYPE")]
    pub media_type: String,

    /// Display name shown at the top of the listing (default: file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Task identifier used in error reports and as the document id
    /// (default: file name)
    #[arg(long)]
    pub id: Option<String>,

    /// Directory for transient entry files (default: next to FILE)
    #[arg(long, value_name = "DIR", env = "ARCHPEEK_STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Maximum number of path segments a file entry may have
    #[arg(long, default_value = "1024", value_parser = clap::value_parser!(u16).range(1..))]
    pub max_path_depth: u16,
}

#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// Declared media type (e.g. application/x-tar)
    #[arg(value_name = "TYPE")]
    pub media_type: String,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inspect_defaults() {
        let cli = Cli::try_parse_from(["archpeek", "inspect", "a.zip", "-t", "application/zip"])
            .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(usize::from(args.max_path_depth), archpeek_core::DEFAULT_MAX_PATH_DEPTH);
        assert!(args.name.is_none());
        assert_eq!(args.media_type, "application/zip");
    }

    #[test]
    fn test_max_path_depth_must_be_positive() {
        let result = Cli::try_parse_from([
            "archpeek",
            "inspect",
            "a.zip",
            "-t",
            "application/zip",
            "--max-path-depth",
            "0",
        ]);
        assert!(result.is_err());
    }
}
