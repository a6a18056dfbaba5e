//! Command-line interface module

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::conversion::ExportConfig;
use crate::error::{ExportError, HandleResult};
use crate::fs::{DirectoryHandle, FsDirectory};
use crate::session::{FolderPicker, FolderSession, ScanReport, PREVIEW_LIMIT};
use crate::workbook::DirectorySink;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "jsonsheet")]
#[command(about = "Combine the JSON files of a folder into one Excel workbook")]
#[command(version)]
pub struct Args {
    /// Folder to scan for JSON files (searched recursively)
    #[arg()]
    pub folder: PathBuf,

    /// Directory the workbook is saved to (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Only scan and list the JSON files, don't generate a workbook
    #[arg(long)]
    pub scan_only: bool,

    /// Write a plain-text file count report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// List every discovered file instead of the first 50
    #[arg(long)]
    pub list: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by --verbose / --quiet
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Folder "picker" for the command line: the folder named on the command line
#[derive(Debug, Clone)]
pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FolderPicker for PathPicker {
    fn pick(&self) -> HandleResult<Option<Box<dyn DirectoryHandle>>> {
        let dir = FsDirectory::open(&self.path)?;
        Ok(Some(Box::new(dir)))
    }
}

/// Install the logger. `RUST_LOG` overrides the level chosen by flags.
pub fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Run the CLI. Returns whether the requested work succeeded.
pub fn run(args: &Args) -> anyhow::Result<bool> {
    let mut session = FolderSession::new(ExportConfig::default())?;
    let picker = PathPicker::new(&args.folder);

    let report = match session.choose_folder(&picker) {
        Ok(Some(report)) => report.clone(),
        Ok(None) => {
            CliUtils::show_warning("No folder selected", args.quiet);
            return Ok(false);
        }
        Err(e) => {
            handle_error(&e);
            return Ok(false);
        }
    };

    if !args.quiet {
        print_scan_report(&report, args.list);
    }

    if let Some(path) = &args.report {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, report.render_text())?;
        CliUtils::show_success(&format!("Report written to {}", path.display()), args.quiet);
    }

    if args.scan_only {
        return Ok(true);
    }

    if report.file_count == 0 {
        CliUtils::show_warning("No JSON files found; nothing to combine", args.quiet);
        return Ok(true);
    }

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        CliUtils::create_progress_bar(report.file_count as u64)
    };

    let mut sink = DirectorySink::new(args.output_dir());
    let outcome = session.generate_with_progress(&mut sink, &progress);

    if outcome.success {
        CliUtils::show_success(&outcome.message, args.quiet);
        if let Some(location) = &outcome.saved_to {
            CliUtils::show_success(&format!("Saved to {}", location), args.quiet);
        }
    } else {
        CliUtils::show_error(&outcome.message);
    }

    Ok(outcome.success)
}

fn print_scan_report(report: &ScanReport, list_all: bool) {
    println!(
        "{} {}: {}",
        style("Scanned").bold(),
        report.folder_name,
        report.count_label()
    );

    let limit = if list_all { usize::MAX } else { PREVIEW_LIMIT };
    let (shown, remaining) = report.preview(limit);
    for file in shown {
        println!("  {}", file);
    }
    if remaining > 0 {
        println!("  {}", style(format!("... and {} more files", remaining)).dim());
    }
}

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ExportError) {
    CliUtils::show_error(&error.user_message());

    if let ExportError::Handle(_) = error {
        eprintln!("\nTip: pass the path of an existing, readable folder");
    }

    eprintln!("\nTry 'jsonsheet --help' for usage information.");
}
