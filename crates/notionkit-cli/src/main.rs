//! NotionKit CLI - export Notion pages to JSON or Markdown files

use clap::{Parser, Subcommand, ValueEnum};
use notionkit::{
    ExportError, ExportFormat, ExportReport, Exporter, DEFAULT_API_BASE, DEFAULT_OUT_DIR,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for export subcommand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Markdown rendered from the page's blocks
    #[default]
    Md,
    /// Raw page record as JSON
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Md => ExportFormat::Markdown,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

/// NotionKit - fetch Notion page content as JSON or Markdown
#[derive(Parser, Debug)]
#[command(name = "notionkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a Notion page to JSON or Markdown
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    /// Notion page id (UUID, 32 hex digits, or page URL)
    #[arg(long, env = "NOTION_DEFAULT_PAGE_ID")]
    page_id: Option<String>,

    /// Output directory
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Output format
    #[arg(long, short, value_enum, ignore_case = true, default_value = "md")]
    format: OutputFormat,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Notion API base URL
    #[arg(long, env = "NOTION_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Fail instead of following more than this many children batches
    #[arg(long)]
    max_batches: Option<usize>,

    /// Log progress to stderr
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Before parsing, so .env values feed the env-backed flags
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export(args)) => {
            init_logging(args.verbose);
            if let Ok(path) = dotenv {
                debug!(path = %path.display(), "Loaded environment file");
            }

            match run_export(args).await {
                Ok(report) => writeln_safe(&report.path.display().to_string()),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(if e.is_config_error() { 2 } else { 1 });
                }
            }
        }
        None => {
            eprintln!("Usage: notionkit export --page-id <ID|URL>");
            eprintln!("   or: notionkit --help");
            std::process::exit(1);
        }
    }
}

async fn run_export(args: ExportArgs) -> Result<ExportReport, ExportError> {
    let page_id = args
        .page_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ExportError::MissingPageId)?;

    let mut builder = Exporter::builder()
        .api_base(args.api_base)
        .out_dir(args.out_dir)
        .format(args.format.into());

    if let Some(token) = args.token {
        builder = builder.token(token);
    }
    if let Some(max) = args.max_batches {
        builder = builder.max_batches(max);
    }

    let exporter = builder.build()?;
    exporter.export(&page_id).await
}

/// Install the stderr subscriber; `RUST_LOG` overrides the defaults
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("notionkit=debug,notionkit_cli=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
