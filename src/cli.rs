//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::backends::fetch::{
    ApiClient, FetchConfig, Source, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS,
};
use crate::core::filter::FilterCriteria;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::flows::ExportContext;

/// gsoc-export - export Google Summer of Code organizations and student projects.
#[derive(Parser, Debug)]
#[command(name = "gsoc-export")]
#[command(
    author,
    version,
    about,
    long_about = r#"gsoc-export queries the public GSoC organizations API and flattens the
result into one tabular file per run (default: csv).

Commands:
- organizations: every organization of one year, one row each
- students: one row per student project, optionally filtered

Filters are case-insensitive substring matches, except --year which must equal
the year label exactly. Empty filters match everything.

Examples:
    gsoc-export organizations --year 2024
    gsoc-export students --year 2023 --topic "machine learning"
    gsoc-export students --interactive
    gsoc-export --format jsonl --stdout students --technology rust
"#
)]
pub struct Cli {
    /// Base URL of the organizations API.
    #[arg(
        long,
        global = true,
        env = "GSOC_API_BASE",
        default_value = DEFAULT_API_BASE,
        value_name = "URL",
        long_help = "Base URL of the organizations API.\n\n\
Documents are fetched from {URL}/{year}.json and {URL}/organizations.json."
    )]
    pub api_base: String,

    /// HTTP timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "GSOC_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_name = "SECS"
    )]
    pub timeout: u64,

    /// Ignore proxy settings from the environment.
    #[arg(long, global = true)]
    pub no_proxy: bool,

    /// Output format (csv/jsonl/json).
    #[arg(
        long,
        global = true,
        default_value = "csv",
        value_parser = ["csv", "jsonl", "json"],
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- csv (default): header line plus one row per record\n\
- jsonl: one JSON object per line\n\
- json: a single JSON array\n\n\
The derived file name uses the matching extension."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Directory for derived output file names.
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Write rows to stdout instead of a file.
    #[arg(long, global = true)]
    pub stdout: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no status line, error logs only).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logs on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug logging on stderr. RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every organization of one year.
    #[command(
        long_about = "Fetch {API}/{year}.json and write one row per organization.\n\n\
If --year is omitted, the year is asked for interactively.\n\n\
Examples:\n\
  gsoc-export organizations --year 2024\n\
  gsoc-export organizations --input saved_2024.json --year 2024\n"
    )]
    Organizations {
        /// Program year.
        #[arg(long, value_name = "YEAR")]
        year: Option<String>,

        /// Read the document from a local JSON file instead of the API.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output path (overrides the derived file name).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Export student projects, optionally filtered.
    #[command(
        long_about = "Fetch {API}/organizations.json and write one row per student project\n\
that passes every given filter.\n\n\
Organization filters (--organization, --category, --topic, --technology) drop whole\n\
organizations; --year keeps only the matching year label; --student filters projects.\n\n\
The derived file name is gsoc_students followed by each filter value.\n\n\
Examples:\n\
  gsoc-export students --year 2024 --organization \"Python Software Foundation\"\n\
  gsoc-export students --topic ai --technology python\n\
  gsoc-export students --interactive\n"
    )]
    Students {
        /// Keep only this year label (exact match).
        #[arg(long, value_name = "YEAR")]
        year: Option<String>,

        /// Organization name contains.
        #[arg(long, value_name = "TEXT")]
        organization: Option<String>,

        /// Student name contains.
        #[arg(long, value_name = "TEXT")]
        student: Option<String>,

        /// Organization category contains.
        #[arg(long, value_name = "TEXT")]
        category: Option<String>,

        /// Any organization technology contains.
        #[arg(long, value_name = "TEXT")]
        technology: Option<String>,

        /// Any organization topic contains.
        #[arg(long, value_name = "TEXT")]
        topic: Option<String>,

        /// Ask for the filters on stdin; flags given on the command line win.
        #[arg(short, long)]
        interactive: bool,

        /// Read the document from a local JSON file instead of the API.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output path (overrides the derived file name).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout),
            use_proxy: !self.no_proxy,
        }
    }

    fn context(&self, input: Option<PathBuf>) -> Result<ExportContext> {
        let source = match input {
            Some(path) => Source::Local(path),
            None => Source::Remote(ApiClient::new(&self.fetch_config())?),
        };

        let format: OutputFormat = self.format.parse().unwrap_or_default();
        Ok(ExportContext {
            source,
            render: RenderConfig::with_pretty(format, self.pretty),
            out_dir: self.out_dir.clone(),
            to_stdout: self.stdout,
            quiet: self.quiet || self.stdout,
        })
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Organizations {
            year,
            input,
            output,
        } => {
            let ctx = cli.context(input.clone())?;
            crate::flows::organizations::run_organizations(
                &ctx,
                year.as_deref(),
                output.as_deref(),
            )
        }

        Commands::Students {
            year,
            organization,
            student,
            category,
            technology,
            topic,
            interactive,
            input,
            output,
        } => {
            let ctx = cli.context(input.clone())?;
            let criteria = FilterCriteria::new(
                year.clone(),
                organization.clone(),
                student.clone(),
                category.clone(),
                technology.clone(),
                topic.clone(),
            );
            crate::flows::students::run_students(&ctx, criteria, *interactive, output.as_deref())
        }
    }
}
