//! operant-eval CLI - Operant conditioning trial analysis tool

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// Operant conditioning trial aggregation and analysis tool.
#[derive(Parser)]
#[command(name = "operant-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute grouped performance statistics and write the report CSV
    Analyze {
        /// Experiment data folders (each with trialdata/ and settings_files/)
        folders: Vec<PathBuf>,

        /// Group by these columns (e.g. Date, Block)
        #[arg(short, long = "group-by")]
        group_by: Vec<String>,

        /// Group every N consecutive trials into a bucket
        #[arg(long)]
        every: Option<u32>,

        /// Omit these columns from the report
        #[arg(long = "drop")]
        drop: Vec<String>,

        /// Keep only trials matching `Column=value[,value...]`
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Keep only trials whose date matches `OP YYYY-MM-DD` (e.g. ">= 2018-01-01")
        #[arg(long)]
        date_filter: Option<String>,

        /// Keep only trials strictly after this instant (YYYY-MM-DD[ HH:MM:SS])
        #[arg(long)]
        start_date: Option<String>,

        /// Write the report here instead of into the first data folder
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report file name when writing into the data folder
        #[arg(long, default_value = operant_eval::DEFAULT_REPORT_NAME)]
        report_name: String,
    },

    /// Dump the per-trial summary table as CSV
    Raw {
        /// Experiment data folders (each with trialdata/ and settings_files/)
        folders: Vec<PathBuf>,

        /// Keep only trials matching `Column=value[,value...]`
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Keep only trials whose date matches `OP YYYY-MM-DD`
        #[arg(long)]
        date_filter: Option<String>,

        /// Keep only trials strictly after this instant (YYYY-MM-DD[ HH:MM:SS])
        #[arg(long)]
        start_date: Option<String>,

        /// Output CSV file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the reportable column catalog
    Fields,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "operant_eval=debug" } else { "operant_eval=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            folders,
            group_by,
            every,
            drop,
            filters,
            date_filter,
            start_date,
            output,
            report_name,
        } => commands::analyze::run(
            folders,
            &group_by,
            every,
            &drop,
            &filters,
            date_filter.as_deref(),
            start_date.as_deref(),
            output,
            report_name,
            cli.verbose,
        ),
        Commands::Raw {
            folders,
            filters,
            date_filter,
            start_date,
            output,
        } => commands::raw::run(
            folders,
            &filters,
            date_filter.as_deref(),
            start_date.as_deref(),
            output,
            cli.verbose,
        ),
        Commands::Fields => commands::fields::run(),
    }
}
