mod commands;
mod utils;

use clap::{Parser, Subcommand};
use log::error;

#[derive(Parser)]
#[command(
    name = "chartdiff",
    version,
    about = "Inspect and summarize rendered chart diffs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Diff file to read, or '-' for stdin
    input: String,

    /// Remove metadata.* blocks (labels, annotations, managed fields)
    #[arg(long)]
    ignore_labels: bool,

    /// How secret values are treated: suppress, show or decode
    #[arg(long)]
    secret_handling: Option<String>,

    /// Context lines kept around each change
    #[arg(long)]
    context_lines: Option<usize>,

    /// Kind to drop entirely, may be repeated
    #[arg(long = "suppress-kind")]
    suppress_kinds: Vec<String>,

    /// Drop lines matching this regex
    #[arg(long)]
    suppress_regex: Option<String>,

    /// YAML file with filter options; flags override its values
    #[arg(long)]
    filter_file: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the filtered diff grouped by category
    Show {
        #[command(flatten)]
        args: InputArgs,
    },
    /// Print summary statistics for the filtered diff
    Stats {
        #[command(flatten)]
        args: InputArgs,
    },
    /// Render an export document
    Export {
        #[command(flatten)]
        args: InputArgs,

        /// Output format: text, markdown or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Label for the older chart revision
        #[arg(long, default_value = "previous")]
        old_version: String,

        /// Label for the newer chart revision
        #[arg(long, default_value = "current")]
        new_version: String,

        /// Leave the statistics section out
        #[arg(long)]
        no_stats: bool,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    if let Err(e) = chart_utils::setup_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Show { args } => {
            let report = utils::load_report(&args)?;
            commands::show::handle_show(&report);
        }
        Command::Stats { args } => {
            let report = utils::load_report(&args)?;
            commands::stats::handle_stats(&report);
        }
        Command::Export {
            args,
            format,
            old_version,
            new_version,
            no_stats,
            output,
        } => {
            let report = utils::load_report(&args)?;
            commands::export::handle_export(
                &report,
                &format,
                &old_version,
                &new_version,
                !no_stats,
                output.as_deref(),
            )?;
        }
    }
    Ok(())
}
