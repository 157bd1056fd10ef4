//! usnview CLI - browse, search and filter textual USN journal dumps.

use clap::{Parser, Subcommand};

mod commands;
mod output;
mod path;

use commands::{browse, list, reasons};

#[derive(Parser)]
#[command(name = "usnview")]
#[command(about = "Search, filter and page through USN change journal text dumps")]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of records from a dump
    List(list::ListArgs),
    /// Page through a dump interactively (commands on stdin)
    Browse(browse::BrowseArgs),
    /// Show every known reason code
    Reasons {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show reason categories and their codes
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Describe a hex reason code
    Describe {
        /// Reason code, e.g. 0x80000200
        code: String,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::List(args) => list::run(args),
        Commands::Browse(args) => browse::run(args),
        Commands::Reasons { json } => reasons::run_reasons(json),
        Commands::Categories { json } => reasons::run_categories(json),
        Commands::Describe { code } => reasons::run_describe(code),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
