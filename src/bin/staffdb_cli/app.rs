// src/bin/staffdb_cli/app.rs
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use staffdb::{Config, StoreOptions};

use crate::commands;
use crate::context::Context;
use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "staffdb")]
#[command(about = "Employee registry backed by SQLite", long_about = None)]
struct Cli {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// SQLite database file
    #[arg(short, long, env = "STAFFDB_DATABASE", default_value = "employees.db", global = true)]
    database: PathBuf,

    /// Page cache size applied by `optimize`
    #[arg(long, default_value_t = staffdb::config::DEFAULT_CACHE_SIZE_PAGES, global = true)]
    cache_size: i64,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the employees table
    Create,

    /// Add one employee
    Add {
        /// Full name, surname first ("Smith John Robert")
        full_name: String,

        /// Birth date as YYYY-MM-DD
        birth_date: String,

        /// Male or Female
        gender: String,
    },

    /// List all distinct employees sorted by name
    List,

    /// Generate random employees
    Generate {
        /// Uniformly random employees
        #[arg(long, default_value_t = 1_000_000)]
        random: usize,

        /// Male employees whose surname starts with "F"
        #[arg(long, default_value_t = 100)]
        biased: usize,

        /// Rows per transaction
        #[arg(long, default_value_t = 10_000)]
        batch_size: usize,
    },

    /// Time the filtered query (male, surname starting with "F")
    Perf {
        /// Rows to display
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Measure, optimize the database, and measure again
    Optimize,

    /// Time every query plan combination
    Matrix {
        /// Index state to benchmark under
        #[arg(long, value_enum, default_value_t = IndexMode::Current)]
        index: IndexMode,
    },
}

/// Index state for the plan matrix
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IndexMode {
    /// Leave the database as it is
    Current,

    /// Apply optimizations first
    With,

    /// Drop the optimization index first
    Without,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.verbose);
    log::info!("Using database {}", cli.database.display());

    let mut config = Config {
        database_path: cli.database,
        store: StoreOptions {
            cache_size_pages: cli.cache_size,
        },
        ..Config::default()
    };

    if let Commands::Generate { random, biased, batch_size } = cli.command {
        config.random_count = random;
        config.biased_count = biased;
        config.batch_size = batch_size;
    }
    if let Commands::Perf { limit } = cli.command {
        config.preview_limit = limit;
    }

    let context = Context::new(config, cli.verbose, cli.format, !cli.no_color);

    let result = match cli.command {
        Commands::Create => commands::create::execute(&context),
        Commands::Add { full_name, birth_date, gender } => {
            commands::add::execute(&context, &full_name, &birth_date, &gender)
        }
        Commands::List => commands::list::execute(&context),
        Commands::Generate { .. } => commands::generate::execute(&context),
        Commands::Perf { .. } => commands::perf::execute(&context),
        Commands::Optimize => commands::optimize::execute(&context),
        Commands::Matrix { index } => commands::matrix::execute(&context, index),
    };

    if let Err(e) = &result {
        eprintln!("{}", context.formatter().format_error(&format!("{:#}", e)));
    }

    result
}
