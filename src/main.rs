mod awql;
mod cli;
mod db;
mod error;
mod fields;
mod fmt;
mod importer;
mod models;
mod settings;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_env("ADROWS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import {
            file,
            report,
            top_account,
            account,
            during,
        } => cli::import::run(&file, report.as_deref(), top_account, account, during.as_deref()),
        Commands::Reports => cli::reports::run(),
        Commands::Show {
            report,
            account,
            limit,
        } => cli::show::run(&report, account, limit),
        Commands::Export {
            report,
            account,
            output,
        } => cli::export::run(&report, account, output),
        Commands::Query { report, during } => cli::query::run(&report, &during),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
