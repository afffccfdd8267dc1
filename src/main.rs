//! Realitycheck CLI entry point.

use clap::Parser;
use realitycheck::cli::{self, Cli, Commands, GlobalArgs, EXIT_FAILED};
use tracing_subscriber::EnvFilter;

fn init_tracing(global: &GlobalArgs) {
    let level = if global.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    let result = match &cli.command {
        Commands::Extract(args) => cli::run_extract(args, &cli.global),
        Commands::Definitions(args) => cli::run_definitions(args, &cli.global),
        Commands::Discover(args) => cli::run_discover(args, &cli.global),
        Commands::Reality(command) => cli::run_reality(command, &cli.global),
        Commands::Validate(args) => cli::run_validate(args, &cli.global),
        Commands::SpecCheck(args) => cli::run_spec_check(args, &cli.global),
        Commands::Baseline(args) => cli::run_baseline(args, &cli.global),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILED
        }
    };

    std::process::exit(exit_code);
}
