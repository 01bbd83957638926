//! slidecat - Convert presentations to PDF and merge PDFs.

use clap::Parser;
use std::process;

use slidecat::cli::Cli;
use slidecat::config::Config;
use slidecat::output::OutputFormatter;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose);

    let config = match Config::try_from(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(err.exit_code());
        }
    };

    let formatter = OutputFormatter::from_config(&config);

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", slidecat::NAME, slidecat::VERSION));
        formatter.blank_line();
    }

    if let Err(err) = slidecat::run(&config, &formatter).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
