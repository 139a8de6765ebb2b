use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use plugin_validate::config::{Args, Config};
use plugin_validate::{report, runner};

/// Findings include at least one error
const EXIT_FAILED: u8 = 1;
/// Bad arguments, missing paths, unreadable configuration
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    // clap exits with status 2 on usage errors
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    match execute(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

/// Run validation and print the report; `Ok(passed)` on completion
fn execute(args: Args) -> Result<bool> {
    let config = Config::from_args(args)?;
    log::debug!("Effective configuration: {:?}", config);

    let runs = runner::run(&config)?;
    report::print(&runs, config.quiet);

    Ok(runs.iter().all(|run| run.passed()))
}
