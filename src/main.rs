mod agents;
mod cli;
mod config;
mod error;
mod utils;
mod workflow;

use agents::ProcessRunner;
use cli::Options;
use colored::Colorize;
use config::Config;
use error::Result;
use std::process;
use utils::logging::report_failure;

fn main() {
    let tokens = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let options = Options::from_tokens(tokens);

    match run(&options) {
        Ok(()) => {}
        Err(e) if e.is_fatal() => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
        Err(e) => report_failure(e),
    }
}

fn run(options: &Options) -> Result<()> {
    let config = Config::from_env(std::env::current_dir()?)?;
    let runner = ProcessRunner::new(&config.project_path, config.verbose);
    workflow::execute(&config, options, &runner)
}
