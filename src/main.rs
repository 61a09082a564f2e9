use clap::Parser;
use env_logger::Env;

use crate::cli::{output::print_error, run, Cli};

mod cli;
mod config;
mod disk;
mod error;
mod restore;
mod trace;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level().as_str()))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(&cli) {
        print_error(&e);
        std::process::exit(1);
    }
}
