mod cli;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();
    info!("Starting shtree v{}", env!("CARGO_PKG_VERSION"));

    cli::run(args)
}
