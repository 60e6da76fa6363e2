use std::process;

use clap::Parser;

mod app;
mod cli;
mod fs_walk;
mod logging;
mod output;
mod search;

fn main() -> anyhow::Result<()> {
    let cfg = cli::Config::parse();
    cfg.logging.setup_logging(2)?;

    let code = app::run(cfg)?;
    process::exit(code);
}
