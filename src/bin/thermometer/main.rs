mod args;

use std::{io, process::ExitCode};

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use measurement_devices::{console::Console, console::is_input_closed, menu};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

fn run() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_filter)
        .with_context(|| format!("invalid log filter: {}", args.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());

    match menu::run(&mut console) {
        Ok(_) => Ok(()),
        Err(e) if is_input_closed(&e) => {
            info!("input closed, ending session");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
