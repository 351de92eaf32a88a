use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use lty_cli::args::CliArgs;
use lty_cli::{driver, tracing_config};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_config::init_tracing(args.verbose, args.log_format);

    if args.no_color || args.json || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let session = driver::Session::load(&args.project)?.configure(&args);
    let output = driver::run(&session, &args.command)?;
    print!("{}", output.render(args.json)?);
    Ok(())
}
