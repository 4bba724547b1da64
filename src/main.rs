use std::io;

use clap::Parser;

use showq::cli::Cli;
use showq::core::error::ShowqError;
use showq::core::identity::{CachedIdentity, SystemIdentity};

fn run(cli: &Cli) -> Result<(), ShowqError> {
    let source = cli.source()?;
    let identity = CachedIdentity::new(SystemIdentity);
    let report = showq::core::run(source.as_ref(), &cli.filter(), cli.view(), &identity)?;
    showq::core::write_report(&mut io::stdout().lock(), &report)
}

fn main() {
    let cli = Cli::parse();
    showq::logging::init(cli.debug);

    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
