use clap::Parser;
use dhf::cli::LookupCli;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = LookupCli::parse();
    dhf::logging::init(cli.source.verbose);
    dhf::run_lookup(&cli, io::stdout().lock()).unwrap_or_else(|err| {
        eprintln!("Error: {err:?}");
        ExitCode::FAILURE
    })
}
