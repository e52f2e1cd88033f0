use clap::Parser;
use dhf::cli::HtmlCli;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = HtmlCli::parse();
    dhf::logging::init(cli.source.verbose);
    dhf::run_makehtml(&cli, io::stdout().lock()).unwrap_or_else(|err| {
        eprintln!("Error: {err:?}");
        ExitCode::FAILURE
    })
}
