//! Process-level entry helpers and error handling.

/// Handle application errors: print to stderr and exit with code 1
pub fn handle_error(error: anyhow::Error) {
    eprintln!();
    eprintln!("Error:");
    eprintln!("{error:#}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse and validate command line arguments.
///
/// Validation failures are reported through clap so they print like any
/// other usage error.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::{CommandFactory, Parser};

    let args = crate::core::cli::CliArgs::parse();
    if let Err(message) = args.validate() {
        crate::core::cli::CliArgs::command()
            .error(clap::error::ErrorKind::ValueValidation, message)
            .exit();
    }
    args
}
