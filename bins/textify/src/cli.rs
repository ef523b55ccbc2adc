//! Argument handling shared by the filter binaries.
use clap::{CommandFactory, Parser};

/// Parse the process arguments, or exit with the error and usage on stderr
///
/// `-h` and `--version` keep clap's own handling (stdout, exit 0).
pub fn parse_or_usage<C: Parser>() -> C {
    match C::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            eprintln!("{}", usage_error::<C>(&e));
            std::process::exit(e.exit_code());
        }
        Err(e) => e.exit(),
    }
}

/// clap's message for `err` followed by the command's usage line
pub fn usage_error<C: CommandFactory>(err: &clap::Error) -> String {
    format!("{}\n\n{}", err.to_string().trim_end(), C::command().render_usage())
}
