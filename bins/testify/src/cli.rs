// Command-line surface for the harness
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;
use std::time::Duration;
use testify_common::config::{HarnessConfig, DEFAULT_TESTER};

#[derive(Parser, Debug)]
#[command(name = "testify")]
#[command(version)]
#[command(about = "Regression-test a program against golden output files", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// The program to test
    #[arg(short = 'p', value_name = "program")]
    pub program: PathBuf,

    /// The directory containing the tests
    #[arg(short = 't', value_name = "directory")]
    pub tests: PathBuf,

    /// Verbose reporting
    #[arg(short = 'V')]
    pub verbose: bool,

    /// Display the version
    #[arg(short = 'v', action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Name shown as the tester in the report
    #[arg(long, env = "USER", default_value = DEFAULT_TESTER, hide_env_values = true)]
    pub tester: String,

    /// Kill a case and count it as failed after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Build the harness configuration; existence checks happen in `validate`
    pub fn into_config(self) -> HarnessConfig {
        HarnessConfig::new(self.program, self.tests)
            .with_verbose(self.verbose)
            .with_tester(self.tester)
            .with_timeout(self.timeout.map(Duration::from_secs))
    }

    /// `message` followed by the usage line, as printed for any bad invocation
    pub fn usage_error(message: impl std::fmt::Display) -> String {
        let message = message.to_string();
        format!("{}\n\n{}", message.trim_end(), Self::command().render_usage())
    }
}
