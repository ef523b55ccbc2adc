// Harness configuration, built once before a batch runs
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tester name used when none is given and `$USER` is unset
pub const DEFAULT_TESTER: &str = "unknown";

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Subject program invoked once per case
    pub program: PathBuf,
    /// Directory holding the golden-file store
    pub test_dir: PathBuf,
    /// Dump expected and actual output for every failure
    pub verbose: bool,
    /// Tester identity shown in the report header
    pub tester: String,
    /// Per-case limit; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Working directory shown in the report header
    pub working_dir: PathBuf,
}

impl HarnessConfig {
    pub fn new(program: impl Into<PathBuf>, test_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            test_dir: test_dir.into(),
            verbose: false,
            tester: DEFAULT_TESTER.to_string(),
            timeout: None,
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_tester(mut self, tester: impl Into<String>) -> Self {
        self.tester = tester.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that the program and the test directory exist
    ///
    /// On success the program path is made absolute so that the spawn does
    /// not fall back to a `$PATH` lookup for bare names. Symlinks are kept:
    /// the program runs under the name it was given.
    pub fn validate(mut self) -> Result<Self> {
        if !self.program.exists() {
            bail!("program not found: {}", self.program.display());
        }
        if !is_dir(&self.test_dir) {
            bail!("tests not found: {}", self.test_dir.display());
        }
        self.program = std::path::absolute(&self.program)
            .with_context(|| format!("Failed to resolve program path: {}", self.program.display()))?;
        Ok(self)
    }
}

fn is_dir(path: &Path) -> bool {
    path.metadata().map(|m| m.is_dir()).unwrap_or(false)
}
