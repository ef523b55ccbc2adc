use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension of the file that defines a case and feeds the subject's stdin
pub const INPUT_EXT: &str = "in";
/// Extension of the optional argument file
pub const ARGS_EXT: &str = "args";
/// Extension of the golden (expected) output
pub const GOLDEN_EXT: &str = "out";
/// Extension of the transient actual output written by the runner
pub const ACTUAL_EXT: &str = "out.new";

/// One golden-file test case
///
/// All paths are derived from the directory and the case name, so two
/// cases with different names never share an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub input_path: PathBuf,
    pub args_path: PathBuf,
    pub golden_output_path: PathBuf,
    pub actual_output_path: PathBuf,
}

impl TestCase {
    pub fn new(dir: &Path, name: &str) -> Self {
        let artifact = |ext: &str| dir.join(format!("{}.{}", name, ext));
        Self {
            name: name.to_string(),
            input_path: artifact(INPUT_EXT),
            args_path: artifact(ARGS_EXT),
            golden_output_path: artifact(GOLDEN_EXT),
            actual_output_path: artifact(ACTUAL_EXT),
        }
    }
}

/// Classification of a single case after comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Actual output is byte-identical to the golden output
    Passed,
    /// Actual output differs from the golden output
    Failed,
    /// No golden output exists yet
    New,
    /// Subject program exceeded the per-case timeout and was killed
    TimedOut,
    /// No usable actual output; excluded from pass/fail tallies
    Errored(String),
}

impl Verdict {
    /// Whether this verdict lands in the failed list
    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Failed | Verdict::New | Verdict::TimedOut)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Passed => write!(f, "passed"),
            Verdict::Failed => write!(f, "failed"),
            Verdict::New => write!(f, "new"),
            Verdict::TimedOut => write!(f, "timed out"),
            Verdict::Errored(reason) => write!(f, "errored: {}", reason),
        }
    }
}

/// Aggregate outcome of one batch
///
/// Created fresh by every batch and owned by its caller. Case names keep
/// discovery order within each list.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub started_at: DateTime<Local>,
    pub passed: Vec<String>,
    pub failed: Vec<String>,
    pub errored: Vec<String>,
}

impl BatchResult {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            passed: Vec::new(),
            failed: Vec::new(),
            errored: Vec::new(),
        }
    }

    /// File a case under the list its verdict belongs to
    pub fn record(&mut self, name: &str, verdict: &Verdict) {
        let list = if verdict.is_failure() {
            &mut self.failed
        } else if *verdict == Verdict::Passed {
            &mut self.passed
        } else {
            &mut self.errored
        };
        list.push(name.to_string());
    }

    /// Number of classified cases; errored cases are not counted
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    /// Same classification, ignoring when the batch ran
    pub fn same_outcome(&self, other: &BatchResult) -> bool {
        self.passed == other.passed && self.failed == other.failed && self.errored == other.errored
    }
}
