/// Case Evaluator - Byte-Exact Comparison Against Golden Output
///
/// **Core Responsibility:**
/// Compare each captured `.out.new` against its golden `.out` and classify
/// the case.
///
/// **Critical Properties:**
/// - Knows nothing about how the subject program was run
/// - Never writes golden files
/// - Deletes `.out.new` only after a pass; failures keep it for inspection
///
/// **Classification Rules (in order):**
/// - No `.out.new` on disk: Errored, excluded from pass/fail tallies
/// - Run hit the timeout: TimedOut (counts as failed)
/// - No `.out` on disk: New (counts as failed)
/// - Bytes equal: Passed
/// - Anything else: Failed
///
/// **Normalization Rules:** none. Whitespace, line endings and trailing
/// newlines all matter.
use crate::engine::remove_actual_output;
use chrono::{DateTime, Local};
use std::io::ErrorKind;
use testify_common::types::{BatchResult, TestCase, Verdict};
use tracing::{debug, warn};

/// Raw execution record for a single case
/// Produced by the engine, consumed by the evaluator
#[derive(Debug, Clone)]
pub struct CaseExecutionOutput {
    pub name: String,
    pub exit_code: Option<i32>,
    pub execution_time_ms: u64,
    pub timed_out: bool,
    /// Why the engine could not run the case, if it could not
    pub error: Option<String>,
}

/// Exact comparison; no normalization of any kind
pub fn outputs_match(expected: &[u8], actual: &[u8]) -> bool {
    expected == actual
}

/// Classify one case from its artifacts on disk
///
/// A passing case has its `.out.new` removed before returning.
pub async fn evaluate_case(output: &CaseExecutionOutput, case: &TestCase) -> Verdict {
    let actual = match tokio::fs::read(&case.actual_output_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let reason = output
                .error
                .clone()
                .unwrap_or_else(|| "no output captured".to_string());
            return Verdict::Errored(reason);
        }
        Err(e) => {
            return Verdict::Errored(format!(
                "failed to read {}: {}",
                case.actual_output_path.display(),
                e
            ));
        }
    };

    if output.timed_out {
        return Verdict::TimedOut;
    }

    let expected = match tokio::fs::read(&case.golden_output_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Verdict::New,
        Err(e) => {
            return Verdict::Errored(format!(
                "failed to read {}: {}",
                case.golden_output_path.display(),
                e
            ));
        }
    };

    if !outputs_match(&expected, &actual) {
        return Verdict::Failed;
    }

    if let Err(e) = remove_actual_output(&case.actual_output_path).await {
        warn!(case = %case.name, error = %e, "Could not clean up passing output");
    }
    Verdict::Passed
}

/// Fold per-case verdicts, in discovery order, into a batch result
pub fn aggregate_results(verdicts: &[(String, Verdict)], started_at: DateTime<Local>) -> BatchResult {
    let mut result = BatchResult::new(started_at);
    for (name, verdict) in verdicts {
        result.record(name, verdict);
    }

    debug!(
        passed = result.passed.len(),
        failed = result.failed.len(),
        errored = result.errored.len(),
        total = result.total(),
        "Evaluation complete"
    );

    result
}

/// Find the engine output that belongs to `case`
pub fn output_for<'a>(outputs: &'a [CaseExecutionOutput], case: &TestCase) -> Option<&'a CaseExecutionOutput> {
    outputs.iter().find(|o| o.name == case.name)
}
