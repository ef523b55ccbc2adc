/// Batch Executor - High-Level Orchestration
///
/// **Responsibility:**
/// Drive one batch: discovery, execution, evaluation.
///
/// **Architecture:**
/// 1. Discover cases in the test directory (discovery.rs)
/// 2. Run every case through the ProcessEngine (engine.rs)
/// 3. Classify every captured output (evaluator.rs)
/// 4. Return the BatchResult for the Reporter
///
/// This module is the glue layer. A discovery error aborts the batch;
/// anything that goes wrong inside a single case stays with that case.
use crate::discovery::discover_cases;
use crate::engine::{execute_batch, ProcessEngine};
use crate::evaluator::{aggregate_results, evaluate_case, output_for};
use crate::reporter::Reporter;
use anyhow::Result;
use chrono::Local;
use std::io::Write;
use testify_common::config::HarnessConfig;
use testify_common::types::{BatchResult, Verdict};
use tracing::{info, warn};

/// Run every case under `config.test_dir` and classify the results
///
/// Notices for new cases go to `reporter` as they are found; the summary
/// itself is left to the caller.
pub async fn run_tests<W: Write>(config: &HarnessConfig, reporter: &mut Reporter<W>) -> Result<BatchResult> {
    let started_at = Local::now();
    let cases = discover_cases(&config.test_dir)?;

    info!(
        test_dir = %config.test_dir.display(),
        cases = cases.len(),
        "Starting batch"
    );

    let engine = ProcessEngine::from_config(config);
    let outputs = execute_batch(&cases, &engine).await;

    let mut verdicts = Vec::with_capacity(cases.len());
    for case in &cases {
        let verdict = match output_for(&outputs, case) {
            Some(output) => evaluate_case(output, case).await,
            None => Verdict::Errored("case was not executed".to_string()),
        };

        match &verdict {
            Verdict::New => reporter.notice_new(&case.actual_output_path)?,
            Verdict::Errored(reason) => {
                warn!(case = %case.name, reason = %reason, "No output to evaluate; case excluded from totals");
            }
            _ => {}
        }

        info!(case = %case.name, verdict = %verdict, "Case evaluated");
        verdicts.push((case.name.clone(), verdict));
    }

    let result = aggregate_results(&verdicts, started_at);

    info!(
        passed = result.passed.len(),
        failed = result.failed.len(),
        errored = result.errored.len(),
        total = result.total(),
        "Batch complete"
    );

    Ok(result)
}
