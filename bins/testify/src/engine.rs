/// Execution Engine - Runs the Subject Program Once per Case
///
/// **Core Responsibility:**
/// Execute the subject program with each case's input and capture its
/// combined output into the case's `.out.new` artifact.
///
/// **Critical Architectural Boundary:**
/// - Engine knows HOW to run a case (spawn, redirect, wait, kill)
/// - Engine does NOT compare outputs
/// - Engine does NOT judge exit status; a non-zero exit is just output
/// - Engine leaves the artifact on disk for the Evaluator to judge
///
/// **Execution Rules:**
/// 1. Stale `.out.new` from a previous run is removed first
/// 2. Arguments come from the first line of `.args`, split on whitespace
/// 3. The program is spawned directly, never through a shell
/// 4. stdin comes from `.in`; stdout and stderr share one handle on
///    `.out.new` so they interleave in the order they are written
/// 5. Cases run strictly one after another
/// 6. On unix the subject leads its own process group; a timeout or an
///    abandoned batch kills the whole group, not just the direct child
use crate::evaluator::CaseExecutionOutput;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use testify_common::config::HarnessConfig;
use testify_common::types::TestCase;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Execute every case in order using `engine`
///
/// A failure inside one case is logged and recorded on that case's output;
/// it never stops the batch.
pub async fn execute_batch(cases: &[TestCase], engine: &ProcessEngine) -> Vec<CaseExecutionOutput> {
    let mut outputs = Vec::with_capacity(cases.len());

    info!(
        program = %engine.program.display(),
        cases = cases.len(),
        timeout_ms = engine.timeout.map(|t| t.as_millis() as u64),
        "Executing batch"
    );

    for case in cases {
        let output = match engine.execute_case(case).await {
            Ok(output) => output,
            Err(e) => {
                warn!(case = %case.name, error = %e, "Case execution failed");
                CaseExecutionOutput {
                    name: case.name.clone(),
                    exit_code: None,
                    execution_time_ms: 0,
                    timed_out: false,
                    error: Some(format!("{:#}", e)),
                }
            }
        };
        outputs.push(output);
    }

    debug!(executed = outputs.len(), "All cases executed");
    outputs
}

/// Remove a case's actual-output artifact; absent files are fine
pub async fn remove_actual_output(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

/// Read the argument vector for a case
///
/// The first line of the `.args` file is split on whitespace. A missing or
/// unreadable file yields no arguments.
pub async fn load_args(path: &Path) -> Vec<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => content
            .lines()
            .next()
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!(path = %path.display(), error = %e, "Ignoring unreadable args file");
            }
            Vec::new()
        }
    }
}

/// Local process engine for the subject program
pub struct ProcessEngine {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(&config.program, config.timeout)
    }

    /// Run one case and leave its combined output in `.out.new`
    ///
    /// Returns an error only when no artifact could be produced at all
    /// (unreadable input, uncreatable output file).
    pub async fn execute_case(&self, case: &TestCase) -> Result<CaseExecutionOutput> {
        if let Err(e) = remove_actual_output(&case.actual_output_path).await {
            warn!(case = %case.name, error = %e, "Could not remove stale output");
        }

        let args = load_args(&case.args_path).await;

        let stdin = File::open(&case.input_path)
            .with_context(|| format!("Failed to open input {}", case.input_path.display()))?;
        let stdout = File::create(&case.actual_output_path)
            .with_context(|| format!("Failed to create {}", case.actual_output_path.display()))?;
        let stderr = stdout
            .try_clone()
            .context("Failed to share output handle with stderr")?;

        debug!(case = %case.name, args = ?args, "Spawning subject program");

        let start_time = Instant::now();
        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);
        let spawned = command.spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                // Surfaces as an output difference, like any other failure
                warn!(case = %case.name, error = %e, "Failed to start subject program");
                append_marker(
                    &case.actual_output_path,
                    &format!("testify: failed to start {}: {}\n", self.program.display(), e),
                )?;
                return Ok(CaseExecutionOutput {
                    name: case.name.clone(),
                    exit_code: None,
                    execution_time_ms: start_time.elapsed().as_millis() as u64,
                    timed_out: false,
                    error: None,
                });
            }
        };

        // Declared after `child` so it drops first, while the group still exists
        let mut group = ProcessGroupGuard::new(&child);

        let mut timed_out = false;
        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => {
                    group.disarm();
                    Some(status.context("Failed to wait for subject program")?)
                }
                Err(_) => {
                    timed_out = true;
                    warn!(
                        case = %case.name,
                        timeout_ms = limit.as_millis() as u64,
                        "Case timed out - killing subject program"
                    );
                    group.kill();
                    if let Err(e) = child.kill().await {
                        warn!(case = %case.name, error = %e, "Failed to kill timed-out program");
                    }
                    append_marker(
                        &case.actual_output_path,
                        &format!("\n[testify: timed out after {}ms]\n", limit.as_millis()),
                    )?;
                    None
                }
            },
            None => {
                let status = child.wait().await.context("Failed to wait for subject program")?;
                group.disarm();
                Some(status)
            }
        };

        let execution_time_ms = start_time.elapsed().as_millis() as u64;
        let exit_code = status.and_then(|s| s.code());

        debug!(
            case = %case.name,
            exit_code = ?exit_code,
            execution_ms = execution_time_ms,
            timed_out,
            "Subject program finished"
        );

        Ok(CaseExecutionOutput {
            name: case.name.clone(),
            exit_code,
            execution_time_ms,
            timed_out,
            error: None,
        })
    }
}

/// Kills the subject's process group when dropped, unless disarmed
///
/// Reaches anything the subject started in the background. The batch
/// future being dropped on interrupt runs this before `kill_on_drop`.
struct ProcessGroupGuard {
    pgid: Option<u32>,
}

impl ProcessGroupGuard {
    fn new(child: &Child) -> Self {
        Self { pgid: child.id() }
    }

    /// The subject exited on its own; leave its group alone
    fn disarm(&mut self) {
        self.pgid = None;
    }

    fn kill(&mut self) {
        let Some(pgid) = self.pgid.take() else {
            return;
        };
        #[cfg(unix)]
        {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            if let Err(e) = killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
                debug!(pgid, error = %e, "Process group already gone");
            }
        }
        #[cfg(not(unix))]
        debug!(pgid, "Process groups unsupported; relying on kill_on_drop");
    }
}

impl Drop for ProcessGroupGuard {
    fn drop(&mut self) {
        self.kill();
    }
}

fn append_marker(path: &Path, marker: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(marker.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}
