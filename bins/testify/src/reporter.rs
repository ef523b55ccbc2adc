// Batch reporting: environment header, counts and failure dumps
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use testify_common::config::HarnessConfig;
use testify_common::types::{BatchResult, TestCase};

/// ctime(3)-style timestamp, e.g. `Fri Oct 16 09:05:02 2026`
pub const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Announce output for a case that has no golden file yet
    pub fn notice_new(&mut self, actual_output_path: &Path) -> Result<()> {
        writeln!(self.out, "New test output: {}", actual_output_path.display())?;
        Ok(())
    }

    /// Print the full batch report; failures are dumped only when verbose
    pub fn report(&mut self, config: &HarnessConfig, result: &BatchResult) -> Result<()> {
        self.environment(config, result)?;
        self.stats(result)?;
        if config.verbose {
            self.failures(config, result)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn environment(&mut self, config: &HarnessConfig, result: &BatchResult) -> Result<()> {
        writeln!(self.out, "Tester    : {}", config.tester)?;
        writeln!(self.out, "Date      : {}", result.started_at.format(DATE_FORMAT))?;
        writeln!(self.out, "Path      : {}", config.working_dir.display())?;
        writeln!(self.out, "Program   : {}", config.program.display())?;
        Ok(())
    }

    fn stats(&mut self, result: &BatchResult) -> Result<()> {
        writeln!(self.out, "Passed    : {}", result.passed.len())?;
        writeln!(self.out, "Failed    : {}", result.failed.len())?;
        writeln!(self.out, "Errored   : {}", result.errored.len())?;
        writeln!(self.out, "Total     : {}", result.total())?;
        Ok(())
    }

    /// Dump expected and actual output for every failed case
    ///
    /// Every failed case had its `.out.new` confirmed by the evaluator, so a
    /// missing one here is an error rather than something to skip.
    fn failures(&mut self, config: &HarnessConfig, result: &BatchResult) -> Result<()> {
        for name in &result.failed {
            let case = TestCase::new(&config.test_dir, name);

            writeln!(self.out)?;
            writeln!(self.out, "Failed Test: {}", name)?;
            writeln!(self.out)?;
            writeln!(self.out, "Expected...")?;
            match std::fs::read(&case.golden_output_path) {
                Ok(expected) => {
                    self.out.write_all(&expected)?;
                    writeln!(self.out)?;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    writeln!(self.out, "(no expected output)")?
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to read golden output {}", case.golden_output_path.display())
                    });
                }
            }
            writeln!(self.out)?;
            writeln!(self.out, "Found...")?;
            let actual = std::fs::read(&case.actual_output_path).with_context(|| {
                format!("Failed to read actual output {}", case.actual_output_path.display())
            })?;
            self.out.write_all(&actual)?;
            writeln!(self.out)?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use testify_common::types::Verdict;

    fn make_config(dir: &Path, verbose: bool) -> HarnessConfig {
        let mut config = HarnessConfig::new("/usr/bin/alignify", dir)
            .with_verbose(verbose)
            .with_tester("david");
        config.working_dir = PathBuf::from("/work");
        config
    }

    fn make_result() -> BatchResult {
        let started_at = Local.with_ymd_and_hms(2026, 10, 16, 9, 5, 2).unwrap();
        BatchResult::new(started_at)
    }

    fn render(config: &HarnessConfig, result: &BatchResult) -> Result<String> {
        let mut reporter = Reporter::new(Vec::new());
        reporter.report(config, result)?;
        Ok(String::from_utf8(reporter.into_inner()).unwrap())
    }

    #[test]
    fn test_summary_layout() {
        let dir = TempDir::new().unwrap();
        let config = make_config(dir.path(), false);
        let mut result = make_result();
        result.record("one", &Verdict::Passed);
        result.record("two", &Verdict::Failed);
        result.record("three", &Verdict::Errored("missing".to_string()));

        let text = render(&config, &result).unwrap();

        assert_eq!(
            text,
            "Tester    : david\n\
             Date      : Fri Oct 16 09:05:02 2026\n\
             Path      : /work\n\
             Program   : /usr/bin/alignify\n\
             Passed    : 1\n\
             Failed    : 1\n\
             Errored   : 1\n\
             Total     : 2\n"
        );
    }

    #[test]
    fn test_quiet_mode_skips_failure_dumps() {
        let dir = TempDir::new().unwrap();
        let config = make_config(dir.path(), false);
        let mut result = make_result();
        result.record("gone", &Verdict::Failed);

        // No artifacts on disk, but nothing is read without -V
        let text = render(&config, &result).unwrap();
        assert!(!text.contains("Failed Test"));
    }

    #[test]
    fn test_verbose_dumps_expected_and_found() {
        let dir = TempDir::new().unwrap();
        let case = TestCase::new(dir.path(), "case1");
        fs::write(&case.golden_output_path, "want").unwrap();
        fs::write(&case.actual_output_path, "got").unwrap();

        let config = make_config(dir.path(), true);
        let mut result = make_result();
        result.record("case1", &Verdict::Failed);

        let text = render(&config, &result).unwrap();

        assert!(text.ends_with(
            "Total     : 1\n\nFailed Test: case1\n\nExpected...\nwant\n\nFound...\ngot\n\n"
        ));
    }

    #[test]
    fn test_verbose_marks_missing_golden() {
        let dir = TempDir::new().unwrap();
        let case = TestCase::new(dir.path(), "case2");
        fs::write(&case.actual_output_path, "fresh\n").unwrap();

        let config = make_config(dir.path(), true);
        let mut result = make_result();
        result.record("case2", &Verdict::New);

        let text = render(&config, &result).unwrap();

        assert!(text.contains("Expected...\n(no expected output)\n"));
        assert!(text.contains("Found...\nfresh\n"));
    }

    #[test]
    fn test_verbose_unreadable_golden_is_an_error() {
        let dir = TempDir::new().unwrap();
        let case = TestCase::new(dir.path(), "odd");
        // A directory where the golden file should be cannot be read
        fs::create_dir(&case.golden_output_path).unwrap();
        fs::write(&case.actual_output_path, "got").unwrap();

        let config = make_config(dir.path(), true);
        let mut result = make_result();
        result.record("odd", &Verdict::Failed);

        let err = render(&config, &result).unwrap_err();
        assert!(err.to_string().contains("Failed to read golden output"));
    }

    #[test]
    fn test_verbose_missing_actual_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = make_config(dir.path(), true);
        let mut result = make_result();
        result.record("vanished", &Verdict::Failed);

        let err = render(&config, &result).unwrap_err();
        assert!(err.to_string().contains("Failed to read actual output"));
    }

    #[test]
    fn test_notice_new() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.notice_new(Path::new("tests/case2.out.new")).unwrap();
        assert_eq!(
            String::from_utf8(reporter.into_inner()).unwrap(),
            "New test output: tests/case2.out.new\n"
        );
    }
}
