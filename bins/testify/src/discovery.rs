// Case discovery: one case per `.in` file in the test directory
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use testify_common::types::{TestCase, INPUT_EXT};
use tracing::debug;

/// Scan `dir` for `.in` files and build a case for each
///
/// Only the directory itself is scanned, not its subdirectories. Cases are
/// sorted by name so that a batch prints in the same order on every run.
pub fn discover_cases(dir: &Path) -> Result<Vec<TestCase>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read test directory: {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list test directory: {}", dir.display()))?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some(INPUT_EXT) {
            continue;
        }
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        } else {
            debug!(path = %path.display(), "Skipping input with non-UTF-8 name");
        }
    }

    names.sort();
    debug!(dir = %dir.display(), cases = names.len(), "Discovered cases");

    Ok(names.iter().map(|name| TestCase::new(dir, name)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_discovers_only_input_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "beta.in");
        touch(dir.path(), "alpha.in");
        touch(dir.path(), "alpha.out");
        touch(dir.path(), "alpha.args");
        touch(dir.path(), "gamma.out.new");
        touch(dir.path(), "notes.txt");

        let cases = discover_cases(dir.path()).unwrap();
        let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(cases[0].input_path, dir.path().join("alpha.in"));
    }

    #[test]
    fn test_ignores_directories_named_like_inputs() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.in")).unwrap();
        touch(dir.path(), "real.in");

        let cases = discover_cases(dir.path()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "real");
    }

    #[test]
    fn test_keeps_dots_in_case_names() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "v1.2.in");

        let cases = discover_cases(dir.path()).unwrap();
        assert_eq!(cases[0].name, "v1.2");
        assert_eq!(cases[0].golden_output_path, dir.path().join("v1.2.out"));
    }

    #[test]
    fn test_empty_directory_has_no_cases() {
        let dir = TempDir::new().unwrap();
        assert!(discover_cases(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = discover_cases(&dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("Failed to read test directory"));
    }
}
