//! Golden test runner for executing snapshot tests

use crate::{
    corpus::{CorpusManager, TestCase},
    diff::DiffEngine,
    snapshot::SnapshotManager,
    GoldenConfig, GoldenError, Result,
};
use colored::*;
use doxport_core::model::Declaration;
use serde_json::Value;
use std::time::Instant;

/// Result of running a golden test
#[derive(Debug)]
pub struct TestResult {
    /// Name of the test
    pub name: String,

    /// Whether the test passed
    pub passed: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Diff output if comparison failed
    pub diff: Option<String>,

    /// Execution time in milliseconds
    pub duration_ms: u64,

    /// Whether snapshot was updated
    pub updated: bool,
}

impl TestResult {
    /// Print the test result
    pub fn print(&self, verbose: bool) {
        let status = if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("{} {} ({}ms)", status, self.name, self.duration_ms);

        if let Some(ref error) = self.error {
            println!("  {}: {}", "Error".red(), error);
        }

        if verbose || !self.passed {
            if let Some(ref diff) = self.diff {
                println!("{}", diff);
            }
        }

        if self.updated {
            println!("  {}", "Snapshot updated".yellow());
        }
    }
}

/// Runner for golden tests
pub struct GoldenTestRunner {
    config: GoldenConfig,
    corpus_manager: CorpusManager,
    snapshot_manager: SnapshotManager,
}

impl GoldenTestRunner {
    /// Create a new test runner
    pub fn new(config: GoldenConfig) -> Self {
        let corpus_manager = CorpusManager::new(&config.corpus_dir);
        let snapshot_manager = SnapshotManager::new(&config.snapshot_dir);

        Self {
            config,
            corpus_manager,
            snapshot_manager,
        }
    }

    /// Run a single test by name
    pub fn run_test(&self, test_name: &str) -> Result<TestResult> {
        let start = Instant::now();

        let test_path = self.config.corpus_dir.join(test_name).join("test.json");
        let test_case = self.corpus_manager.load_test_case(&test_path)?;

        let result = self.execute_test(&test_case);

        let duration_ms = start.elapsed().as_millis() as u64;

        let test_result = match result {
            Ok((passed, diff, updated)) => TestResult {
                name: test_name.to_string(),
                passed,
                error: if passed {
                    None
                } else {
                    Some("Snapshot mismatch".to_string())
                },
                diff,
                duration_ms,
                updated,
            },
            Err(e) => TestResult {
                name: test_name.to_string(),
                passed: false,
                error: Some(e.to_string()),
                diff: None,
                duration_ms,
                updated: false,
            },
        };

        if self.config.verbose {
            test_result.print(true);
        }

        if test_result.passed {
            Ok(test_result)
        } else {
            Err(GoldenError::TestFailed(format!(
                "Test '{}' failed: {}",
                test_name,
                test_result
                    .error
                    .as_ref()
                    .unwrap_or(&"Unknown error".to_string())
            )))
        }
    }

    /// Run a batch of tests matching a pattern
    pub fn run_batch(&self, pattern: &str) -> Result<Vec<TestResult>> {
        let mut results = Vec::new();

        let tests = self.corpus_manager.discover_tests()?;

        let filtered_tests: Vec<_> = if pattern == "*" {
            tests
        } else {
            tests
                .into_iter()
                .filter(|t| t.name.contains(pattern) || t.category.contains(pattern))
                .collect()
        };

        if filtered_tests.is_empty() {
            return Err(GoldenError::CorpusError(format!(
                "No tests found matching pattern '{}'",
                pattern
            )));
        }

        println!("Running {} tests...\n", filtered_tests.len());

        let mut passed = 0;
        let mut failed = 0;

        for test_case in filtered_tests {
            let test_name = format!("{}/{}", test_case.category, test_case.name);
            let result = self.run_test(&test_name).unwrap_or_else(|e| TestResult {
                name: test_name.clone(),
                passed: false,
                error: Some(e.to_string()),
                diff: None,
                duration_ms: 0,
                updated: false,
            });

            if result.passed {
                passed += 1;
            } else {
                failed += 1;
            }

            result.print(self.config.verbose);
            results.push(result);
        }

        println!("\n{}", "=== Test Summary ===".bold());
        println!(
            "{}: {} passed, {} failed",
            "Results".bold(),
            passed.to_string().green(),
            failed.to_string().red()
        );

        if failed > 0 {
            Err(GoldenError::TestFailed(format!("{} test(s) failed", failed)))
        } else {
            Ok(results)
        }
    }

    /// Execute a single test case
    fn execute_test(&self, test_case: &TestCase) -> Result<(bool, Option<String>, bool)> {
        // Skip disabled tests
        if !test_case.metadata.enabled {
            return Ok((true, None, false));
        }

        let artifact = match self.perform_export(test_case) {
            Ok(artifact) => {
                if !test_case.expectations.should_succeed {
                    return Err(GoldenError::TestFailed(
                        "Export succeeded but the test expects failure".to_string(),
                    ));
                }
                artifact
            }
            Err(e) => {
                if test_case.expectations.should_succeed {
                    return Err(e);
                }
                // Expected failure: check the error message pattern if given.
                if let Some(ref pattern) = test_case.expectations.error_pattern {
                    let message = e.to_string();
                    if !message.contains(pattern.as_str()) {
                        return Err(GoldenError::TestFailed(format!(
                            "Error '{}' does not contain expected pattern '{}'",
                            message, pattern
                        )));
                    }
                }
                return Ok((true, None, false));
            }
        };

        let snapshot_name = format!("{}/{}", test_case.category, test_case.name);

        if !self.snapshot_manager.exists(&snapshot_name) {
            if self.config.create_missing || self.config.update_snapshots {
                self.snapshot_manager.create(
                    &snapshot_name,
                    artifact,
                    Some(test_case.metadata.description.clone()),
                )?;

                return Ok((true, None, true));
            } else {
                return Err(GoldenError::SnapshotMismatch(format!(
                    "Snapshot '{}' does not exist. Run with UPDATE_GOLDEN=1 to create it.",
                    snapshot_name
                )));
            }
        }

        let snapshot = self.snapshot_manager.load(&snapshot_name)?;

        let diff_engine = DiffEngine::new(self.config.diff_options.clone());
        let diff_result = diff_engine.compare(&snapshot.content, &artifact);

        if diff_result.matches {
            Ok((true, None, false))
        } else if self.config.update_snapshots {
            self.snapshot_manager.backup(&snapshot_name)?;
            self.snapshot_manager.update(&snapshot_name, artifact)?;
            Ok((true, Some(diff_result.diff_output), true))
        } else {
            Ok((false, Some(diff_result.diff_output), false))
        }
    }

    /// Run the export pipeline for a test case and return the artifact
    fn perform_export(&self, test_case: &TestCase) -> Result<Value> {
        let root: Declaration =
            serde_json::from_value(test_case.input.clone()).map_err(GoldenError::Json)?;

        let outcome = doxport_core::project(&root);

        // Diagnostic expectations are checked before the snapshot compare
        // so a wrong drop fails loudly rather than as a content mismatch.
        for expected_code in &test_case.expectations.expected_diagnostics {
            let seen = outcome
                .report
                .items
                .iter()
                .any(|d| d.code.to_string() == *expected_code);
            if !seen {
                return Err(GoldenError::TestFailed(format!(
                    "Expected diagnostic '{}' was not recorded",
                    expected_code
                )));
            }
        }

        let projected = outcome.root.ok_or_else(|| {
            GoldenError::TestFailed(format!(
                "Root declaration '{}' is not representable in the export schema",
                root.dri()
            ))
        })?;

        serde_json::to_value(&projected).map_err(GoldenError::Json)
    }

    /// Initialize the corpus with sample tests
    pub fn init_corpus(&self) -> Result<()> {
        self.corpus_manager.init_corpus()
    }

    /// List all available tests
    pub fn list_tests(&self) -> Result<Vec<String>> {
        let tests = self.corpus_manager.discover_tests()?;
        Ok(tests
            .into_iter()
            .map(|t| format!("{}/{}", t.category, t.name))
            .collect())
    }

    /// Get corpus statistics
    pub fn get_statistics(&self) -> Result<()> {
        let stats = self.corpus_manager.get_statistics()?;
        stats.print();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn runner_in(temp_dir: &TempDir, update: bool) -> GoldenTestRunner {
        let config = GoldenConfig {
            corpus_dir: temp_dir.path().to_path_buf(),
            snapshot_dir: temp_dir.path().join("snapshots"),
            update_snapshots: update,
            create_missing: update,
            diff_options: crate::DiffOptions {
                colored: false,
                ..Default::default()
            },
            verbose: false,
        };
        GoldenTestRunner::new(config)
    }

    #[test]
    fn test_runner_creation() {
        let temp_dir = TempDir::new().unwrap();
        let runner = runner_in(&temp_dir, false);
        runner.init_corpus().unwrap();

        let tests = runner.list_tests().unwrap();
        assert!(!tests.is_empty());
    }

    #[test]
    fn test_sample_test_creates_snapshot_in_update_mode() {
        let temp_dir = TempDir::new().unwrap();
        let runner = runner_in(&temp_dir, true);
        runner.init_corpus().unwrap();

        let result = runner.run_test("basic/empty-module").unwrap();
        assert!(result.passed);
        assert!(result.updated);

        // Second run compares against the snapshot just written.
        let runner = runner_in(&temp_dir, false);
        let result = runner.run_test("basic/empty-module").unwrap();
        assert!(result.passed);
        assert!(!result.updated);
    }
}
