//! Golden tests for the export pipeline
//!
//! These tests use snapshot testing to ensure exported artifacts
//! remain consistent across changes.

use doxport_golden::{golden_test, GoldenConfig, GoldenTestRunner};

/// Run all golden tests in the corpus
#[test]
fn golden_test_suite() {
    let config = GoldenConfig::from_env();
    let runner = GoldenTestRunner::new(config);

    match runner.run_batch("*") {
        Ok(results) => {
            println!("All {} golden tests passed!", results.len());
        }
        Err(e) => {
            panic!("Golden tests failed: {}", e);
        }
    }
}

/// Show corpus statistics
#[test]
#[ignore]
fn golden_corpus_stats() {
    let config = GoldenConfig::from_env();
    let runner = GoldenTestRunner::new(config);

    runner.get_statistics().expect("Failed to get corpus statistics");
}

// Individual test cases using the macro
golden_test!(golden_data_class, "basic/data-class");
golden_test!(golden_type_alias, "edge-cases/type-alias");
