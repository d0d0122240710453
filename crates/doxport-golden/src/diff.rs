//! Diff engine for comparing export artifacts
//!
//! Artifacts are deterministic, so comparison is exact structural equality.
//! The engine's job is producing a readable report when they differ.

use colored::*;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};
use std::collections::HashSet;

/// Options for diff output
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Whether to use colored output
    pub colored: bool,

    /// Whether to show full diff or just summary
    pub full_diff: bool,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            colored: true,
            full_diff: true,
            max_diff_lines: 100,
        }
    }
}

/// Result of a diff operation
#[derive(Debug)]
pub struct DiffResult {
    /// Whether the values match
    pub matches: bool,

    /// Human-readable diff output
    pub diff_output: String,

    /// Summary of changes
    pub summary: DiffSummary,
}

/// Summary of diff changes
#[derive(Debug, Default)]
pub struct DiffSummary {
    /// Number of added lines
    pub added: usize,

    /// Number of removed lines
    pub removed: usize,

    /// Paths that differ
    pub differing_paths: Vec<String>,
}

/// Engine for comparing JSON artifacts
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a new diff engine
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compare two JSON values
    pub fn compare(&self, expected: &Value, actual: &Value) -> DiffResult {
        if expected == actual {
            return DiffResult {
                matches: true,
                diff_output: String::new(),
                summary: DiffSummary::default(),
            };
        }

        DiffResult {
            matches: false,
            diff_output: self.generate_diff_output(expected, actual),
            summary: self.collect_diff_summary(expected, actual),
        }
    }

    /// Generate human-readable diff output
    fn generate_diff_output(&self, expected: &Value, actual: &Value) -> String {
        let expected_str = serde_json::to_string_pretty(expected).unwrap_or_default();
        let actual_str = serde_json::to_string_pretty(actual).unwrap_or_default();

        let text_diff = TextDiff::from_lines(&expected_str, &actual_str);
        let mut output = String::new();

        if self.options.colored {
            output.push_str(&"=== Diff Output ===\n".bold().to_string());
        } else {
            output.push_str("=== Diff Output ===\n");
        }

        let mut line_count = 0;

        for change in text_diff.iter_all_changes() {
            if self.options.max_diff_lines > 0 && line_count >= self.options.max_diff_lines {
                output.push_str("... (diff truncated) ...\n");
                break;
            }

            let line = match change.tag() {
                ChangeTag::Delete => {
                    if self.options.colored {
                        format!("{}{}", "-".red(), change.to_string().red())
                    } else {
                        format!("-{}", change)
                    }
                }
                ChangeTag::Insert => {
                    if self.options.colored {
                        format!("{}{}", "+".green(), change.to_string().green())
                    } else {
                        format!("+{}", change)
                    }
                }
                ChangeTag::Equal => {
                    if self.options.full_diff {
                        format!(" {}", change)
                    } else {
                        continue;
                    }
                }
            };

            output.push_str(&line);
            line_count += 1;
        }

        output
    }

    /// Collect summary of differences
    fn collect_diff_summary(&self, expected: &Value, actual: &Value) -> DiffSummary {
        let mut summary = DiffSummary::default();

        collect_diff_paths(expected, actual, String::new(), &mut summary.differing_paths);

        let expected_str = serde_json::to_string_pretty(expected).unwrap_or_default();
        let actual_str = serde_json::to_string_pretty(actual).unwrap_or_default();
        let text_diff = TextDiff::from_lines(&expected_str, &actual_str);

        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => summary.removed += 1,
                ChangeTag::Insert => summary.added += 1,
                ChangeTag::Equal => {}
            }
        }

        summary
    }

    /// Create a simple text diff for error messages
    pub fn simple_diff(&self, expected: &str, actual: &str) -> String {
        let diff = TextDiff::from_lines(expected, actual);
        let mut output = String::new();

        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            output.push_str(&format!("{}{}", sign, change));
        }

        output
    }
}

/// Recursively collect paths that differ
fn collect_diff_paths(expected: &Value, actual: &Value, path: String, paths: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            let all_keys: HashSet<_> = exp.keys().chain(act.keys()).collect();

            let mut sorted_keys: Vec<_> = all_keys.into_iter().collect();
            sorted_keys.sort();

            for key in sorted_keys {
                let new_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };

                match (exp.get(key), act.get(key)) {
                    (Some(exp_val), Some(act_val)) => {
                        if exp_val != act_val {
                            collect_diff_paths(exp_val, act_val, new_path, paths);
                        }
                    }
                    (Some(_), None) => paths.push(format!("{} (missing in actual)", new_path)),
                    (None, Some(_)) => paths.push(format!("{} (extra in actual)", new_path)),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(exp), Value::Array(act)) => {
            for (i, (exp_val, act_val)) in exp.iter().zip(act.iter()).enumerate() {
                let new_path = format!("{}[{}]", path, i);
                if exp_val != act_val {
                    collect_diff_paths(exp_val, act_val, new_path, paths);
                }
            }

            if exp.len() != act.len() {
                paths.push(format!(
                    "{} (array length mismatch: {} vs {})",
                    path,
                    exp.len(),
                    act.len()
                ));
            }
        }
        _ => paths.push(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_values_match() {
        let engine = DiffEngine::new(DiffOptions::default());

        let val = json!({"type": "doxport.schema.Module", "dri": "root"});
        let result = engine.compare(&val, &val.clone());

        assert!(result.matches);
        assert!(result.diff_output.is_empty());
    }

    #[test]
    fn test_mismatch_reports_differing_paths() {
        let engine = DiffEngine::new(DiffOptions {
            colored: false,
            ..Default::default()
        });

        let expected = json!({
            "dri": "p/Widget",
            "docs": {"Description": "A widget."},
            "children": []
        });

        let actual = json!({
            "dri": "p/Widget",
            "docs": {"Description": "A gadget."},
            "children": [{"dri": "p/Widget/extra"}]
        });

        let result = engine.compare(&expected, &actual);

        assert!(!result.matches);
        assert!(result
            .summary
            .differing_paths
            .iter()
            .any(|p| p.contains("docs.Description")));
        assert!(result
            .summary
            .differing_paths
            .iter()
            .any(|p| p.contains("array length mismatch")));
    }

    #[test]
    fn test_diff_output_marks_changes() {
        let engine = DiffEngine::new(DiffOptions {
            colored: false,
            ..Default::default()
        });

        let result = engine.compare(&json!({"a": 1}), &json!({"a": 2}));

        assert!(result.diff_output.contains('-'));
        assert!(result.diff_output.contains('+'));
    }
}
