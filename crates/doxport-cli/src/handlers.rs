//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

use crate::cli::{CheckArgs, CompletionsArgs, ExportArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use clap::CommandFactory;
use doxport_core::model::Declaration;
use doxport_core::{project, ProjectionOutcome};
use std::fs;
use std::path::{Path, PathBuf};

/// Handle the export command
pub fn handle_export(args: ExportArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::new("export");

    output.info(&format!("Loading model: {}", args.model.display()))?;
    let root = load_model(&args.model)?;

    let out = resolve_out_path(&args, config)?;
    let strict = args.strict || config.export.strict;

    tracing::info!(
        model = %args.model.display(),
        out = %out.display(),
        strict,
        "Exporting documentation model"
    );

    let outcome = project(&root);
    report_diagnostics(&outcome, args.show_diagnostics, output)?;

    if strict && !outcome.report.is_clean() {
        return Err(Error::StrictViolation {
            count: outcome.report.summary.total,
        });
    }

    let documentable = outcome.root.ok_or_else(|| {
        Error::other(format!(
            "root declaration '{}' is not representable in the export schema",
            root.dri()
        ))
    })?;

    doxport_core::write_artifact(&documentable, &out)?;

    timer.finish();
    output.success(&format!(
        "Exported {} -> {}",
        args.model.display(),
        out.display()
    ))?;

    Ok(())
}

/// Handle the check command
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::new("check");

    output.info(&format!("Checking model: {}", args.model.display()))?;
    let root = load_model(&args.model)?;
    let strict = args.strict || config.export.strict;

    let outcome = project(&root);

    if outcome.root.is_none() {
        return Err(Error::other(format!(
            "root declaration '{}' is not representable in the export schema",
            root.dri()
        )));
    }

    // Check always shows the full report
    if output.format() == OutputFormat::Human {
        output.section("Diagnostics")?;
    }
    output.diagnostic_report(&outcome.report)?;

    timer.finish();

    if outcome.report.is_clean() {
        output.success("Model exports without dropped fragments")?;
    } else if strict {
        return Err(Error::StrictViolation {
            count: outcome.report.summary.total,
        });
    }

    Ok(())
}

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    use clap_complete::generate;
    use std::io;

    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();

    generate(args.shell.to_clap_shell(), &mut cmd, name, &mut io::stdout());

    Ok(())
}

/// Load a documentation model from a JSON or YAML file
fn load_model(path: &Path) -> Result<Declaration> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    let root: Declaration = if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })?
    };

    Ok(root)
}

/// Resolve the artifact path from arguments and configuration
fn resolve_out_path(args: &ExportArgs, config: &Config) -> Result<PathBuf> {
    args.out
        .clone()
        .or_else(|| config.export.out.clone())
        .ok_or_else(|| Error::config("no output path: pass --out or set export.out"))
}

/// Print the diagnostics from a projection pass
fn report_diagnostics(
    outcome: &ProjectionOutcome,
    show_all: bool,
    output: &mut OutputWriter,
) -> Result<()> {
    if outcome.report.is_clean() {
        return Ok(());
    }

    if show_all {
        output.diagnostic_report(&outcome.report)?;
    } else {
        let mut codes: Vec<_> = outcome.report.summary.by_code.iter().collect();
        codes.sort();
        let summary = codes
            .iter()
            .map(|(code, count)| format!("{} x{}", code, count))
            .collect::<Vec<_>>()
            .join(", ");
        output.warning(&format!(
            "Dropped {} fragment(s): {}",
            outcome.report.summary.total, summary
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_model(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const EMPTY_MODULE: &str = r#"{
        "kind": "module",
        "dri": "root//////PointingToDeclaration/",
        "name": "root",
        "children": [],
        "documentation": []
    }"#;

    #[test]
    fn test_load_model_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path(), "model.json", EMPTY_MODULE);

        let root = load_model(&path).unwrap();
        assert_eq!(root.dri(), "root//////PointingToDeclaration/");
    }

    #[test]
    fn test_load_model_missing_file() {
        let err = load_model(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_load_model_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path(), "model.json", "{not json");

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn test_resolve_out_path_prefers_cli() {
        let args = ExportArgs {
            model: PathBuf::from("model.json"),
            out: Some(PathBuf::from("cli.json")),
            strict: false,
            show_diagnostics: false,
        };
        let mut config = Config::default();
        config.export.out = Some(PathBuf::from("config.json"));

        assert_eq!(
            resolve_out_path(&args, &config).unwrap(),
            PathBuf::from("cli.json")
        );
    }

    #[test]
    fn test_resolve_out_path_requires_some_source() {
        let args = ExportArgs {
            model: PathBuf::from("model.json"),
            out: None,
            strict: false,
            show_diagnostics: false,
        };
        let err = resolve_out_path(&args, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_export_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let model = write_model(dir.path(), "model.json", EMPTY_MODULE);
        let out = dir.path().join("api.json");

        let args = ExportArgs {
            model,
            out: Some(out.clone()),
            strict: false,
            show_diagnostics: false,
        };
        let mut output = OutputWriter::with_writer(
            OutputFormat::Human,
            false,
            true,
            0,
            Box::new(Vec::new()),
        );

        handle_export(args, &Config::default(), &mut output).unwrap();
        assert!(out.exists());

        let artifact: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(artifact["type"], "doxport.schema.Module");
        assert_eq!(artifact["name"], "root");
    }
}
