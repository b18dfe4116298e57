//! CI job-matrix selector
//!
//! Decides which native-shim build jobs to run from the GitHub event
//! context and emits the matrix as the job's `matrix` output value.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Workflow file whose changes force a full matrix build.
const FLOW_FILE: &str = ".github/workflows/shim_build.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MatrixEntry {
    runner: &'static str,
    platform: &'static str,
    recipe: &'static str,
}

#[derive(Debug, Serialize)]
struct Matrix {
    include: Vec<MatrixEntry>,
}

fn runner(platform: &str) -> &'static str {
    match platform {
        "linux-64" => "ubuntu-24.04",
        "linux-aarch64" => "ubuntu-24.04-arm",
        "osx-64" => "macos-13",
        "osx-arm64" => "macos-14",
        "win-64" => "windows-2019",
        other => panic!("no runner mapped for platform {other}"),
    }
}

fn default_include() -> Vec<MatrixEntry> {
    vec![
        MatrixEntry {
            runner: runner("linux-64"),
            platform: "linux-64",
            recipe: "shim",
        },
        MatrixEntry {
            runner: runner("linux-aarch64"),
            platform: "linux-aarch64",
            recipe: "shim",
        },
        MatrixEntry {
            runner: runner("osx-arm64"),
            platform: "osx-arm64",
            recipe: "shim",
        },
        MatrixEntry {
            runner: runner("osx-arm64"),
            platform: "osx-arm64",
            recipe: "shim_manylinux",
        },
        MatrixEntry {
            runner: runner("win-64"),
            platform: "win-64",
            recipe: "shim",
        },
        MatrixEntry {
            runner: runner("win-64"),
            platform: "win-64",
            recipe: "shim_manylinux",
        },
    ]
}

/// Pick the build matrix for an event.
///
/// Unrecognized events produce an empty matrix (zero jobs) instead of
/// failing the workflow.
fn select(event: Option<&str>, changed_files: Option<&str>) -> Matrix {
    let include = match event {
        Some("pull_request") => {
            let flow_file_changed = changed_files
                .map(|files| files.split_whitespace().any(|f| f == FLOW_FILE))
                .unwrap_or(false);
            if flow_file_changed {
                default_include()
            } else {
                Vec::new()
            }
        }
        Some("label") => default_include()[0..1].to_vec(),
        _ => Vec::new(),
    };
    Matrix { include }
}

fn main() -> Result<()> {
    let event = env::var("GITHUB_EVENT_NAME").ok();
    let label = env::var("GITHUB_LABEL_NAME").ok();
    let inputs = env::var("GITHUB_WORKFLOW_INPUT").ok();
    let changed_files = env::var("ALL_CHANGED_FILES").ok();

    println!(
        "event: {:?}, label: {:?}, inputs: {:?}, changed_files: {:?}",
        event, label, inputs, changed_files
    );

    let matrix = select(event.as_deref(), changed_files.as_deref());
    let json = serde_json::to_string(&matrix)?;
    println!("matrix:\n{}", serde_json::to_string_pretty(&matrix)?);

    if let Ok(output_path) = env::var("GITHUB_OUTPUT") {
        let mut output = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&output_path)
            .with_context(|| format!("opening {output_path}"))?;
        writeln!(output, "matrix={json}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_with_flow_file_gets_full_matrix() {
        let changed = format!("README.md {FLOW_FILE} src/lib.rs");
        let matrix = select(Some("pull_request"), Some(&changed));
        assert_eq!(matrix.include.len(), 6);
        assert_eq!(matrix.include, default_include());
    }

    #[test]
    fn test_pull_request_without_flow_file_gets_empty_matrix() {
        let matrix = select(Some("pull_request"), Some("src/lib.rs docs/index.md"));
        assert!(matrix.include.is_empty());

        let matrix = select(Some("pull_request"), None);
        assert!(matrix.include.is_empty());
    }

    #[test]
    fn test_label_event_gets_first_default_entry() {
        let matrix = select(Some("label"), None);
        assert_eq!(matrix.include.len(), 1);
        assert_eq!(matrix.include[0], default_include()[0]);
        assert_eq!(matrix.include[0].platform, "linux-64");
        assert_eq!(matrix.include[0].runner, "ubuntu-24.04");
    }

    #[test]
    fn test_other_events_get_empty_matrix() {
        assert!(select(Some("workflow_dispatch"), None).include.is_empty());
        assert!(select(Some("push"), Some(FLOW_FILE)).include.is_empty());
        assert!(select(None, None).include.is_empty());
    }

    #[test]
    fn test_flow_file_match_is_exact_token() {
        // a path merely containing the flow file name must not trigger
        let changed = format!("vendored/{FLOW_FILE}");
        let matrix = select(Some("pull_request"), Some(&changed));
        assert!(matrix.include.is_empty());
    }

    #[test]
    fn test_matrix_serializes_with_include_key() {
        let json = serde_json::to_string(&select(Some("label"), None)).unwrap();
        assert!(json.starts_with(r#"{"include":["#));
        assert!(json.contains(r#""recipe":"shim""#));
    }
}
