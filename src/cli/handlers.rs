//! Command handlers
//!
//! Each handler turns parsed arguments into an exit code. A directory
//! that is not a Node project exits with the detect-fail code so callers
//! scripting over multiple buildpacks can branch on it.

use super::commands::DetectArgs;
use super::output::OutputFormatter;
use crate::config::DetectorConfig;
use crate::detection::BuildPlanDetector;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::error;

/// Exit code for a directory that is not a Node project.
pub const DETECT_FAIL_CODE: i32 = 100;

pub fn handle_detect(args: &DetectArgs, quiet: bool) -> i32 {
    match run_detect(args, quiet) {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!(error = %err, "Detection failed");
            eprintln!("Error: {err:#}");
            1
        }
    }
}

fn run_detect(args: &DetectArgs, quiet: bool) -> Result<i32> {
    let project_root = args
        .project_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config = DetectorConfig::from_env().with_project_path(args.project_path.clone());
    let detector = BuildPlanDetector::with_config(&project_root, config);
    let plan = detector
        .detect()
        .with_context(|| format!("failed to classify {}", project_root.display()))?;

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = formatter.format(&plan)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write output to {}", path.display()))?;
        }
        None if quiet && !plan.is_node_project() => {}
        None => print!("{rendered}"),
    }

    if plan.is_node_project() {
        Ok(0)
    } else {
        Ok(DETECT_FAIL_CODE)
    }
}
