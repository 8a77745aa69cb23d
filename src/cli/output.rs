//! Output formatting for build plans
//!
//! JSON and YAML go through serde; the human format mirrors the plan's
//! shape with a tree-style summary.

use anyhow::{Context, Result};

use crate::detection::plan::BuildPlan;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, plan: &BuildPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(plan)),
        }
    }

    fn format_human(&self, plan: &BuildPlan) -> String {
        let mut output = String::new();
        let rule = "\u{2501}".repeat(42);

        if !plan.is_node_project() {
            output.push_str("\u{2717} Not a Node.js project\n");
            output.push_str(&rule);
            output.push_str("\n\nNo package.json found in the project directory.\n");
            return output;
        }

        output.push_str("\u{2713} Node.js Build Plan\n");
        output.push_str(&rule);
        output.push_str("\n\n");

        output.push_str(&format!("Package Manager:  {}\n", plan.package_manager));
        output.push_str(&format!("Vendored:         {}\n", yes_no(plan.vendored)));
        output.push_str(&format!(
            "Native Modules:   {}\n",
            yes_no(plan.native_modules)
        ));
        match (&plan.node_version, &plan.version_source) {
            (Some(version), Some(source)) => {
                output.push_str(&format!("Node Version:     {version} ({source})\n"));
            }
            (Some(version), None) => {
                output.push_str(&format!("Node Version:     {version}\n"));
            }
            _ => output.push_str("Node Version:     (not pinned)\n"),
        }
        output.push('\n');

        output.push_str("Install Information:\n");
        if let Some(strategy) = plan.install_strategy {
            output.push_str(&format!("\u{251C}\u{2500} Strategy:  {strategy}\n"));
        }
        match &plan.install_command {
            Some(command) => {
                output.push_str(&format!("\u{2514}\u{2500} Command:   {command}\n"))
            }
            None => output.push_str("\u{2514}\u{2500} Command:   (none)\n"),
        }
        output.push('\n');

        match &plan.start_command {
            Some(command) => output.push_str(&format!("Start Command: {command}\n")),
            None => output.push_str("Start Command: (not specified)\n"),
        }

        if !plan.workspaces.is_empty() {
            output.push_str("\nWorkspaces:\n");
            for (idx, member) in plan.workspaces.iter().enumerate() {
                let connector = if idx == plan.workspaces.len() - 1 {
                    "\u{2514}"
                } else {
                    "\u{251C}"
                };
                output.push_str(&format!("{}\u{2500} {}\n", connector, member.display()));
            }
        }

        if !plan.advisories.is_empty() {
            output.push_str("\n\u{26A0} Advisories:\n");
            for advisory in &plan.advisories {
                output.push_str(&format!("  - {advisory}\n"));
            }
        }

        output
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
