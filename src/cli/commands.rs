use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build-plan detection for Node.js application directories
#[derive(Parser, Debug)]
#[command(
    name = "nodeplan",
    about = "Build-plan detection for Node.js application directories",
    version,
    author,
    long_about = "nodeplan inspects a project directory's manifest and lockfile artifacts \
                  and classifies it into a build plan: package manager, vendoring, \
                  workspaces, native modules, and the target runtime version."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify a project directory into a build plan",
        long_about = "Inspects manifest and lockfile artifacts and prints the resulting \
                      build plan.\n\n\
                      Examples:\n  \
                      nodeplan detect\n  \
                      nodeplan detect /path/to/app\n  \
                      nodeplan detect --format json\n  \
                      nodeplan detect --project-path apps/api"
    )]
    Detect(DetectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project directory (defaults to current directory)"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'p',
        long,
        value_name = "REL",
        help = "Project subdirectory to classify (overrides NODEPLAN_PROJECT_PATH)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
