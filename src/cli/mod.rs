pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, OutputFormatArg};
pub use handlers::handle_detect;
pub use output::{OutputFormat, OutputFormatter};
