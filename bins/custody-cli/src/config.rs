//! CLI configuration: output and logging settings.
//!
//! Every setting can come from a flag or from its environment variable
//! (`CUSTODY_OUTPUT_FORMAT`, `CUSTODY_LOG_LEVEL`, `CUSTODY_LOG_FORMAT`).

use clap::{Args, ValueEnum};

/// How the simulation result is printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable final state followed by the narration log.
    #[default]
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Result format on stdout.
    #[arg(long, global = true, value_enum, env = "CUSTODY_OUTPUT_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level filter (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true, env = "CUSTODY_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format on stderr.
    #[arg(long, global = true, value_enum, env = "CUSTODY_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub output: OutputFormat,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl From<GlobalArgs> for CliConfig {
    fn from(args: GlobalArgs) -> Self {
        Self {
            output: args.format,
            log_level: args.log_level,
            log_format: args.log_format,
        }
    }
}
