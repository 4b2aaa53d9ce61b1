use crate::analyzer::manifest::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kubedoc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate Kubernetes manifests embedded in documentation")]
#[command(long_about = "Extracts YAML, Dockerfile and Ansible snippets from markdown guides and checks Kubernetes resources against a curated schema catalog: required fields, API versions, naming, labels, per-kind structure and deprecated fields.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate markdown guides and YAML manifests
    Validate {
        /// File or directory to validate
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Stop at the first violation in each manifest
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Exit non-zero when any warning is reported
        #[arg(long)]
        fail_on_warnings: bool,

        /// Also validate untagged code blocks that look like YAML
        #[arg(long)]
        include_untagged: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Check a five-field cron schedule
    Cron {
        /// Schedule, e.g. "*/5 * * * *"
        #[arg(value_name = "SCHEDULE")]
        schedule: String,
    },

    /// Check a container image reference
    Image {
        /// Image, e.g. "registry.example.com:5000/team/app:v1"
        #[arg(value_name = "IMAGE")]
        image: String,
    },

    /// List supported resource kinds and their API versions
    Kinds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Plain,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "kubedoc", "-vv", "validate", "docs", "--strict", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate {
                path,
                strict,
                format,
                fail_on_warnings,
                ..
            } => {
                assert_eq!(path, PathBuf::from("docs"));
                assert!(strict);
                assert_eq!(format, Some(FormatArg::Json));
                assert!(!fail_on_warnings);
            }
            _ => panic!("expected validate"),
        }
    }
}
