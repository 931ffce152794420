use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Terminal,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "auditmap")]
#[command(about = "Accessibility audit evaluation and scoring engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the weighted deficiency index for an audit
    Score {
        /// Path to the audit document
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report audit progress per sample and overall
    Progress {
        /// Path to the audit document
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Lock the audit, resorting deficiency identifiers into reading order
    Lock {
        /// Path to the audit document
        path: PathBuf,

        /// Where to write the locked snapshot (defaults to in place)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deficiency identifier prefix (overrides configuration)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Assign identifiers to new failures and drop stale ones
    Refresh {
        /// Path to the audit document
        path: PathBuf,

        /// Where to write the refreshed snapshot (defaults to in place)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deficiency identifier prefix (overrides configuration)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Create a default .auditmap.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
