use anyhow::Result;
use auditmap::cli::{Cli, Commands};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            path,
            format,
            output,
        } => auditmap::commands::score::score_audit(&path, format, output.as_deref()),
        Commands::Progress { path, format } => {
            auditmap::commands::progress::report_progress(&path, format)
        }
        Commands::Lock {
            path,
            output,
            prefix,
        } => auditmap::commands::lock::lock_audit_file(&path, output.as_deref(), prefix.as_deref()),
        Commands::Refresh {
            path,
            output,
            prefix,
        } => {
            auditmap::commands::lock::refresh_audit_file(&path, output.as_deref(), prefix.as_deref())
        }
        Commands::Init { force } => auditmap::commands::init::init_config(force),
    }
}
