//! CLI for pagebundle.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pagebundle_core::config;
use std::path::{Path, PathBuf};

use commands::{run_bundle, run_checksum, run_inspect, run_vars, BundleOptions};

/// Top-level CLI for pagebundle.
#[derive(Debug, Parser)]
#[command(name = "pagebundle")]
#[command(about = "pagebundle: zip every file attached to a data page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every attached file on a page and save them as one zip.
    Bundle {
        /// Captured page HTML (or a JSON snapshot with --json).
        page: PathBuf,
        /// Treat PAGE as a JSON page snapshot instead of HTML.
        #[arg(long)]
        json: bool,
        /// Archive base name (default: the page's calculated field).
        #[arg(long)]
        name: Option<String>,
        /// Base URL for relative attachment links (default: config `base_url`).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// App key the page announced (default: keys found in the page).
        #[arg(long, value_name = "KEY")]
        app_key: Option<String>,
        /// Output directory (default: config `output_dir`, then the current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Show the attachments, archive name, and app keys found on a page.
    Inspect {
        /// Captured page HTML (or a JSON snapshot with --json).
        page: PathBuf,
        /// Treat PAGE as a JSON page snapshot instead of HTML.
        #[arg(long)]
        json: bool,
    },

    /// Print the query variables of a page URL.
    Vars {
        /// Absolute page URL.
        url: String,
    },

    /// Compute SHA-256 of a file (e.g. a delivered archive).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Bundle {
                page,
                json,
                name,
                base_url,
                app_key,
                out,
            } => {
                let opts = BundleOptions {
                    page,
                    json,
                    name,
                    base_url,
                    app_key,
                    out,
                };
                run_bundle(&cfg, opts).await?;
            }
            CliCommand::Inspect { page, json } => run_inspect(&cfg, &page, json)?,
            CliCommand::Vars { url } => run_vars(&url)?,
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
